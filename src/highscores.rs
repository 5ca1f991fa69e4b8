//! High score leaderboard system
//!
//! Tracks the top 10 runs. Storage is behind `HighScoreStore`; the game reads
//! it once when created and writes it whenever a finished run places.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a score would be inserted at. Ties rank below existing entries.
    fn slot_for(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// A run places if it scored and the board has room or it beats the last entry
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && self.slot_for(score) < MAX_HIGH_SCORES
    }

    /// 1-based placing `score` would take, or `None` if it does not place
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| self.slot_for(score) + 1)
    }

    /// Insert a finished run, dropping whatever falls off the bottom.
    /// Returns the 1-based placing.
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Persistence seam for the leaderboard
pub trait HighScoreStore {
    fn load(&self) -> Result<HighScores, StoreError>;
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;
}

/// Leaderboard kept in memory (tests, embedding hosts)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scores: HighScores,
    /// Number of successful saves
    pub saves: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScores, StoreError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.scores = scores.clone();
        self.saves += 1;
        Ok(())
    }
}

/// Leaderboard stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    /// A missing file is an empty leaderboard
    fn load(&self) -> Result<HighScores, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let scores: HighScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(HighScores::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, json)?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}
