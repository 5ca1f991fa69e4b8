//! Game settings and preferences
//!
//! Persisted as a JSON file separate from the high scores.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::input::Controls;
use crate::sim::{AdversaryStrategy, RandomWalk, Stationary};

/// Which adversary movement strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StrategyKind {
    /// Adversaries hold their spawn cells
    #[default]
    Stationary,
    /// Seeded random walk
    RandomWalk,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Stationary => "Stationary",
            StrategyKind::RandomWalk => "RandomWalk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stationary" | "still" => Some(StrategyKind::Stationary),
            "randomwalk" | "random-walk" | "random" => Some(StrategyKind::RandomWalk),
            _ => None,
        }
    }

    /// Instantiate the strategy
    pub fn build(&self, seed: u64) -> Box<dyn AdversaryStrategy> {
        match self {
            StrategyKind::Stationary => Box::new(Stationary),
            StrategyKind::RandomWalk => Box::new(RandomWalk::new(seed)),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key bindings
    pub controls: Controls,
    /// Cap on ticks per frame; `None` replays every accumulated tick
    pub max_substeps: Option<u32>,
    /// Adversary movement
    pub strategy: StrategyKind,
    /// Seed for seeded strategies
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: Controls::default(),
            max_substeps: None,
            strategy: StrategyKind::Stationary,
            seed: 0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
