//! Error types for the fallible edges of the crate.
//!
//! The simulation itself is total; only maze construction and persistence fail.

use thiserror::Error;

/// Errors raised when building a maze or its spawn table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze layout has no rows")]
    Empty,

    #[error("maze row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze layout has no pellets")]
    NoPellets,

    #[error("spawn ({x}, {y}) for {who} is outside the maze or on a wall")]
    BadSpawn { who: String, x: i32, y: i32 },
}

/// Errors surfaced by high score stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced when persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
