//! Maze Chase - simulation core for a tile-based maze-chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, motion, clock, agents, collisions)
//! - `input`: Keyboard-to-intent mapping and pause toggling
//! - `game`: Host-facing driver that wires clock, input and simulation together
//! - `highscores`: Leaderboard and its persistence seam
//! - `settings`: User configuration

pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;

pub use error::{MazeError, SettingsError, StoreError};
pub use game::Game;
pub use highscores::{HighScoreStore, HighScores, JsonFileStore, MemoryStore};
pub use input::{Controls, InputAction, InputChannel, KeyCode};
pub use settings::{Settings, StrategyKind};

/// Game configuration constants
pub mod consts {
    /// Reference maze dimensions (cells)
    pub const BOARD_WIDTH: i32 = 19;
    pub const BOARD_HEIGHT: i32 = 21;

    /// Logical ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const FRAME_DURATION_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 3;

    /// Points per pellet
    pub const PELLET_SCORE: u64 = 10;
    /// Points per power pellet
    pub const POWER_PELLET_SCORE: u64 = 50;
    /// Points for eating a frightened adversary
    pub const GHOST_BASE_SCORE: u64 = 200;

    /// Power pellet duration (10 seconds)
    pub const POWER_PELLET_DURATION_MS: u32 = 10_000;
    pub const POWER_PELLET_DURATION_TICKS: u32 =
        POWER_PELLET_DURATION_MS * TICKS_PER_SECOND / 1000;

    /// Agent speeds, carried for strategies and renderers
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const ADVERSARY_SPEED: f32 = 1.8;
    pub const ADVERSARY_FRIGHTENED_SPEED: f32 = 1.0;
    pub const ADVERSARY_EATEN_SPEED: f32 = 4.0;
}

/// Convert a whole number of ticks to milliseconds (floored)
#[inline]
pub fn ticks_to_ms(ticks: u32) -> u32 {
    ((ticks as u64 * 1000) / consts::TICKS_PER_SECOND as u64) as u32
}
