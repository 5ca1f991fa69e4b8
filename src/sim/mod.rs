//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn table order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod maze;
pub mod motion;
pub mod state;
pub mod strategy;
pub mod tick;

pub use clock::FixedClock;
pub use collision::{ContactOutcome, PelletKind, consume_pellet, resolve_contacts};
pub use maze::{CLASSIC_LAYOUT, Cell, CellType, Grid, Maze};
pub use motion::{Direction, Position};
pub use state::{
    Adversary, AdversaryMode, AdversaryName, GameEvent, GameState, GameStatus, Player, Session,
    Spawns,
};
pub use strategy::{AdversaryStrategy, RandomWalk, Stationary, StrategyView};
pub use tick::tick;
