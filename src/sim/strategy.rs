//! Pluggable adversary movement
//!
//! Target selection is not part of the core. The tick asks a strategy for a
//! direction per adversary and commits it only if the next cell is walkable.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::maze::Maze;
use super::motion::Direction;
use super::state::{Adversary, AdversaryMode, AdversaryName, Player};
use crate::consts::PLAYER_SPEED;

/// Read-only world view handed to strategies
#[derive(Debug, Clone, Copy)]
pub struct StrategyView<'a> {
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub adversaries: &'a [Adversary],
    pub power_ticks: u32,
    pub time_ticks: u64,
}

/// Chooses adversary moves, one call per adversary per tick
pub trait AdversaryStrategy {
    /// Direction to step this tick, or `None` to stay put
    fn choose_direction(&mut self, adversary: &Adversary, view: &StrategyView<'_>)
    -> Option<Direction>;
}

/// Adversaries never move
#[derive(Debug, Clone, Copy, Default)]
pub struct Stationary;

impl AdversaryStrategy for Stationary {
    fn choose_direction(&mut self, _: &Adversary, _: &StrategyView<'_>) -> Option<Direction> {
        None
    }
}

/// Seeded random walk that avoids reversing unless at a dead end.
///
/// Adversaries step at their speed relative to the player's (who steps every
/// tick). Eaten adversaries stay home.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: Pcg32,
    /// Fractional steps owed per adversary
    progress: HashMap<AdversaryName, f32>,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            progress: HashMap::new(),
        }
    }
}

impl AdversaryStrategy for RandomWalk {
    fn choose_direction(
        &mut self,
        adversary: &Adversary,
        view: &StrategyView<'_>,
    ) -> Option<Direction> {
        if adversary.mode == AdversaryMode::Eaten {
            return None;
        }

        let owed = self.progress.entry(adversary.name).or_insert(0.0);
        *owed += adversary.speed / PLAYER_SPEED;
        if *owed < 1.0 {
            return None;
        }
        *owed -= 1.0;

        let open = view.maze.valid_directions(adversary.pos);
        let forward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|&d| d != adversary.direction.opposite())
            .collect();
        let choices = if forward.is_empty() { open } else { forward };
        if choices.is_empty() {
            return None;
        }
        Some(choices[self.rng.random_range(0..choices.len())])
    }
}
