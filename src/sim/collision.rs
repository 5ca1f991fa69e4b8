//! Pellet consumption and player/adversary contact
//!
//! Both checks run on post-move positions. Positions always come from the
//! motion resolver, so they are in bounds and every branch here is total.

use super::state::{AdversaryMode, GameEvent, GameState};
use crate::consts::{GHOST_BASE_SCORE, PELLET_SCORE, POWER_PELLET_SCORE};

/// What the player just ate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PelletKind {
    Pellet,
    PowerPellet,
}

/// Result of the contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    None,
    /// Frightened adversaries eaten this tick
    Ate(u32),
    LifeLost,
}

/// Eat whatever pellet sits under the player.
///
/// Clears the cell, scores it, arms the power timer for power pellets and
/// declares victory when the last pellet goes.
pub fn consume_pellet(state: &mut GameState) -> Option<PelletKind> {
    let pos = state.player.pos;
    let cell = state.grid.get_mut(pos)?;
    let kind = if cell.has_pellet {
        cell.has_pellet = false;
        PelletKind::Pellet
    } else if cell.has_power_pellet {
        cell.has_power_pellet = false;
        PelletKind::PowerPellet
    } else {
        return None;
    };

    match kind {
        PelletKind::Pellet => {
            state.session.score += PELLET_SCORE;
            state.push_event(GameEvent::PelletEaten { pos });
        }
        PelletKind::PowerPellet => {
            state.session.score += POWER_PELLET_SCORE;
            state.activate_power();
            log::debug!("Power pellet eaten at ({}, {})", pos.x, pos.y);
            state.push_event(GameEvent::PowerPelletEaten { pos });
        }
    }

    state.session.pellets_eaten += 1;
    state.session.pellets_remaining = state.session.pellets_remaining.saturating_sub(1);
    if state.session.pellets_remaining == 0 {
        state.win();
    }

    Some(kind)
}

/// Resolve every adversary sharing the player's cell.
///
/// Frightened adversaries are eaten. The first other adversary costs a life
/// and ends the pass.
pub fn resolve_contacts(state: &mut GameState) -> ContactOutcome {
    let mut eaten = 0;
    for idx in 0..state.adversaries.len() {
        if state.adversaries[idx].pos != state.player.pos {
            continue;
        }
        if state.adversaries[idx].mode == AdversaryMode::Frightened {
            eat_adversary(state, idx);
            eaten += 1;
        } else {
            state.lose_life();
            return ContactOutcome::LifeLost;
        }
    }

    if eaten > 0 {
        ContactOutcome::Ate(eaten)
    } else {
        ContactOutcome::None
    }
}

fn eat_adversary(state: &mut GameState, idx: usize) {
    let adversary = &mut state.adversaries[idx];
    adversary.set_mode(AdversaryMode::Eaten);
    adversary.pos = adversary.home;
    let name = adversary.name;

    state.session.score += GHOST_BASE_SCORE;
    state.session.adversaries_eaten += 1;
    log::debug!("{} eaten", name.as_str());
    state.push_event(GameEvent::AdversaryEaten {
        name,
        points: GHOST_BASE_SCORE,
    });
}
