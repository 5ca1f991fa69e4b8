//! Fixed timestep simulation tick
//!
//! One ordered update over the whole `GameState`:
//! power timer -> direction commit -> position commit -> pellets ->
//! adversary moves -> contacts. Contacts see post-move positions only.

use super::collision;
use super::state::{GameState, GameStatus};
use super::strategy::{AdversaryStrategy, StrategyView};

/// Advance the game state by one fixed timestep.
///
/// Does nothing unless the game is playing, so terminal and paused states
/// are never mutated.
pub fn tick(state: &mut GameState, strategy: &mut dyn AdversaryStrategy) {
    if state.session.status != GameStatus::Playing {
        return;
    }

    state.time_ticks += 1;

    // Runs before pellets so a fresh power pellet keeps its full duration
    update_power_timer(state);

    move_player(state);
    if state.player.moving {
        collision::consume_pellet(state);
        if state.session.status != GameStatus::Playing {
            return;
        }
    }

    move_adversaries(state, strategy);
    collision::resolve_contacts(state);
}

fn update_power_timer(state: &mut GameState) {
    if state.session.power_ticks == 0 {
        return;
    }
    state.session.power_ticks -= 1;
    if state.session.power_ticks == 0 {
        state.expire_power();
    }
}

/// Commit a queued turn if it is open, then step forward if that is open.
/// A blocked player keeps facing the same way.
fn move_player(state: &mut GameState) {
    let maze = &state.maze;
    let player = &mut state.player;

    if player.next_direction != player.direction {
        let turned = maze.next_position(player.pos, player.next_direction);
        if maze.walkable(turned) {
            player.direction = player.next_direction;
        }
    }

    let next = maze.next_position(player.pos, player.direction);
    if maze.walkable(next) {
        player.pos = next;
        player.moving = true;
    } else {
        player.moving = false;
    }
}

fn move_adversaries(state: &mut GameState, strategy: &mut dyn AdversaryStrategy) {
    for idx in 0..state.adversaries.len() {
        let choice = {
            let view = StrategyView {
                maze: &state.maze,
                player: &state.player,
                adversaries: &state.adversaries,
                power_ticks: state.session.power_ticks,
                time_ticks: state.time_ticks,
            };
            strategy.choose_direction(&state.adversaries[idx], &view)
        };
        let Some(dir) = choice else {
            continue;
        };

        let next = state.maze.next_position(state.adversaries[idx].pos, dir);
        if state.maze.walkable(next) {
            let adversary = &mut state.adversaries[idx];
            adversary.direction = dir;
            adversary.pos = next;
        }
    }
}
