//! Keyboard-to-intent mapping
//!
//! Direction keys only queue a request on the player; the tick decides whether
//! it commits. The pause key is edge-triggered: holding it (key repeat) toggles
//! once. Keys are ignored outside `Playing`/`Paused`, where menus and restart
//! belong to the host UI.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, GameState};

/// Physical key, named after DOM `KeyboardEvent.code` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyP,
    Space,
    Escape,
    Enter,
}

impl KeyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::KeyW => "KeyW",
            KeyCode::KeyA => "KeyA",
            KeyCode::KeyS => "KeyS",
            KeyCode::KeyD => "KeyD",
            KeyCode::KeyP => "KeyP",
            KeyCode::Space => "Space",
            KeyCode::Escape => "Escape",
            KeyCode::Enter => "Enter",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "KeyW" => KeyCode::KeyW,
            "KeyA" => KeyCode::KeyA,
            "KeyS" => KeyCode::KeyS,
            "KeyD" => KeyCode::KeyD,
            "KeyP" => KeyCode::KeyP,
            "Space" => KeyCode::Space,
            "Escape" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            other => return Err(format!("unknown key code: {other}")),
        })
    }
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    TogglePause,
}

/// Key bindings, several keys per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::ArrowUp, KeyCode::KeyW],
            down: vec![KeyCode::ArrowDown, KeyCode::KeyS],
            left: vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            right: vec![KeyCode::ArrowRight, KeyCode::KeyD],
            pause: vec![KeyCode::Space],
        }
    }
}

impl Controls {
    /// Action bound to `key`, checking movement before pause
    pub fn action_for(&self, key: KeyCode) -> Option<InputAction> {
        let bindings = [
            (&self.up, InputAction::Move(Direction::Up)),
            (&self.down, InputAction::Move(Direction::Down)),
            (&self.left, InputAction::Move(Direction::Left)),
            (&self.right, InputAction::Move(Direction::Right)),
            (&self.pause, InputAction::TogglePause),
        ];
        bindings
            .into_iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|(_, action)| action)
    }
}

/// Tracks held keys and forwards intents to the game state
#[derive(Debug, Clone, Default)]
pub struct InputChannel {
    controls: Controls,
    pressed: HashSet<KeyCode>,
}

impl InputChannel {
    pub fn new(controls: Controls) -> Self {
        Self {
            controls,
            pressed: HashSet::new(),
        }
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Handle a key-down (including OS key repeat). Returns the action applied.
    pub fn key_down(&mut self, key: KeyCode, state: &mut GameState) -> Option<InputAction> {
        if !state.status().is_interactive() {
            return None;
        }

        let fresh = self.pressed.insert(key);
        let action = self.controls.action_for(key)?;
        match action {
            InputAction::Move(direction) => state.set_direction(direction),
            InputAction::TogglePause => {
                if !fresh || !state.toggle_pause() {
                    return None;
                }
            }
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Forget held keys (focus loss, restart)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameStatus;

    fn playing() -> GameState {
        let mut state = GameState::classic(0);
        state.start();
        state
    }

    #[test]
    fn test_direction_keys_queue_request() {
        let mut state = playing();
        let mut input = InputChannel::default();

        assert_eq!(
            input.key_down(KeyCode::KeyW, &mut state),
            Some(InputAction::Move(Direction::Up))
        );
        assert_eq!(state.player.next_direction, Direction::Up);
        // Facing is unchanged until a tick commits it
        assert_eq!(state.player.direction, Direction::Right);

        input.key_down(KeyCode::ArrowLeft, &mut state);
        assert_eq!(state.player.next_direction, Direction::Left);
    }

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut state = playing();
        let mut input = InputChannel::default();

        assert_eq!(
            input.key_down(KeyCode::Space, &mut state),
            Some(InputAction::TogglePause)
        );
        assert_eq!(state.status(), GameStatus::Paused);

        // Key repeat while held does nothing
        assert_eq!(input.key_down(KeyCode::Space, &mut state), None);
        assert_eq!(state.status(), GameStatus::Paused);

        input.key_up(KeyCode::Space);
        assert!(!input.is_pressed(KeyCode::Space));
        input.key_down(KeyCode::Space, &mut state);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_ignored_outside_interactive_statuses() {
        let mut state = GameState::classic(0);
        let mut input = InputChannel::default();
        assert_eq!(input.key_down(KeyCode::Space, &mut state), None);
        assert_eq!(input.key_down(KeyCode::ArrowUp, &mut state), None);
        assert_eq!(state.status(), GameStatus::Menu);
        assert_eq!(state.player.next_direction, Direction::Right);
        assert!(!input.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_unbound_key_is_tracked_but_inert() {
        let mut state = playing();
        let mut input = InputChannel::default();
        assert_eq!(input.key_down(KeyCode::Enter, &mut state), None);
        assert!(input.is_pressed(KeyCode::Enter));
        input.clear();
        assert!(!input.is_pressed(KeyCode::Enter));
    }

    #[test]
    fn test_custom_bindings() {
        let controls = Controls {
            pause: vec![KeyCode::KeyP],
            ..Controls::default()
        };
        let mut state = playing();
        let mut input = InputChannel::new(controls);
        assert_eq!(input.key_down(KeyCode::Space, &mut state), None);
        assert_eq!(state.status(), GameStatus::Playing);
        input.key_down(KeyCode::KeyP, &mut state);
        assert_eq!(state.status(), GameStatus::Paused);
    }

    #[test]
    fn test_key_code_parsing() {
        assert_eq!("ArrowUp".parse::<KeyCode>(), Ok(KeyCode::ArrowUp));
        assert_eq!(KeyCode::Space.to_string(), "Space");
        assert!("F13".parse::<KeyCode>().is_err());
    }
}
