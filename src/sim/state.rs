//! Game state and core simulation types
//!
//! One `GameState` is the whole simulation context: maze, pellet grid, session
//! counters and every agent. Nothing here is global, so independent games are
//! just independent values.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::maze::{Grid, Maze};
use super::motion::{Direction, Position};
use crate::consts::*;
use crate::error::MazeError;
use crate::ticks_to_ms;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for start
    Menu,
    /// Active gameplay, the only status in which ticks run
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
    /// All pellets eaten
    Victory,
}

impl GameStatus {
    /// Game over and victory end the run until an explicit restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }

    /// Statuses in which gameplay input is accepted
    pub fn is_interactive(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Paused)
    }
}

/// Adversary behavioral mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryMode {
    Chase,
    Scatter,
    /// Vulnerable while the power pellet timer runs
    Frightened,
    /// Eaten this power period, parked at home
    Eaten,
}

impl AdversaryMode {
    pub fn speed(self) -> f32 {
        match self {
            AdversaryMode::Chase | AdversaryMode::Scatter => ADVERSARY_SPEED,
            AdversaryMode::Frightened => ADVERSARY_FRIGHTENED_SPEED,
            AdversaryMode::Eaten => ADVERSARY_EATEN_SPEED,
        }
    }
}

/// Adversary identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdversaryName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl AdversaryName {
    pub const ALL: [AdversaryName; 4] = [
        AdversaryName::Blinky,
        AdversaryName::Pinky,
        AdversaryName::Inky,
        AdversaryName::Clyde,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdversaryName::Blinky => "BLINKY",
            AdversaryName::Pinky => "PINKY",
            AdversaryName::Inky => "INKY",
            AdversaryName::Clyde => "CLYDE",
        }
    }

    /// Display color hint for renderers (RGB hex)
    pub fn color(self) -> &'static str {
        match self {
            AdversaryName::Blinky => "#FF0000",
            AdversaryName::Pinky => "#FFB8FF",
            AdversaryName::Inky => "#00FFFF",
            AdversaryName::Clyde => "#FFB852",
        }
    }
}

/// The player agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    /// Facing direction, kept even when blocked
    pub direction: Direction,
    /// Last requested direction, committed once walkable
    pub next_direction: Direction,
    pub moving: bool,
    pub speed: f32,
    pub spawn: Position,
}

impl Player {
    pub fn new(spawn: Position) -> Self {
        Self {
            pos: spawn,
            direction: Direction::Right,
            next_direction: Direction::Right,
            moving: false,
            speed: PLAYER_SPEED,
            spawn,
        }
    }

    /// Back to spawn, facing right
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.moving = false;
    }
}

/// An adversary agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub name: AdversaryName,
    pub pos: Position,
    pub direction: Direction,
    pub mode: AdversaryMode,
    /// Target cell for strategies that use one
    pub target: Position,
    pub home: Position,
    pub speed: f32,
    pub visible: bool,
}

impl Adversary {
    pub fn new(name: AdversaryName, home: Position) -> Self {
        Self {
            name,
            pos: home,
            direction: Direction::Up,
            mode: AdversaryMode::Scatter,
            target: home,
            home,
            speed: AdversaryMode::Scatter.speed(),
            visible: true,
        }
    }

    /// Change mode and the speed that goes with it
    pub fn set_mode(&mut self, mode: AdversaryMode) {
        self.mode = mode;
        self.speed = mode.speed();
    }

    /// Back to home in scatter mode
    pub fn respawn(&mut self) {
        self.pos = self.home;
        self.direction = Direction::Up;
        self.target = self.home;
        self.set_mode(AdversaryMode::Scatter);
    }
}

/// Fixed spawn table for one maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawns {
    pub player: Position,
    pub adversaries: Vec<(AdversaryName, Position)>,
}

impl Spawns {
    /// Spawn points on the reference maze
    pub fn classic() -> Self {
        Self {
            player: IVec2::new(9, 15),
            adversaries: vec![
                (AdversaryName::Blinky, IVec2::new(9, 9)),
                (AdversaryName::Pinky, IVec2::new(9, 10)),
                (AdversaryName::Inky, IVec2::new(8, 10)),
                (AdversaryName::Clyde, IVec2::new(10, 10)),
            ],
        }
    }

    /// Every spawn must be an open cell
    pub fn validate(&self, maze: &Maze) -> Result<(), MazeError> {
        let bad = |who: &str, pos: Position| MazeError::BadSpawn {
            who: who.to_string(),
            x: pos.x,
            y: pos.y,
        };
        if !maze.walkable(self.player) {
            return Err(bad("player", self.player));
        }
        for (name, pos) in &self.adversaries {
            if !maze.walkable(*pos) {
                return Err(bad(name.as_str(), *pos));
            }
        }
        Ok(())
    }
}

/// Score, lives and timers for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SessionSnapshot", from = "SessionSnapshot")]
pub struct Session {
    pub status: GameStatus,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub pellets_remaining: u32,
    /// Power pellet time left, in ticks
    pub power_ticks: u32,
    /// Best score known when the game was created, raised when beaten
    pub high_score: u64,
    pub pellets_eaten: u32,
    pub adversaries_eaten: u32,
}

impl Session {
    fn new(pellets_remaining: u32, high_score: u64) -> Self {
        Self {
            status: GameStatus::Menu,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            pellets_remaining,
            power_ticks: 0,
            high_score,
            pellets_eaten: 0,
            adversaries_eaten: 0,
        }
    }

    /// True exactly while the power timer is running
    #[inline]
    pub fn power_pellet_active(&self) -> bool {
        self.power_ticks > 0
    }

    /// Power pellet time left in milliseconds
    pub fn power_pellet_timer_ms(&self) -> u32 {
        ticks_to_ms(self.power_ticks)
    }
}

/// Serialized form of `Session`. Carries the power state in the units
/// renderers use; those two fields are recomputed from `power_ticks` on load.
#[derive(Serialize, Deserialize)]
struct SessionSnapshot {
    status: GameStatus,
    score: u64,
    lives: u8,
    level: u32,
    pellets_remaining: u32,
    power_ticks: u32,
    #[serde(default)]
    power_pellet_active: bool,
    #[serde(default)]
    power_pellet_timer_ms: u32,
    high_score: u64,
    pellets_eaten: u32,
    adversaries_eaten: u32,
}

impl From<Session> for SessionSnapshot {
    fn from(session: Session) -> Self {
        Self {
            power_pellet_active: session.power_pellet_active(),
            power_pellet_timer_ms: session.power_pellet_timer_ms(),
            status: session.status,
            score: session.score,
            lives: session.lives,
            level: session.level,
            pellets_remaining: session.pellets_remaining,
            power_ticks: session.power_ticks,
            high_score: session.high_score,
            pellets_eaten: session.pellets_eaten,
            adversaries_eaten: session.adversaries_eaten,
        }
    }
}

impl From<SessionSnapshot> for Session {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            status: snapshot.status,
            score: snapshot.score,
            lives: snapshot.lives,
            level: snapshot.level,
            pellets_remaining: snapshot.pellets_remaining,
            power_ticks: snapshot.power_ticks,
            high_score: snapshot.high_score,
            pellets_eaten: snapshot.pellets_eaten,
            adversaries_eaten: snapshot.adversaries_eaten,
        }
    }
}

/// Things that happened during a tick or transition, for renderers and audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { level: u32 },
    PelletEaten { pos: Position },
    PowerPelletEaten { pos: Position },
    PowerExpired,
    AdversaryEaten { name: AdversaryName, points: u64 },
    LifeLost { lives_left: u8 },
    GameOver { score: u64 },
    Victory { score: u64, level: u32 },
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub maze: Maze,
    pub grid: Grid,
    pub session: Session,
    pub player: Player,
    /// Fixed-size, in spawn table order
    pub adversaries: Vec<Adversary>,
    /// Ticks simulated this level
    pub time_ticks: u64,
    spawns: Spawns,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Reference maze and spawns, waiting in the menu
    pub fn classic(high_score: u64) -> Self {
        Self::build(Maze::classic(), Spawns::classic(), high_score)
    }

    /// Custom maze; spawns must sit on open cells and there must be a
    /// pellet to clear, or the level could never be won.
    pub fn new(maze: Maze, spawns: Spawns, high_score: u64) -> Result<Self, MazeError> {
        spawns.validate(&maze)?;
        let state = Self::build(maze, spawns, high_score);
        if state.session.pellets_remaining == 0 {
            return Err(MazeError::NoPellets);
        }
        Ok(state)
    }

    fn build(maze: Maze, spawns: Spawns, high_score: u64) -> Self {
        let grid = maze.build_grid();
        let session = Session::new(grid.count_remaining(), high_score);
        let player = Player::new(spawns.player);
        let adversaries = spawns
            .adversaries
            .iter()
            .map(|&(name, home)| Adversary::new(name, home))
            .collect();

        Self {
            maze,
            grid,
            session,
            player,
            adversaries,
            time_ticks: 0,
            spawns,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn spawns(&self) -> &Spawns {
        &self.spawns
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Fresh grid, agents at spawn, power off
    fn reset_level(&mut self) {
        self.grid = self.maze.build_grid();
        self.session.pellets_remaining = self.grid.count_remaining();
        self.session.power_ticks = 0;
        self.time_ticks = 0;
        self.respawn_agents();
    }

    /// Full run reset, keeping the known high score
    fn reset_run(&mut self) {
        self.reset_level();
        let high_score = self.session.high_score;
        self.session = Session::new(self.session.pellets_remaining, high_score);
    }

    fn respawn_agents(&mut self) {
        self.player.respawn();
        for adversary in &mut self.adversaries {
            adversary.respawn();
        }
    }

    /// Menu -> Playing. Returns false from any other status.
    pub fn start(&mut self) -> bool {
        if self.session.status != GameStatus::Menu {
            return false;
        }
        self.restart();
        true
    }

    /// Reset everything and start playing, from any status
    pub fn restart(&mut self) {
        self.reset_run();
        self.session.status = GameStatus::Playing;
        log::info!(
            "Game started: {} pellets, high score {}",
            self.session.pellets_remaining,
            self.session.high_score
        );
        self.push_event(GameEvent::Started { level: 1 });
    }

    /// Reset everything and wait in the menu
    pub fn return_to_menu(&mut self) {
        self.reset_run();
        self.session.status = GameStatus::Menu;
    }

    /// Playing <-> Paused. Ignored (returns false) in any other status.
    pub fn toggle_pause(&mut self) -> bool {
        self.session.status = match self.session.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            _ => return false,
        };
        log::debug!("Pause toggled: {:?}", self.session.status);
        true
    }

    /// Queue a direction request; the next tick decides whether it commits
    pub fn set_direction(&mut self, direction: Direction) {
        self.player.next_direction = direction;
    }

    /// Start (or restart) the power timer and frighten every adversary not already eaten
    pub fn activate_power(&mut self) {
        self.session.power_ticks = POWER_PELLET_DURATION_TICKS;
        for adversary in &mut self.adversaries {
            if adversary.mode != AdversaryMode::Eaten {
                adversary.set_mode(AdversaryMode::Frightened);
            }
        }
    }

    /// Timer ran out: frightened and eaten adversaries resume chasing
    pub(crate) fn expire_power(&mut self) {
        self.session.power_ticks = 0;
        for adversary in &mut self.adversaries {
            if matches!(
                adversary.mode,
                AdversaryMode::Frightened | AdversaryMode::Eaten
            ) {
                adversary.set_mode(AdversaryMode::Chase);
            }
        }
        log::debug!("Power pellet expired at tick {}", self.time_ticks);
        self.push_event(GameEvent::PowerExpired);
    }

    /// Lethal contact. Game over at zero lives, otherwise everyone respawns.
    pub fn lose_life(&mut self) {
        self.session.lives = self.session.lives.saturating_sub(1);
        let lives_left = self.session.lives;
        self.push_event(GameEvent::LifeLost { lives_left });

        if lives_left == 0 {
            self.session.status = GameStatus::GameOver;
            log::info!("Game over with score {}", self.session.score);
            self.push_event(GameEvent::GameOver {
                score: self.session.score,
            });
            return;
        }

        log::info!("Life lost, {} remaining", lives_left);
        self.respawn_agents();
    }

    /// Last pellet eaten
    pub(crate) fn win(&mut self) {
        self.session.status = GameStatus::Victory;
        log::info!(
            "Level {} cleared with score {}",
            self.session.level,
            self.session.score
        );
        self.push_event(GameEvent::Victory {
            score: self.session.score,
            level: self.session.level,
        });
    }

    /// Victory -> next level with score and lives carried over.
    /// Returns false from any other status.
    pub fn advance_level(&mut self) -> bool {
        if self.session.status != GameStatus::Victory {
            return false;
        }
        self.reset_level();
        self.session.level += 1;
        self.session.status = GameStatus::Playing;
        log::info!("Level {} started", self.session.level);
        self.push_event(GameEvent::Started {
            level: self.session.level,
        });
        true
    }

    /// Adversary at `pos`, if any (first in spawn order)
    pub fn adversary_at(&self, pos: Position) -> Option<&Adversary> {
        self.adversaries.iter().find(|a| a.pos == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_starts_in_menu() {
        let state = GameState::classic(1234);
        assert_eq!(state.status(), GameStatus::Menu);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert_eq!(state.session.high_score, 1234);
        assert_eq!(state.session.pellets_remaining, state.grid.count_remaining());
        assert_eq!(state.adversaries.len(), 4);
        assert_eq!(state.player.pos, IVec2::new(9, 15));
        assert!(state
            .adversaries
            .iter()
            .all(|a| a.mode == AdversaryMode::Scatter && a.pos == a.home));
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut state = GameState::classic(0);
        assert!(state.start());
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(!state.start());
        assert_eq!(state.drain_events(), vec![GameEvent::Started { level: 1 }]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = GameState::classic(0);
        // Ignored outside interactive statuses
        assert!(!state.toggle_pause());
        assert_eq!(state.status(), GameStatus::Menu);

        state.start();
        assert!(state.toggle_pause());
        assert_eq!(state.status(), GameStatus::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.status(), GameStatus::Playing);

        state.session.status = GameStatus::GameOver;
        assert!(!state.toggle_pause());
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_power_does_not_stack() {
        let mut state = GameState::classic(0);
        state.activate_power();
        state.session.power_ticks = 180; // 3000 ms left
        assert_eq!(state.session.power_pellet_timer_ms(), 3000);
        state.activate_power();
        assert_eq!(state.session.power_ticks, POWER_PELLET_DURATION_TICKS);
        assert_eq!(state.session.power_pellet_timer_ms(), 10_000);
        assert!(state.session.power_pellet_active());
        assert!(state
            .adversaries
            .iter()
            .all(|a| a.mode == AdversaryMode::Frightened
                && a.speed == ADVERSARY_FRIGHTENED_SPEED));
    }

    #[test]
    fn test_power_expiry_restores_chase() {
        let mut state = GameState::classic(0);
        state.activate_power();
        state.adversaries[1].set_mode(AdversaryMode::Eaten);
        state.expire_power();
        assert!(!state.session.power_pellet_active());
        assert!(state.adversaries.iter().all(|a| a.mode == AdversaryMode::Chase));
        assert_eq!(state.events(), &[GameEvent::PowerExpired]);
    }

    #[test]
    fn test_lose_life_respawns_everyone() {
        let mut state = GameState::classic(0);
        state.start();
        state.session.score = 320;
        state.session.pellets_remaining = 100;
        state.player.pos = IVec2::new(1, 1);
        state.player.direction = Direction::Down;
        state.adversaries[0].pos = IVec2::new(1, 1);
        state.adversaries[0].set_mode(AdversaryMode::Chase);

        state.lose_life();
        assert_eq!(state.session.lives, 2);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.player.pos, state.player.spawn);
        assert_eq!(state.player.direction, Direction::Right);
        for adversary in &state.adversaries {
            assert_eq!(adversary.pos, adversary.home);
            assert_eq!(adversary.mode, AdversaryMode::Scatter);
        }
        assert_eq!(state.session.score, 320);
        assert_eq!(state.session.pellets_remaining, 100);
    }

    #[test]
    fn test_last_life_is_game_over_without_respawn() {
        let mut state = GameState::classic(0);
        state.start();
        state.session.lives = 1;
        state.player.pos = IVec2::new(1, 1);

        state.lose_life();
        assert_eq!(state.session.lives, 0);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert!(state.status().is_terminal());
        assert_eq!(state.player.pos, IVec2::new(1, 1));
    }

    #[test]
    fn test_advance_level_keeps_score_and_lives() {
        let mut state = GameState::classic(0);
        assert!(!state.advance_level());

        state.start();
        state.session.score = 1500;
        state.session.lives = 2;
        state.grid = state.maze.build_grid();
        state.session.pellets_remaining = 0;
        state.win();
        assert_eq!(state.status(), GameStatus::Victory);

        assert!(state.advance_level());
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.session.level, 2);
        assert_eq!(state.session.score, 1500);
        assert_eq!(state.session.lives, 2);
        assert_eq!(state.session.pellets_remaining, 145);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_high_score() {
        let mut state = GameState::classic(700);
        state.start();
        state.session.score = 900;
        state.session.high_score = 900;
        state.session.lives = 0;
        state.session.status = GameStatus::GameOver;

        state.restart();
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert_eq!(state.session.high_score, 900);

        state.return_to_menu();
        assert_eq!(state.status(), GameStatus::Menu);
    }

    #[test]
    fn test_maze_without_pellets_rejected() {
        let maze = Maze::from_rows(&[[1u8, 1, 1, 1], [1, 0, 0, 1], [1, 1, 1, 1]]).unwrap();
        let spawns = Spawns {
            player: IVec2::new(1, 1),
            adversaries: vec![],
        };
        assert_eq!(
            GameState::new(maze, spawns, 0).unwrap_err(),
            MazeError::NoPellets
        );
    }

    #[test]
    fn test_session_json_carries_power_state() {
        let mut state = GameState::classic(0);
        state.activate_power();
        state.session.power_ticks = 90;

        let json = serde_json::to_value(&state.session).unwrap();
        assert_eq!(json["power_ticks"], 90);
        assert_eq!(json["power_pellet_active"], true);
        assert_eq!(json["power_pellet_timer_ms"], 1500);

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, state.session);

        state.session.power_ticks = 0;
        let json = serde_json::to_value(&state.session).unwrap();
        assert_eq!(json["power_pellet_active"], false);
        assert_eq!(json["power_pellet_timer_ms"], 0);
    }

    #[test]
    fn test_custom_spawns_validated() {
        let maze = Maze::from_rows(&[[1u8, 1, 1], [1, 2, 1], [1, 1, 1]]).unwrap();
        let spawns = Spawns {
            player: IVec2::new(1, 1),
            adversaries: vec![(AdversaryName::Blinky, IVec2::new(0, 0))],
        };
        assert_eq!(
            GameState::new(maze, spawns, 0).unwrap_err(),
            MazeError::BadSpawn {
                who: "BLINKY".to_string(),
                x: 0,
                y: 0
            }
        );
    }
}
