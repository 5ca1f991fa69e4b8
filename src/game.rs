//! Host-facing game driver
//!
//! Owns one simulation context plus its clock, input channel, adversary
//! strategy and high score store. Hosts call `advance` from whatever scheduler
//! they have (frame callback, timer, test loop) and read `state()` afterwards.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::highscores::{HighScoreStore, HighScores};
use crate::input::{InputAction, InputChannel, KeyCode};
use crate::settings::Settings;
use crate::sim::{
    AdversaryStrategy, Direction, FixedClock, GameEvent, GameState, GameStatus, tick,
};

pub struct Game {
    state: GameState,
    clock: FixedClock,
    input: InputChannel,
    strategy: Box<dyn AdversaryStrategy>,
    store: Box<dyn HighScoreStore>,
    high_scores: HighScores,
    /// Status at the end of the last driver call
    last_status: GameStatus,
    /// Leaderboard entry written for the current run, by timestamp
    run_entry: Option<f64>,
}

impl Game {
    /// Reference maze, waiting in the menu
    pub fn new(settings: &Settings, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_state(GameState::classic(0), settings, store)
    }

    /// Drive an existing state (custom maze). Its high score is replaced by
    /// the store's best.
    pub fn with_state(
        mut state: GameState,
        settings: &Settings,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_scores = store.load().unwrap_or_else(|e| {
            log::warn!("Could not load high scores: {}", e);
            HighScores::new()
        });
        state.session.high_score = high_scores.top_score().unwrap_or(0);

        let mut clock = FixedClock::new();
        clock.set_max_substeps(settings.max_substeps);

        Self {
            last_status: state.status(),
            state,
            clock,
            input: InputChannel::new(settings.controls.clone()),
            strategy: settings.strategy.build(settings.seed),
            store,
            high_scores,
            run_entry: None,
        }
    }

    /// Swap the adversary strategy
    pub fn set_strategy(&mut self, strategy: Box<dyn AdversaryStrategy>) {
        self.strategy = strategy;
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Menu -> Playing
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        if started {
            self.begin_run();
        }
        self.sync_status();
        started
    }

    /// Full reset into Playing, from any status
    pub fn restart(&mut self) {
        self.state.restart();
        self.begin_run();
        self.sync_status();
    }

    pub fn return_to_menu(&mut self) {
        self.state.return_to_menu();
        self.input.clear();
        self.sync_status();
    }

    /// Victory -> next level, same run
    pub fn advance_level(&mut self) -> bool {
        let advanced = self.state.advance_level();
        self.sync_status();
        advanced
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state.set_direction(direction);
    }

    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.state.toggle_pause();
        self.sync_status();
        toggled
    }

    pub fn key_down(&mut self, key: KeyCode) -> Option<InputAction> {
        let action = self.input.key_down(key, &mut self.state);
        self.sync_status();
        action
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.input.key_up(key);
    }

    /// Feed a wall-clock delta. Returns the number of ticks simulated.
    ///
    /// Outside `Playing` no time accumulates. A burst stops early if a tick
    /// ends the run.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        if self.state.status() != GameStatus::Playing {
            return 0;
        }
        let ticks = self.clock.advance(delta_ms);
        self.run_ticks(ticks)
    }

    /// Feed an absolute frame timestamp. Returns the number of ticks simulated.
    pub fn advance_to(&mut self, timestamp_ms: f64) -> u32 {
        if self.state.status() != GameStatus::Playing {
            return 0;
        }
        let ticks = self.clock.advance_to(timestamp_ms);
        self.run_ticks(ticks)
    }

    fn run_ticks(&mut self, ticks: u32) -> u32 {
        let mut ran = 0;
        for _ in 0..ticks {
            tick(&mut self.state, self.strategy.as_mut());
            ran += 1;
            if self.state.status() != GameStatus::Playing {
                break;
            }
        }
        self.sync_status();
        ran
    }

    /// A new run never inherits clock time, whatever the previous status
    fn begin_run(&mut self) {
        self.run_entry = None;
        self.input.clear();
        self.clock.reset();
    }

    /// React to status changes: entering or leaving Playing clears the clock,
    /// and terminal statuses record the run.
    fn sync_status(&mut self) {
        let status = self.state.status();
        if status == self.last_status {
            return;
        }
        log::debug!("Status {:?} -> {:?}", self.last_status, status);

        if status == GameStatus::Playing || self.last_status == GameStatus::Playing {
            self.clock.reset();
        }
        if status.is_terminal() {
            self.record_run();
        }
        self.last_status = status;
    }

    fn record_run(&mut self) {
        let score = self.state.session.score;
        let level = self.state.session.level;

        if score > self.state.session.high_score {
            log::info!(
                "New high score {} (was {})",
                score,
                self.state.session.high_score
            );
            self.state.session.high_score = score;
        }

        // A run that already placed (cleared a level) replaces its entry
        if let Some(timestamp) = self.run_entry.take() {
            self.high_scores.entries.retain(|e| e.timestamp != timestamp);
        }
        let Some(rank) = self.high_scores.potential_rank(score) else {
            return;
        };
        log::info!("Run placed #{} with {} points (level {})", rank, score, level);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.high_scores.add_score(score, level, timestamp);
        self.run_entry = Some(timestamp);

        if let Err(e) = self.store.save(&self.high_scores) {
            log::warn!("Could not save high scores: {}", e);
        }
    }
}
