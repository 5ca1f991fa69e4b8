//! Maze Chase - headless runner
//!
//! Plays a scripted run against the reference maze and logs what happens.
//!
//! Usage: `maze-chase [settings.json] [highscores.json]`

use anyhow::Context;

use maze_chase::consts::FRAME_DURATION_MS;
use maze_chase::sim::{GameEvent, GameStatus};
use maze_chase::{Game, JsonFileStore, KeyCode, Settings};

/// Simulated frame interval (a 60 Hz display with some jitter)
const FRAME_DELTAS_MS: [f64; 4] = [16.0, 17.0, 17.0, 16.7];

/// Safety cap on simulated frames
const MAX_FRAMES: u32 = 60 * 120;

/// Scripted key presses: (frame, key)
const SCRIPT: &[(u32, KeyCode)] = &[
    (20, KeyCode::ArrowUp),
    (60, KeyCode::ArrowLeft),
    (120, KeyCode::ArrowDown),
    (150, KeyCode::Space),
    (180, KeyCode::Space),
    (200, KeyCode::ArrowRight),
    (260, KeyCode::ArrowUp),
    (330, KeyCode::ArrowLeft),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let scores_path = args
        .next()
        .unwrap_or_else(|| "maze-chase-highscores.json".to_string());

    log::info!(
        "Strategy: {} (seed {})",
        settings.strategy.as_str(),
        settings.seed
    );

    let mut game = Game::new(&settings, Box::new(JsonFileStore::new(&scores_path)));
    log::info!("High score: {}", game.state().session.high_score);

    game.start();
    let mut frames = 0;
    let mut ticks = 0;
    while frames < MAX_FRAMES {
        for (_, key) in SCRIPT.iter().filter(|(at, _)| *at == frames) {
            if let Some(action) = game.key_down(*key) {
                log::debug!("Frame {}: {} -> {:?}", frames, key, action);
            }
            game.key_up(*key);
        }

        let delta = FRAME_DELTAS_MS[frames as usize % FRAME_DELTAS_MS.len()];
        ticks += game.advance(delta);
        frames += 1;

        for event in game.drain_events() {
            log_event(&event);
        }

        match game.status() {
            GameStatus::Victory => {
                if game.state().session.level >= 3 {
                    break;
                }
                game.advance_level();
            }
            GameStatus::GameOver => break,
            _ => {}
        }

        // Keep moving once the script runs out
        if frames > 330 && !game.state().player.moving {
            let player = &game.state().player;
            let reverse = player.direction.opposite();
            let next = game
                .state()
                .maze
                .valid_directions(player.pos)
                .into_iter()
                .find(|d| *d != reverse)
                .unwrap_or(reverse);
            game.set_direction(next);
        }
    }

    let session = &game.state().session;
    log::info!(
        "Finished after {} frames ({} ticks, {:.1} s simulated): {:?}",
        frames,
        ticks,
        ticks as f64 * FRAME_DURATION_MS / 1000.0,
        game.status()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(session).context("serializing session")?
    );
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PelletEaten { .. } => log::trace!("{:?}", event),
        GameEvent::LifeLost { lives_left } => log::warn!("Life lost, {} left", lives_left),
        _ => log::info!("{:?}", event),
    }
}
