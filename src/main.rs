//! Neon Runner headless driver
//!
//! Runs sessions without a window: the autopilot (or a balance board, if one
//! is plugged in) steers, trivia answers are fixed, and events go to the log.
//! Set `RUST_LOG=info` (or `debug`) to watch a run.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use neon_runner::highscores::{LeaderboardStore, LogStore, ScoreStore};
use neon_runner::input::{InputAggregator, KeyState, board};
use neon_runner::renderer::Snapshot;
use neon_runner::session::{FixedName, Session};
use neon_runner::sim::{GameEvent, GamePhase};
use neon_runner::trivia::FixedChoice;
use neon_runner::tuning::Tuning;

#[derive(Debug, Parser)]
#[command(name = "neon-runner")]
#[command(about = "Run Neon Runner sessions headlessly")]
struct Options {
    /// RNG seed (default: from the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Runs to play before stopping
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    lives: u32,
    /// Player tag, 1-4 letters
    #[arg(long, default_value = "AAA")]
    name: String,
    /// Trivia option to pick
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    answer: u8,
    /// Leaderboard file (default: log only)
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Tuning JSON
    #[arg(long, env = Tuning::ENV_VAR)]
    tuning: Option<PathBuf>,
    /// Write the final frame snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Pace frames at the tick rate
    #[arg(long)]
    realtime: bool,
    /// Don't steer when no board is connected
    #[arg(long)]
    no_autopilot: bool,
}

impl Options {
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Zero-based trivia option
    fn answer_index(&self) -> usize {
        usize::from(self.answer - 1)
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::FirewallStarted => log::info!("!! FIRE WALL !!"),
        GameEvent::GameOver { score } => log::info!("GAME OVER - final score {}", score),
        GameEvent::MusicStopped | GameEvent::DeathSound => log::debug!("Audio cue: {:?}", event),
        other => log::debug!("{:?}", other),
    }
}

fn main() {
    env_logger::init();

    let opts = Options::parse();
    let seed = opts.seed();
    log::info!("Neon Runner (headless) starting, seed {}", seed);

    let tuning = Tuning::load(opts.tuning.as_deref());
    let frame = Duration::from_secs_f64(tuning.frame_secs());

    let (input, has_board) = match board::connect(&tuning) {
        Some(tilt) => (InputAggregator::with_tilt(tilt), true),
        None => (InputAggregator::keys_only(), false),
    };

    let store: Box<dyn ScoreStore> = match &opts.scores {
        Some(path) => Box::new(LeaderboardStore::new(path)),
        None => Box::new(LogStore),
    };

    let mut session = Session::new(
        seed,
        tuning,
        Box::new(FixedChoice(opts.answer_index())),
        Box::new(FixedName(opts.name.clone())),
        store,
    )
    .with_input(input);
    session.set_idle_mode(!opts.no_autopilot && !has_board);

    let mut lives_left = opts.lives;
    for _ in 0..opts.frames {
        let started = Instant::now();

        for event in session.frame(KeyState::default()) {
            log_event(event);
        }

        if session.phase() == GamePhase::GameOver {
            lives_left -= 1;
            if lives_left == 0 {
                break;
            }
            session.restart();
        }

        if opts.realtime {
            let elapsed = started.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
        }
    }

    let state = session.state();
    log::info!(
        "Stopped after tick {} in {:?} with score {}",
        state.time_ticks,
        state.phase,
        state.display_score()
    );

    if let Some(path) = &opts.snapshot {
        let written = serde_json::to_string_pretty(&Snapshot::capture(state))
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => log::info!("Snapshot written to {}", path.display()),
            Err(e) => log::error!("Could not write snapshot {}: {}", path.display(), e),
        }
    }

    session.shutdown();
}
