//! Game session: one player, many lives
//!
//! The session owns the game state and the collaborators around it (input,
//! prompts, score submission). The host calls [`Session::frame`] once per
//! fixed step and [`Session::restart`] when the player asks for another go.

use crate::highscores::{ScoreRecord, ScoreStore, ScoreSubmitter};
use crate::input::{InputAggregator, KeyState};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::trivia::TriviaPrompt;
use crate::tuning::Tuning;

/// Longest accepted player tag
pub const MAX_USERNAME_LEN: usize = 4;

/// Tag used when the prompt returns nothing usable
pub const FALLBACK_USERNAME: &str = "AAA";

/// Blocking player-tag entry
pub trait UsernamePrompt {
    fn prompt(&mut self) -> String;
}

impl<F: FnMut() -> String> UsernamePrompt for F {
    fn prompt(&mut self) -> String {
        self()
    }
}

/// Prompt that always answers with the same tag
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl UsernamePrompt for FixedName {
    fn prompt(&mut self) -> String {
        self.0.clone()
    }
}

/// Keep letters only, uppercase, at most four. Empty becomes "AAA".
pub fn sanitize_username(raw: &str) -> String {
    let name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(MAX_USERNAME_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if name.is_empty() {
        FALLBACK_USERNAME.to_string()
    } else {
        name
    }
}

/// Orchestrates lives, prompts and score submission
pub struct Session {
    state: GameState,
    username: String,
    input: InputAggregator,
    idle_mode: bool,
    trivia: Box<dyn TriviaPrompt>,
    names: Box<dyn UsernamePrompt>,
    submitter: ScoreSubmitter,
}

impl Session {
    /// Start a session with key-only input. Prompts for the player tag.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        trivia: Box<dyn TriviaPrompt>,
        mut names: Box<dyn UsernamePrompt>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let username = sanitize_username(&names.prompt());
        log::info!("Session started for {} (seed {})", username, seed);
        Self {
            state: GameState::new(seed, tuning),
            username,
            input: InputAggregator::keys_only(),
            idle_mode: false,
            trivia,
            names,
            submitter: ScoreSubmitter::spawn(store),
        }
    }

    /// Replace the input aggregator (e.g. to add a balance board)
    pub fn with_input(mut self, input: InputAggregator) -> Self {
        self.input = input;
        self
    }

    /// Let the autopilot steer
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Advance one frame with the given key state. Returns this frame's events.
    pub fn frame(&mut self, keys: KeyState) -> &[GameEvent] {
        let input = TickInput {
            direction: self.input.resolve(keys),
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input, self.trivia.as_mut());

        if self.state.phase == GamePhase::GameOver && !self.state.score_submitted {
            self.state.score_submitted = true;
            let record = ScoreRecord::now(&self.username, self.state.display_score());
            self.submitter.submit(record);
        }

        &self.state.events
    }

    /// Start a new life. Only honoured once the run is over; re-prompts for
    /// the player tag.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        self.username = sanitize_username(&self.names.prompt());
        self.state.reset_life();
        log::info!("Restarted for {}", self.username);
        true
    }

    /// Flush pending score submissions
    pub fn shutdown(&mut self) {
        self.submitter.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::trivia::FixedChoice;

    #[test]
    fn test_sanitize_username() {
        assert_eq!(sanitize_username("abc"), "ABC");
        assert_eq!(sanitize_username("a1b2c3d4e5"), "ABCD");
        assert_eq!(sanitize_username("  zed "), "ZED");
        assert_eq!(sanitize_username(""), "AAA");
        assert_eq!(sanitize_username("1234"), "AAA");
    }

    fn session(store: MemoryStore) -> Session {
        let mut calls = 0;
        let names = move || {
            calls += 1;
            format!("p{}", "x".repeat(calls))
        };
        Session::new(
            5,
            Tuning::default(),
            Box::new(FixedChoice(0)),
            Box::new(names),
            Box::new(store),
        )
    }

    #[test]
    fn test_restart_only_in_game_over() {
        let mut session = session(MemoryStore::new());
        assert_eq!(session.username(), "PX");
        assert!(!session.restart());
        assert_eq!(session.username(), "PX");
    }

    #[test]
    fn test_submits_once_then_restarts() {
        let store = MemoryStore::new();
        let mut session = session(store.clone());
        session.state.phase = GamePhase::Dying;
        session.state.explosion_created = true;
        session.state.death_sound_played = true;
        session.state.score = 42.9;

        // Explosion already burnt out, so the run ends on this frame
        session.frame(KeyState::default());
        assert_eq!(session.phase(), GamePhase::GameOver);
        for _ in 0..10 {
            session.frame(KeyState::default());
        }

        assert!(session.restart());
        assert_eq!(session.username(), "PXX");
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state().score, 0.0);
        assert!(!session.state().score_submitted);

        session.shutdown();
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "PX");
        assert_eq!(records[0].score, 42);
    }
}
