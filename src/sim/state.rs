//! Game state and core simulation types
//!
//! Everything owned by a single life lives here. The RNG stream is the only
//! thing that carries over between lives.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combo::Combo;
use super::firewall::FirewallEvent;
use super::obstacle::Obstacle;
use super::particle::Particle;
use super::player::Player;
use super::powerup::Powerup;
use crate::trivia::QuestionBank;
use crate::tuning::Tuning;

/// Current phase of a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Hit taken; explosion playing out, everything else frozen
    Dying,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick, for audio cues and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShieldAbsorbed { obstacle_id: u32 },
    PowerupCollected { powerup_id: u32, answered_correctly: bool },
    FirewallStarted,
    FirewallEnded,
    PlayerHit,
    MusicStopped,
    DeathSound,
    GameOver { score: u64 },
}

/// Monotonic entity id source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityIds(u32);

impl Default for EntityIds {
    fn default() -> Self {
        Self(1)
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Complete game state for one life
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The one RNG every random draw goes through
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Questions asked on powerup pickup
    pub questions: QuestionBank,
    /// Score (fractional; displayed and submitted floored)
    pub score: f64,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    /// Free particles (explosions)
    pub particles: Vec<Particle>,
    pub combo: Combo,
    pub firewall: FirewallEvent,
    /// One-shot flags for the death sequence
    pub explosion_created: bool,
    pub death_sound_played: bool,
    pub score_submitted: bool,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub ids: EntityIds,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.field_width, tuning.field_height, tuning.player_speed);
        let combo = Combo::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            questions: QuestionBank::default(),
            score: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            obstacles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            combo,
            firewall: FirewallEvent::default(),
            explosion_created: false,
            death_sound_played: false,
            score_submitted: false,
            events: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    /// Reinitialize every per-life field, keeping the RNG stream and tuning
    pub fn reset_life(&mut self) {
        let tuning = &self.tuning;
        self.player = Player::new(tuning.field_width, tuning.field_height, tuning.player_speed);
        self.combo = Combo::new(tuning);
        self.score = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.obstacles.clear();
        self.powerups.clear();
        self.particles.clear();
        self.firewall = FirewallEvent::default();
        self.explosion_created = false;
        self.death_sound_played = false;
        self.score_submitted = false;
        self.events.clear();
    }

    /// Score as shown and submitted
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Elapsed Playing time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 / self.tuning.fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        let mut ids = EntityIds::default();
        let a = ids.next();
        let b = ids.next();
        assert_ne!(a, b);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_reset_life_clears_per_life_state() {
        let mut state = GameState::new(5, Tuning::default());
        state.score = 123.4;
        state.time_ticks = 999;
        state.phase = GamePhase::GameOver;
        state.player.has_shield = true;
        state.player.x = 10.0;
        state.combo.graze();
        state.firewall.active = true;
        state.explosion_created = true;
        state.death_sound_played = true;
        state.score_submitted = true;

        state.reset_life();

        assert_eq!(state.score, 0.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.player.has_shield);
        assert_eq!(state.player.x, state.tuning.field_width / 2.0);
        assert_eq!(state.combo.multiplier, 1.0);
        assert!(!state.firewall.is_active());
        assert!(!state.explosion_created && !state.death_sound_played && !state.score_submitted);
    }

    #[test]
    fn test_display_score_floors() {
        let mut state = GameState::new(1, Tuning::default());
        state.score = 41.99;
        assert_eq!(state.display_score(), 41);
    }
}
