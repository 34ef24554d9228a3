//! Collision resolution between the player and everything falling at it
//!
//! Direct hits end the life unless a shield absorbs them. Near misses inside
//! the inflated graze box feed the combo, except during a firewall event.
//! Powerup pickups hand control to the trivia prompt.

use super::particle::spawn_explosion;
use super::state::{GameEvent, GamePhase, GameState};
use crate::trivia::TriviaPrompt;

/// What the collision pass found this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// An unshielded direct hit happened
    pub hit: bool,
    /// At least one obstacle was grazed
    pub grazed: bool,
    /// Obstacles destroyed by the shield
    pub absorbed: u32,
    /// Powerups collected
    pub collected: u32,
}

/// Resolve obstacle hits/grazes, update the combo, then collect powerups
pub fn resolve(state: &mut GameState, trivia: &mut dyn TriviaPrompt) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let player_box = state.player.hitbox();
    let graze_box = player_box.inflate(state.tuning.graze_margin);
    let firewall_active = state.firewall.is_active();

    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle_box = state.obstacles[i].hitbox();
        if player_box.overlaps(&obstacle_box) {
            if state.player.has_shield {
                state.player.has_shield = false;
                let absorbed = state.obstacles.remove(i);
                outcome.absorbed += 1;
                log::debug!("Shield absorbed obstacle {}", absorbed.id);
                state.events.push(GameEvent::ShieldAbsorbed {
                    obstacle_id: absorbed.id,
                });
                continue;
            }
            outcome.hit = true;
        } else if !firewall_active && graze_box.overlaps(&obstacle_box) {
            outcome.grazed = true;
        }
        i += 1;
    }

    if outcome.hit && state.phase == GamePhase::Playing {
        state.phase = GamePhase::Dying;
        state.events.push(GameEvent::PlayerHit);
        log::info!(
            "Player hit at tick {} (score {})",
            state.time_ticks,
            state.display_score()
        );
    }

    if !firewall_active {
        state.combo.end_frame(outcome.grazed);
    }

    // Collect pickups (deferred so the prompt runs outside the list borrow)
    let mut collected = Vec::new();
    state.powerups.retain(|powerup| {
        if player_box.overlaps(&powerup.hitbox()) {
            collected.push((powerup.id, powerup.center()));
            false
        } else {
            true
        }
    });

    for (powerup_id, center) in collected {
        outcome.collected += 1;
        spawn_explosion(&mut state.particles, &mut state.rng, center);

        let answered_correctly = match state.questions.pick(&mut state.rng) {
            Some(question) => trivia.ask(question),
            None => false,
        };
        if answered_correctly {
            state.score += state.tuning.trivia_bonus;
            state.player.has_shield = true;
        }
        log::info!(
            "Powerup {} collected, answered {}",
            powerup_id,
            if answered_correctly { "correctly" } else { "wrong" }
        );
        state.events.push(GameEvent::PowerupCollected {
            powerup_id,
            answered_correctly,
        });
    }

    outcome
}
