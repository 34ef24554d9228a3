//! Fixed timestep simulation tick
//!
//! Core game loop that advances one life deterministically.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision;
use super::obstacle::{Obstacle, ObstacleVariant};
use super::particle::{self, spawn_explosion};
use super::powerup::Powerup;
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::Direction;
use crate::trivia::TriviaPrompt;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Resolved horizontal command for this frame
    pub direction: Direction,
    /// Idle/demo mode - the autopilot steers instead
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, trivia: &mut dyn TriviaPrompt) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    if state.phase == GamePhase::Playing {
        let direction = if input.idle_mode {
            autopilot::steer(state)
        } else {
            input.direction
        };
        step_playing(state, direction, trivia);
    }

    if state.phase == GamePhase::Dying {
        begin_death(state);
    }

    particle::update_all(&mut state.particles);

    if state.phase == GamePhase::Dying && state.particles.is_empty() {
        state.phase = GamePhase::GameOver;
        let score = state.display_score();
        log::info!("Game over, final score {}", score);
        state.events.push(GameEvent::GameOver { score });
    }
}

fn step_playing(state: &mut GameState, direction: Direction, trivia: &mut dyn TriviaPrompt) {
    state.time_ticks += 1;

    state.player.target_tilt = 0.0;
    state.player.move_in(direction);
    state.player.update(&mut state.rng);

    if !state.firewall.is_active() {
        spawn(state);

        if state
            .firewall
            .should_trigger(state.score, &mut state.rng, &state.tuning)
        {
            state.firewall.start(
                &mut state.obstacles,
                &mut state.powerups,
                &mut state.ids,
                &mut state.rng,
                &state.tuning,
            );
            state.events.push(GameEvent::FirewallStarted);
        }
    }

    state.score += state.tuning.frame_secs() * state.combo.multiplier;

    let elapsed = state.elapsed_secs();
    let field_height = state.tuning.field_height;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(&mut state.rng, elapsed);
    }
    state.obstacles.retain(|o| !o.is_off_field(field_height));

    for powerup in state.powerups.iter_mut() {
        powerup.update();
    }
    state.powerups.retain(|p| !p.is_off_field(field_height));

    if state.firewall.update(&state.obstacles, field_height) {
        state.events.push(GameEvent::FirewallEnded);
    }
    state.firewall.tick_warning();

    collision::resolve(state, trivia);
}

/// Normal spawning; suspended while a firewall event runs
fn spawn(state: &mut GameState) {
    if state.rng.random_bool(state.tuning.obstacle_spawn_chance) {
        let variants = ObstacleVariant::SPAWNABLE;
        let variant = variants[state.rng.random_range(0..variants.len())];
        let id = state.ids.next();
        if let Some(obstacle) = Obstacle::spawn(
            id,
            variant,
            &mut state.rng,
            &state.tuning,
            state.time_ticks,
        ) {
            log::trace!("Spawned {:?} {} at x={:.0}", variant, id, obstacle.pos.x);
            state.obstacles.push(obstacle);
        }
    }

    if state.rng.random_bool(state.tuning.powerup_spawn_chance) {
        let id = state.ids.next();
        state
            .powerups
            .push(Powerup::spawn(id, &mut state.rng, &state.tuning));
        log::debug!("Spawned powerup {}", id);
    }
}

/// One-shot effects of the first Dying frame
fn begin_death(state: &mut GameState) {
    if !state.explosion_created {
        let center = Vec2::new(state.player.x, state.player.y + 15.0);
        spawn_explosion(&mut state.particles, &mut state.rng, center);
        state.explosion_created = true;
        state.events.push(GameEvent::MusicStopped);
    }
    if !state.death_sound_played {
        state.death_sound_played = true;
        state.events.push(GameEvent::DeathSound);
    }
}
