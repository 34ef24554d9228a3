//! Whole-run scenarios driven through the public API

use glam::Vec2;

use neon_runner::sim::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleVariant, TickInput, tick,
};
use neon_runner::trivia::FixedChoice;
use neon_runner::tuning::Tuning;

fn quiet() -> Tuning {
    Tuning {
        obstacle_spawn_chance: 0.0,
        powerup_spawn_chance: 0.0,
        firewall_trigger_chance: 0.0,
        ..Tuning::default()
    }
}

#[test]
fn test_hit_on_frame_n_freezes_score() {
    let mut state = GameState::new(2024, quiet());
    let input = TickInput::default();
    let n = 120;

    for _ in 1..n {
        tick(&mut state, &input, &mut FixedChoice(0));
    }
    assert_eq!(state.phase, GamePhase::Playing);

    // A drone that lands on the ship during frame N
    let tuning = state.tuning.clone();
    let id = state.ids.next();
    let mut drone = Obstacle::spawn(id, ObstacleVariant::Drone, &mut state.rng, &tuning, 0).unwrap();
    drone.pos = Vec2::new(state.player.x - 10.0, state.player.y - drone.speed + 2.0);
    state.obstacles.push(drone);

    tick(&mut state, &input, &mut FixedChoice(0));
    assert_eq!(state.time_ticks, n);
    assert_eq!(state.phase, GamePhase::Dying);
    assert!(state.events.contains(&GameEvent::PlayerHit));
    let expected = n as f64 / 60.0;
    assert!((state.score - expected).abs() < 1e-9);

    let frozen = state.score;
    for _ in 0..30 {
        tick(&mut state, &input, &mut FixedChoice(0));
        assert_eq!(state.score, frozen);
        assert_eq!(state.time_ticks, n);
    }
}

/// First tick on which a firewall event starts, for a run with no obstacles
fn firewall_trigger_tick(seed: u64) -> Option<u64> {
    let tuning = Tuning {
        obstacle_spawn_chance: 0.0,
        firewall_score_threshold: 0.0,
        ..Tuning::default()
    };
    let mut state = GameState::new(seed, tuning);
    let input = TickInput::default();
    for _ in 0..30_000 {
        tick(&mut state, &input, &mut FixedChoice(0));
        if state.events.contains(&GameEvent::FirewallStarted) {
            return Some(state.time_ticks);
        }
    }
    None
}

#[test]
fn test_firewall_trigger_tick_is_reproducible() {
    let first = firewall_trigger_tick(77);
    assert!(first.is_some());
    assert_eq!(first, firewall_trigger_tick(77));
}

#[test]
fn test_score_increments_exactly() {
    let mut state = GameState::new(5150, Tuning::default());
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let frame = state.tuning.frame_secs();
    let bonus = state.tuning.trivia_bonus;

    for _ in 0..5_000 {
        if state.phase != GamePhase::Playing {
            break;
        }
        let before = state.score;
        let multiplier = state.combo.multiplier;
        tick(&mut state, &input, &mut FixedChoice(0));

        let bonuses = state
            .events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::PowerupCollected {
                        answered_correctly: true,
                        ..
                    }
                )
            })
            .count() as f64;
        let expected = before + frame * multiplier + bonus * bonuses;
        assert!(state.score >= before);
        assert!((state.score - expected).abs() < 1e-6);
        assert!((1.0..=5.0).contains(&state.combo.multiplier));
    }
}

#[test]
fn test_firewall_freezes_combo() {
    let tuning = Tuning {
        obstacle_spawn_chance: 0.0,
        powerup_spawn_chance: 0.0,
        firewall_trigger_chance: 1.0,
        firewall_score_threshold: 0.0,
        ..Tuning::default()
    };
    let mut state = GameState::new(9, tuning);
    state.combo.multiplier = 3.0;
    state.combo.decay_timer = 0;

    // Autopilot threads the gaps
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    tick(&mut state, &input, &mut FixedChoice(0));
    assert!(state.firewall.is_active());

    let mut frames = 0;
    while state.firewall.is_active() && state.phase == GamePhase::Playing {
        assert_eq!(state.combo.multiplier, 3.0);
        tick(&mut state, &input, &mut FixedChoice(0));
        frames += 1;
        assert!(frames < 2_000, "firewall never ended");
    }

    // The event ran its course with the ship alive the whole way
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(!state.firewall.is_active());
    assert!(state.events.contains(&GameEvent::FirewallEnded));
}
