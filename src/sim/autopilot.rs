//! Idle/demo mode steering
//!
//! A simple greedy pilot: thread the firewall gap when one is coming, dodge
//! the nearest obstacle in the ship's lane, otherwise go after powerups.

use super::obstacle::ObstacleVariant;
use super::state::GameState;
use crate::input::Direction;

/// How far above the ship (in pixels) the pilot looks for threats
const LOOKAHEAD: f32 = 220.0;

/// Don't chase a target closer than this horizontally (avoids jitter)
const DEADBAND: f32 = 6.0;

/// Pick a direction for this frame
pub fn steer(state: &GameState) -> Direction {
    if state.firewall.is_active() {
        if let Some(gap_center) = next_gap_center(state) {
            return toward(state.player.x, gap_center);
        }
    }

    if let Some(direction) = dodge(state) {
        return direction;
    }

    // Safe: go grab the nearest powerup that is still above the ship
    let player_top = state.player.y;
    let target = state
        .powerups
        .iter()
        .filter(|p| p.pos.y + p.size < player_top)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.center().x);

    match target {
        Some(x) => toward(state.player.x, x),
        // Otherwise drift back to the middle of the field
        None => toward(state.player.x, state.tuning.field_width / 2.0),
    }
}

fn toward(current: f32, target: f32) -> Direction {
    let delta = target - current;
    if delta.abs() <= DEADBAND {
        Direction::Neutral
    } else if delta < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Center of the gap in the lowest firewall row still above the ship
fn next_gap_center(state: &GameState) -> Option<f32> {
    let player_top = state.player.y;
    state
        .obstacles
        .iter()
        .filter(|o| o.variant() == ObstacleVariant::FirewallSegment)
        // Left segments start at x = 0 and end at the gap
        .filter(|o| o.pos.x <= 0.0 && o.pos.y < player_top + state.player.height)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|left| left.width + state.tuning.firewall_gap_width / 2.0)
}

/// Move away from the closest obstacle bearing down on the ship's lane
fn dodge(state: &GameState) -> Option<Direction> {
    let player = &state.player;
    let lane = player.hitbox().inflate(state.tuning.graze_margin);

    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            let hb = o.hitbox();
            hb.right() > lane.left()
                && hb.left() < lane.right()
                && hb.bottom() > player.y - LOOKAHEAD
                && hb.top() < player.y + player.height
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let threat_center = threat.hitbox().center().x;
    let half = player.width / 2.0;
    let room_left = player.x - half;
    let room_right = state.tuning.field_width - half - player.x;

    let preferred = if threat_center >= player.x {
        Direction::Left
    } else {
        Direction::Right
    };
    // Cornered against a wall: commit to the other side
    let direction = match preferred {
        Direction::Left if room_left < player.speed => Direction::Right,
        Direction::Right if room_right < player.speed => Direction::Left,
        other => other,
    };
    Some(direction)
}
