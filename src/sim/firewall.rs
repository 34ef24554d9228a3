//! Firewall event: a scripted run of wall rows with a single gap each
//!
//! While active, normal spawning stops and the combo is frozen. Each row's gap
//! is a bounded random step away from the previous row's gap so the player can
//! always steer from one to the next.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleVariant};
use super::powerup::Powerup;
use super::state::EntityIds;
use crate::consts::*;
use crate::tuning::Tuning;

/// Firewall event controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallEvent {
    pub active: bool,
    /// Ticks left on the warning banner
    pub warning_ticks: u32,
    /// Id of the left segment of the final row
    pub last_wall: Option<u32>,
}

impl FirewallEvent {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_ticks > 0
    }

    /// Roll for a new event. Only rolls while idle and above the score threshold.
    pub fn should_trigger<R: Rng>(&self, score: f64, rng: &mut R, tuning: &Tuning) -> bool {
        !self.active
            && score >= tuning.firewall_score_threshold
            && rng.random_bool(tuning.firewall_trigger_chance)
    }

    /// Clear the field and lay out the wall rows
    pub fn start<R: Rng>(
        &mut self,
        obstacles: &mut Vec<Obstacle>,
        powerups: &mut Vec<Powerup>,
        ids: &mut EntityIds,
        rng: &mut R,
        tuning: &Tuning,
    ) {
        obstacles.clear();
        powerups.clear();

        let gaps = generate_gaps(rng, tuning);
        let mut last_wall = None;
        for (i, &gap_x) in gaps.iter().enumerate() {
            let y = FIREWALL_FIRST_WALL_Y - i as f32 * FIREWALL_WALL_SPACING;
            let right_x = gap_x + tuning.firewall_gap_width;

            let left = Obstacle::firewall_segment(ids.next(), 0.0, y, gap_x, rng, tuning);
            let right = Obstacle::firewall_segment(
                ids.next(),
                right_x,
                y,
                tuning.field_width - right_x,
                rng,
                tuning,
            );
            last_wall = Some(left.id);
            obstacles.push(left);
            obstacles.push(right);
        }

        self.active = true;
        self.warning_ticks = tuning.firewall_warning_ticks;
        self.last_wall = last_wall;
        log::info!("Firewall event started ({} rows)", gaps.len());
    }

    /// Count down the warning banner
    pub fn tick_warning(&mut self) {
        self.warning_ticks = self.warning_ticks.saturating_sub(1);
    }

    /// End the event once the final row has left the field. Returns true on the
    /// tick the event ends.
    pub fn update(&mut self, obstacles: &[Obstacle], field_height: f32) -> bool {
        if !self.active {
            return false;
        }

        let tracked = self
            .last_wall
            .and_then(|id| obstacles.iter().find(|o| o.id == id));
        let finished = match tracked {
            Some(wall) => wall.is_off_field(field_height),
            // The final row was absorbed by a shield: wait for the remaining rows
            None => !obstacles
                .iter()
                .any(|o| o.variant() == ObstacleVariant::FirewallSegment),
        };

        if finished {
            self.active = false;
            self.last_wall = None;
            log::info!("Firewall event cleared");
        }
        finished
    }
}

/// Left edges of each row's gap, as a bounded walk from the field center
pub fn generate_gaps<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec<f32> {
    let min_bound = FIREWALL_EDGE_MARGIN;
    let max_bound = tuning.field_width - tuning.firewall_gap_width - FIREWALL_EDGE_MARGIN;

    let mut last = tuning.field_width / 2.0;
    (0..tuning.firewall_walls)
        .map(|_| {
            let lo = (last - tuning.firewall_max_step).max(min_bound);
            let hi = (last + tuning.firewall_max_step).min(max_bound);
            // `last` may start outside the bounds on narrow fields
            let gap = if lo <= hi {
                rng.random_range(lo..=hi)
            } else {
                max_bound.max(min_bound)
            };
            last = gap;
            gap
        })
        .collect()
}
