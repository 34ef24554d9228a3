//! Shield pickups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{POWERUP_MAX_GLOW, POWERUP_SIZE};
use crate::tuning::Tuning;

/// A rotating, pulsing pickup that triggers a trivia question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Degrees
    pub rotation: f32,
    /// Extra glow radius, walks between 0 and [`POWERUP_MAX_GLOW`]
    pub glow_radius: f32,
    /// +1.0 or -1.0
    pub glow_direction: f32,
}

impl Powerup {
    /// Spawn just above the top edge at a random column
    pub fn spawn<R: Rng>(id: u32, rng: &mut R, tuning: &Tuning) -> Self {
        let max_x = (tuning.field_width - POWERUP_SIZE).max(0.0) as i32;
        let x = rng.random_range(0..=max_x) as f32;
        Self {
            id,
            pos: Vec2::new(x, -POWERUP_SIZE),
            size: POWERUP_SIZE,
            speed: tuning.powerup_speed,
            rotation: 0.0,
            glow_radius: 0.0,
            glow_direction: 1.0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.rotation = (self.rotation + 5.0) % 360.0;
        self.glow_radius = (self.glow_radius + self.glow_direction).clamp(0.0, POWERUP_MAX_GLOW);
        if self.glow_radius >= POWERUP_MAX_GLOW || self.glow_radius <= 0.0 {
            self.glow_direction = -self.glow_direction;
        }
    }

    /// True once the top edge is below the bottom of the field
    pub fn is_off_field(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_position() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        for id in 0..100 {
            let p = Powerup::spawn(id, &mut rng, &tuning);
            assert_eq!(p.pos.y, -POWERUP_SIZE);
            assert!(p.pos.x >= 0.0 && p.pos.x + p.size <= tuning.field_width);
        }
    }

    #[test]
    fn test_glow_reverses_at_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut p = Powerup::spawn(1, &mut rng, &tuning);
        for _ in 0..10 {
            p.update();
        }
        assert_eq!(p.glow_radius, 10.0);
        assert_eq!(p.glow_direction, -1.0);
        p.update();
        assert_eq!(p.glow_radius, 9.0);
    }

    #[test]
    fn test_falls_and_rotates() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut p = Powerup::spawn(1, &mut rng, &tuning);
        p.update();
        assert_eq!(p.pos.y, -POWERUP_SIZE + 3.0);
        assert_eq!(p.rotation, 5.0);
    }

    #[test]
    fn test_off_field_iff_top_edge_passed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut p = Powerup::spawn(1, &mut rng, &tuning);
        p.pos.y = tuning.field_height;
        assert!(!p.is_off_field(tuning.field_height));
        p.pos.y = tuning.field_height + 0.01;
        assert!(p.is_off_field(tuning.field_height));
    }

    proptest! {
        #[test]
        fn glow_stays_bounded(ticks in 0usize..2000) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(4);
            let mut p = Powerup::spawn(1, &mut rng, &tuning);
            for _ in 0..ticks {
                p.update();
                prop_assert!((0.0..=POWERUP_MAX_GLOW).contains(&p.glow_radius));
            }
        }
    }
}
