//! The player's ship

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::{self, Particle};
use super::rect::Rect;
use crate::consts::*;
use crate::input::Direction;
use crate::palette::{GOLD, NEON_BLUE};

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal center
    pub x: f32,
    /// Top of the hitbox (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Current bank angle in degrees
    pub tilt: f32,
    /// Bank angle being eased toward; re-asserted by `move_in` every frame
    pub target_tilt: f32,
    /// Absorbs the next direct hit
    pub has_shield: bool,
    /// Exhaust particles
    pub trail: Vec<Particle>,
    /// Horizontal bound (field width)
    field_width: f32,
}

impl Player {
    pub fn new(field_width: f32, field_height: f32, speed: f32) -> Self {
        Self {
            x: field_width / 2.0,
            y: field_height - PLAYER_BOTTOM_OFFSET,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed,
            tilt: 0.0,
            target_tilt: 0.0,
            has_shield: false,
            trail: Vec::new(),
            field_width,
        }
    }

    /// Collision box (x is the center, y the top)
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x - self.width / 2.0, self.y, self.width, self.height)
    }

    /// Shift one step in `direction` and bank the ship against the motion
    pub fn move_in(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.x -= self.speed;
                self.target_tilt = PLAYER_TILT_DEG;
            }
            Direction::Right => {
                self.x += self.speed;
                self.target_tilt = -PLAYER_TILT_DEG;
            }
            Direction::Neutral => {}
        }
        let half = self.width / 2.0;
        self.x = self.x.clamp(half, self.field_width - half);
    }

    /// Ease the tilt, emit exhaust and age the trail
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        self.tilt += (self.target_tilt - self.tilt) * TILT_EASING;
        if self.tilt.abs() < TILT_SNAP_DEG {
            self.tilt = 0.0;
        }
        self.target_tilt = 0.0;

        let color = if self.has_shield { GOLD } else { NEON_BLUE };
        let size = rng.random_range(2.0..4.0);
        let angle = std::f32::consts::FRAC_PI_2 + rng.random_range(-0.2..0.2);
        let speed = rng.random_range(2.0..4.0);
        self.trail.push(Particle::new(
            Vec2::new(self.x, self.y + 20.0),
            color,
            size,
            20,
            angle,
            speed,
        ));
        particle::update_all(&mut self.trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Player {
        Player::new(FIELD_WIDTH, FIELD_HEIGHT, PLAYER_SPEED)
    }

    #[test]
    fn test_starts_centered_near_bottom() {
        let p = player();
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 500.0);
        assert!(!p.has_shield);
    }

    #[test]
    fn test_move_sets_opposite_tilt() {
        let mut p = player();
        p.move_in(Direction::Left);
        assert_eq!(p.x, 395.0);
        assert_eq!(p.target_tilt, PLAYER_TILT_DEG);
        p.move_in(Direction::Right);
        assert_eq!(p.x, 400.0);
        assert_eq!(p.target_tilt, -PLAYER_TILT_DEG);
    }

    #[test]
    fn test_clamped_to_field() {
        let mut p = player();
        for _ in 0..500 {
            p.move_in(Direction::Left);
        }
        assert_eq!(p.x, PLAYER_SIZE / 2.0);
        for _ in 0..500 {
            p.move_in(Direction::Right);
        }
        assert_eq!(p.x, FIELD_WIDTH - PLAYER_SIZE / 2.0);
    }

    #[test]
    fn test_tilt_eases_and_snaps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = player();
        p.move_in(Direction::Left);
        p.update(&mut rng);
        assert!((p.tilt - 2.0).abs() < 1e-4);
        assert_eq!(p.target_tilt, 0.0);

        // Without re-asserting the target the tilt decays back to zero
        for _ in 0..100 {
            p.update(&mut rng);
        }
        assert_eq!(p.tilt, 0.0);
    }

    #[test]
    fn test_trail_color_follows_shield() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = player();
        p.update(&mut rng);
        assert_eq!(p.trail.last().map(|t| t.color), Some(NEON_BLUE));
        p.has_shield = true;
        p.update(&mut rng);
        assert_eq!(p.trail.last().map(|t| t.color), Some(GOLD));
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = player();
        for _ in 0..200 {
            p.update(&mut rng);
        }
        // Life is 20 ticks, so at most 20 are alive
        assert!(p.trail.len() <= 20);
        assert!(!p.trail.is_empty());
    }
}
