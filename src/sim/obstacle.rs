//! Falling hazards
//!
//! Every obstacle falls straight down at a constant speed fixed at spawn time.
//! Normal obstacles get faster as the run goes on; firewall segments always
//! fall at the firewall speed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::noise::NoiseField;
use super::particle::{self, Particle};
use super::rect::Rect;
use crate::consts::*;
use crate::palette::{Color, GOLD, ORANGE, RED};
use crate::tuning::Tuning;

/// Obstacle variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleVariant {
    Asteroid,
    Drone,
    Scout,
    FirewallSegment,
}

impl ObstacleVariant {
    /// Variants the random spawner picks from
    pub const SPAWNABLE: [ObstacleVariant; 3] = [
        ObstacleVariant::Asteroid,
        ObstacleVariant::Drone,
        ObstacleVariant::Scout,
    ];
}

/// Variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rotating rock; polygon is relative to the obstacle center
    Asteroid { points: Vec<Vec2> },
    /// Animated pincer drone (drawn from `anim_timer`)
    Drone,
    /// Fast dart leaving an exhaust trail
    Scout { trail: Vec<Particle> },
    /// One half of a firewall row
    FirewallSegment { fire: Vec<Particle>, noise: NoiseField },
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick (downward)
    pub speed: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    pub anim_timer: u32,
}

/// Base speed plus one ramp step per `obstacle_ramp_ticks` elapsed
pub fn ramped_speed(tuning: &Tuning, time_ticks: u64) -> f32 {
    let steps = time_ticks / tuning.obstacle_ramp_ticks;
    tuning.obstacle_base_speed + tuning.obstacle_ramp_step * steps as f32
}

impl Obstacle {
    /// Spawn a regular obstacle just above the top edge at a random column.
    /// Firewall segments are only placed by the firewall event, so asking for
    /// one here gives `None`.
    pub fn spawn<R: Rng>(
        id: u32,
        variant: ObstacleVariant,
        rng: &mut R,
        tuning: &Tuning,
        time_ticks: u64,
    ) -> Option<Self> {
        if variant == ObstacleVariant::FirewallSegment {
            return None;
        }

        let size = rng.random_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE) as f32;
        let rotation = rng.random_range(0..=360) as f32;
        let rotation_speed = rng.random_range(-2.0..2.0);
        let anim_timer = rng.random_range(0..=120);

        let (kind, width, height) = match variant {
            ObstacleVariant::Asteroid => (
                ObstacleKind::Asteroid {
                    points: asteroid_points(rng, size),
                },
                size,
                size,
            ),
            ObstacleVariant::Drone => (ObstacleKind::Drone, 45.0, 35.0),
            ObstacleVariant::Scout => (ObstacleKind::Scout { trail: Vec::new() }, 25.0, 35.0),
            ObstacleVariant::FirewallSegment => return None,
        };

        let max_x = (tuning.field_width - width).max(0.0) as i32;
        let x = rng.random_range(0..=max_x) as f32;

        Some(Self {
            id,
            kind,
            pos: Vec2::new(x, -height),
            size,
            width,
            height,
            speed: ramped_speed(tuning, time_ticks),
            rotation,
            rotation_speed,
            anim_timer,
        })
    }

    /// A firewall wall segment at a fixed place
    pub fn firewall_segment<R: Rng>(
        id: u32,
        x: f32,
        y: f32,
        width: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Self {
        Self {
            id,
            kind: ObstacleKind::FirewallSegment {
                fire: Vec::new(),
                noise: NoiseField::new(rng.random_range(0..=10_000), 2.0),
            },
            pos: Vec2::new(x, y),
            size: width,
            width,
            height: FIREWALL_WALL_HEIGHT,
            speed: tuning.firewall_speed,
            rotation: 0.0,
            rotation_speed: 0.0,
            anim_timer: 0,
        }
    }

    pub fn variant(&self) -> ObstacleVariant {
        match self.kind {
            ObstacleKind::Asteroid { .. } => ObstacleVariant::Asteroid,
            ObstacleKind::Drone => ObstacleVariant::Drone,
            ObstacleKind::Scout { .. } => ObstacleVariant::Scout,
            ObstacleKind::FirewallSegment { .. } => ObstacleVariant::FirewallSegment,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// True once the top edge is below the bottom of the field
    pub fn is_off_field(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }

    /// Particles owned by this obstacle (trail or flames)
    pub fn particles(&self) -> &[Particle] {
        match &self.kind {
            ObstacleKind::Scout { trail } => trail,
            ObstacleKind::FirewallSegment { fire, .. } => fire,
            _ => &[],
        }
    }

    /// Drone pincer spread in pixels
    pub fn pincer_spread(&self) -> f32 {
        20.0 + (self.anim_timer as f32 * 0.05).sin() * 8.0
    }

    /// Drone eye radius
    pub fn eye_radius(&self) -> f32 {
        4.0 + (self.anim_timer as f32 * 0.1).sin() * 2.0
    }

    /// Advance one tick. `elapsed_secs` drives the flame noise in time.
    pub fn update<R: Rng>(&mut self, rng: &mut R, elapsed_secs: f32) {
        self.pos.y += self.speed;
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(360.0);
        self.anim_timer = self.anim_timer.wrapping_add(1);

        let (x, y, width) = (self.pos.x, self.pos.y, self.width);
        match &mut self.kind {
            ObstacleKind::Scout { trail } => {
                trail.push(Particle::new(
                    Vec2::new(x + width / 2.0, y),
                    ORANGE,
                    2.0,
                    15,
                    -std::f32::consts::FRAC_PI_2,
                    2.0,
                ));
                particle::update_all(trail);
            }
            ObstacleKind::FirewallSegment { fire, noise } => {
                const FLAME_COLORS: [Color; 3] = [RED, ORANGE, GOLD];
                for _ in 0..3 {
                    let px = x + rng.random_range(0.0..=width.max(0.0));
                    let n = noise.sample(px * 0.05, elapsed_secs);
                    let life = 10 + (n * 15.0).abs() as i32;
                    let speed = 1.0 + (n * 3.0).abs();
                    let size = 2.0 + (n * 4.0).abs();
                    let color = FLAME_COLORS[rng.random_range(0..FLAME_COLORS.len())];
                    fire.push(Particle::new(
                        Vec2::new(px, y),
                        color,
                        size,
                        life,
                        std::f32::consts::FRAC_PI_2,
                        speed,
                    ));
                }
                particle::update_all(fire);
            }
            ObstacleKind::Asteroid { .. } | ObstacleKind::Drone => {}
        }
    }
}

/// Irregular polygon: 7-12 vertices at 80-120% of the base radius
fn asteroid_points<R: Rng>(rng: &mut R, size: f32) -> Vec<Vec2> {
    let count = rng.random_range(7..=12);
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
            let dist = size / 2.0 * rng.random_range(0.8..1.2);
            Vec2::new(dist * angle.cos(), dist * angle.sin())
        })
        .collect()
}
