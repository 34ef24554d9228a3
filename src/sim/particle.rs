//! Decaying point particles
//!
//! Particles are pure values: they move along a fixed heading, shrink by a
//! constant amount per tick and die when either their life or size runs out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_PARTICLES, PARTICLE_SHRINK};
use crate::heading;
use crate::palette::{Color, NEON_BLUE, ORANGE, WHITE};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Heading in radians (screen space, +y down)
    pub angle: f32,
    /// Pixels per tick
    pub speed: f32,
    pub color: Color,
    pub size: f32,
    /// Remaining ticks
    pub life: i32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Color, size: f32, life: i32, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            angle,
            speed,
            color,
            size,
            life,
        }
    }

    /// Age by one tick
    pub fn update(&mut self) {
        self.life -= 1;
        self.size = (self.size - PARTICLE_SHRINK).max(0.0);
        self.pos += heading(self.angle) * self.speed;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0 && self.size > 0.0
    }
}

/// Advance every particle one tick and drop the dead ones
pub fn update_all(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(Particle::is_alive);
}

/// Append an explosion burst of exactly [`EXPLOSION_PARTICLES`] particles at `center`
pub fn spawn_explosion<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, center: Vec2) {
    const COLORS: [Color; 3] = [NEON_BLUE, ORANGE, WHITE];

    particles.reserve(EXPLOSION_PARTICLES);
    for _ in 0..EXPLOSION_PARTICLES {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..7.0);
        let size = rng.random_range(1.0..5.0);
        let life = rng.random_range(30..=60);
        let color = COLORS[rng.random_range(0..COLORS.len())];
        particles.push(Particle::new(center, color, size, life, angle, speed));
    }
}
