//! Seeded 2D gradient (Perlin) noise
//!
//! Used for flame flicker: neighbouring samples in space and time give
//! neighbouring values, unlike raw RNG draws.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Gradient directions (unit diagonals and axes)
const GRADIENTS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
    (-std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
    (std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
    (-std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
];

/// A seeded noise field; identical seeds give identical fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseField {
    pub seed: u64,
    /// Input coordinates are multiplied by this before sampling
    pub frequency: f32,
    perm: Vec<u8>,
}

impl NoiseField {
    pub fn new(seed: u64, frequency: f32) -> Self {
        let mut perm: Vec<u8> = (0..=255).collect();
        perm.shuffle(&mut Pcg32::seed_from_u64(seed));
        Self {
            seed,
            frequency,
            perm,
        }
    }

    #[inline]
    fn hash(&self, x: i32, y: i32) -> usize {
        let a = self.perm[(x & 255) as usize] as usize;
        self.perm[(a + (y & 255) as usize) & 255] as usize
    }

    #[inline]
    fn corner(&self, ix: i32, iy: i32, dx: f32, dy: f32) -> f32 {
        let (gx, gy) = GRADIENTS[self.hash(ix, iy) % GRADIENTS.len()];
        gx * dx + gy * dy
    }

    /// Sample the field. Output lies roughly in [-1, 1] and is 0 on lattice points.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x * self.frequency;
        let y = y * self.frequency;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let ix = x0 as i32;
        let iy = y0 as i32;

        let n00 = self.corner(ix, iy, fx, fy);
        let n10 = self.corner(ix + 1, iy, fx - 1.0, fy);
        let n01 = self.corner(ix, iy + 1, fx, fy - 1.0);
        let n11 = self.corner(ix + 1, iy + 1, fx - 1.0, fy - 1.0);

        let u = fade(fx);
        let v = fade(fy);
        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        lerp(nx0, nx1, v)
    }
}

/// Quintic smoothstep 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
