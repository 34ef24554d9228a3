//! Shape generation for 2D primitives
//!
//! All outputs are in field coordinates (origin top-left, +y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::palette::{Color, NEON_BLUE, NEON_GREEN, NEON_PINK, PURPLE, RED, WHITE};
use crate::rotate_deg;

const SHIP_BODY: Color = [80, 80, 255];
const SHIP_ENGINE: Color = [40, 40, 40];
const ASTEROID_FILL: Color = [50, 50, 60];
const ASTEROID_EDGE: Color = [180, 180, 220];
const DRONE_FILL: Color = [80, 0, 0];
const WALL_FILL: Color = [40, 0, 0];

/// A filled polygon with an optional outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Vec2>,
    pub fill: Color,
    pub outline: Option<Color>,
}

impl Polygon {
    pub fn filled(points: Vec<Vec2>, fill: Color) -> Self {
        Self {
            points,
            fill,
            outline: None,
        }
    }

    pub fn outlined(points: Vec<Vec2>, fill: Color, outline: Color) -> Self {
        Self {
            points,
            fill,
            outline: Some(outline),
        }
    }
}

/// A straight stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

/// A filled disc. `alpha` is 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: u8,
}

impl Circle {
    pub fn opaque(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            alpha: 255,
        }
    }
}

/// Offsets rotated by `degrees` and moved to `center`
fn place(center: Vec2, degrees: f32, offsets: &[(f32, f32)]) -> Vec<Vec2> {
    offsets
        .iter()
        .map(|&(x, y)| center + rotate_deg(Vec2::new(x, y), degrees))
        .collect()
}

/// Axis-aligned rectangle as a four-point polygon outline
pub fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ]
}

/// Ship parts, back to front. A positive tilt banks the nose to the left.
pub fn ship(center: Vec2, tilt_deg: f32) -> Vec<Polygon> {
    let angle = -tilt_deg;
    vec![
        Polygon::filled(
            place(center, angle, &[(-8.0, 12.0), (8.0, 12.0), (6.0, 18.0), (-6.0, 18.0)]),
            SHIP_ENGINE,
        ),
        Polygon::filled(
            place(center, angle, &[(-13.0, 13.0), (-22.0, 10.0), (-10.0, 2.0)]),
            NEON_BLUE,
        ),
        Polygon::filled(
            place(center, angle, &[(13.0, 13.0), (22.0, 10.0), (10.0, 2.0)]),
            NEON_BLUE,
        ),
        Polygon::filled(
            place(center, angle, &[(0.0, -18.0), (-15.0, 15.0), (15.0, 15.0)]),
            SHIP_BODY,
        ),
        // Cockpit
        Polygon::filled(
            place(center, angle, &[(0.0, -12.0), (-3.0, -2.0), (3.0, -2.0)]),
            WHITE,
        ),
    ]
}

/// Asteroid outline rotated about its center
pub fn asteroid(center: Vec2, points: &[Vec2], rotation_deg: f32) -> Polygon {
    let outline = points
        .iter()
        .map(|&p| center + rotate_deg(p, rotation_deg))
        .collect();
    Polygon::outlined(outline, ASTEROID_FILL, ASTEROID_EDGE)
}

/// Drone hull: a triangle with its apex at the top-center
pub fn drone_hull(x: f32, y: f32, w: f32, h: f32) -> Polygon {
    Polygon::filled(
        vec![
            Vec2::new(x + w / 2.0, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ],
        DRONE_FILL,
    )
}

/// Drone pincers fanning out by `spread` pixels past the hull
pub fn drone_pincers(x: f32, y: f32, w: f32, h: f32, spread: f32) -> [Line; 2] {
    let apex = Vec2::new(x + w / 2.0, y);
    let tip_y = y + h / 1.5;
    let pincer = |to: Vec2| Line {
        from: apex,
        to,
        width: 4.0,
        color: RED,
    };
    [
        pincer(Vec2::new(x - spread, tip_y)),
        pincer(Vec2::new(x + w + spread, tip_y)),
    ]
}

/// Scout dart
pub fn scout(x: f32, y: f32, w: f32, h: f32) -> Polygon {
    Polygon::outlined(
        vec![
            Vec2::new(x + w / 2.0, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ],
        PURPLE,
        NEON_PINK,
    )
}

/// Firewall segment block
pub fn wall(x: f32, y: f32, w: f32, h: f32) -> Polygon {
    Polygon::filled(rect_points(x, y, w, h), WALL_FILL)
}

/// Powerup cross: two bars rotated about the center
pub fn powerup_cross(center: Vec2, size: f32, rotation_deg: f32) -> [Polygon; 2] {
    let half = size / 2.0;
    let bar = 2.0;
    [
        Polygon::filled(
            place(
                center,
                rotation_deg,
                &[(-half, -bar), (half, -bar), (half, bar), (-half, bar)],
            ),
            NEON_GREEN,
        ),
        Polygon::filled(
            place(
                center,
                rotation_deg,
                &[(-bar, -half), (bar, -half), (bar, half), (-bar, half)],
            ),
            NEON_GREEN,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_tilt_banks_nose() {
        let center = Vec2::new(100.0, 100.0);
        let level = ship(center, 0.0);
        let body = &level[3];
        assert_eq!(body.points[0], Vec2::new(100.0, 82.0));

        // Moving left tilts +20: the nose swings left
        let banked = ship(center, 20.0);
        assert!(banked[3].points[0].x < 100.0);
        let banked = ship(center, -20.0);
        assert!(banked[3].points[0].x > 100.0);
    }

    #[test]
    fn test_asteroid_rotation_keeps_radius() {
        let points = vec![Vec2::new(10.0, 0.0), Vec2::new(0.0, 12.0)];
        let center = Vec2::new(50.0, 50.0);
        let poly = asteroid(center, &points, 73.0);
        for (p, original) in poly.points.iter().zip(&points) {
            assert!(((*p - center).length() - original.length()).abs() < 1e-4);
        }
        assert_eq!(poly.outline, Some(ASTEROID_EDGE));
    }

    #[test]
    fn test_pincers_spread_outside_hull() {
        let [left, right] = drone_pincers(0.0, 0.0, 45.0, 35.0, 20.0);
        assert_eq!(left.from, Vec2::new(22.5, 0.0));
        assert_eq!(left.to.x, -20.0);
        assert_eq!(right.to.x, 65.0);
        assert_eq!(right.color, RED);
    }

    #[test]
    fn test_cross_bars_are_perpendicular() {
        let [h, v] = powerup_cross(Vec2::ZERO, 25.0, 0.0);
        assert_eq!(h.points[1], Vec2::new(12.5, -2.0));
        assert_eq!(v.points[2], Vec2::new(2.0, 12.5));
    }
}
