//! Neon Runner - A lane-dodge arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, combo, firewall event)
//! - `input`: Key + balance board input aggregation
//! - `session`: Per-life orchestration, prompts and score submission
//! - `renderer`: Renderer-agnostic frame snapshots
//! - `highscores`: Score records and stores
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod trivia;
pub mod tuning;

pub use highscores::{HighScores, ScoreRecord, ScoreStore, ScoreSubmitter};
pub use input::{Direction, InputAggregator, KeyState, TiltChannel};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const FPS: u32 = 60;

    /// Playfield dimensions (design resolution)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SIZE: f32 = 35.0;
    /// Distance of the ship from the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    /// Visual bank angle while moving (degrees)
    pub const PLAYER_TILT_DEG: f32 = 20.0;
    /// Fraction of the remaining tilt covered per frame
    pub const TILT_EASING: f32 = 0.1;
    pub const TILT_SNAP_DEG: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_BASE_SPEED: f32 = 3.0;
    /// Speed added per ramp step
    pub const OBSTACLE_RAMP_STEP: f32 = 0.5;
    /// Ticks per ramp step
    pub const OBSTACLE_RAMP_TICKS: u64 = 1000;
    pub const OBSTACLE_MIN_SIZE: i32 = 35;
    pub const OBSTACLE_MAX_SIZE: i32 = 60;

    /// Powerup defaults
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_SIZE: f32 = 25.0;
    pub const POWERUP_MAX_GLOW: f32 = 10.0;
    pub const TRIVIA_BONUS: f64 = 50.0;

    /// Per-frame spawn chances
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 3.0 / 100.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 1.0 / 600.0;

    /// Combo defaults
    pub const COMBO_STEP: f64 = 0.05;
    pub const COMBO_MIN: f64 = 1.0;
    pub const COMBO_MAX: f64 = 5.0;
    /// Decay window in seconds (converted to frames with FPS)
    pub const COMBO_WINDOW_SECS: f64 = 1.5;
    /// Graze margin added on every side of the player hitbox
    pub const GRAZE_MARGIN: f32 = 30.0;

    /// Firewall event defaults
    pub const FIREWALL_SCORE_THRESHOLD: f64 = 200.0;
    pub const FIREWALL_TRIGGER_CHANCE: f64 = 1.0 / 1500.0;
    pub const FIREWALL_WARNING_TICKS: u32 = 90;
    pub const FIREWALL_WALLS: u32 = 5;
    pub const FIREWALL_GAP_WIDTH: f32 = 140.0;
    pub const FIREWALL_MAX_STEP: f32 = 200.0;
    /// Minimum distance between the gap and either field edge
    pub const FIREWALL_EDGE_MARGIN: f32 = 50.0;
    pub const FIREWALL_WALL_SPACING: f32 = 300.0;
    pub const FIREWALL_FIRST_WALL_Y: f32 = -100.0;
    pub const FIREWALL_WALL_HEIGHT: f32 = 25.0;
    pub const FIREWALL_SPEED: f32 = 4.0;

    /// Particle defaults
    pub const EXPLOSION_PARTICLES: usize = 60;
    pub const PARTICLE_SHRINK: f32 = 0.1;

    /// Balance board defaults (raw sensor units)
    pub const TILT_THRESHOLD: i32 = 2000;
    pub const PRESENCE_THRESHOLD: i32 = 1000;
}

/// Neon palette shared by the simulation (particle colors) and snapshots
pub mod palette {
    /// RGB color
    pub type Color = [u8; 3];

    pub const NEON_BLUE: Color = [0, 255, 255];
    pub const NEON_PINK: Color = [255, 0, 255];
    pub const NEON_GREEN: Color = [0, 255, 0];
    pub const BLACK: Color = [10, 10, 10];
    pub const WHITE: Color = [255, 255, 255];
    pub const ORANGE: Color = [255, 165, 0];
    pub const RED: Color = [255, 0, 0];
    pub const GOLD: Color = [255, 215, 0];
    pub const PURPLE: Color = [180, 0, 255];
}

/// Rotate a point around the origin by `degrees` (counter-clockwise in screen space)
#[inline]
pub fn rotate_deg(point: glam::Vec2, degrees: f32) -> glam::Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    glam::Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Unit vector for a heading in radians (screen space, +y down)
#[inline]
pub fn heading(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}
