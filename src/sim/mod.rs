//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - The seeded RNG held in [`GameState`] only
//! - Stable iteration order (entity lists are never reordered)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod combo;
pub mod firewall;
pub mod noise;
pub mod obstacle;
pub mod particle;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve};
pub use combo::Combo;
pub use firewall::{FirewallEvent, generate_gaps};
pub use noise::NoiseField;
pub use obstacle::{Obstacle, ObstacleKind, ObstacleVariant, ramped_speed};
pub use particle::{Particle, spawn_explosion};
pub use player::Player;
pub use powerup::Powerup;
pub use rect::Rect;
pub use state::{EntityIds, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
