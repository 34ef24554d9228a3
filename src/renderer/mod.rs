//! Renderer-facing frame description
//!
//! The simulation never draws. Each frame the host captures a [`Snapshot`]
//! of the state: flat polygons, particles and HUD text in field coordinates,
//! ready for any backend (or for serializing to JSON).

pub mod shapes;
pub mod snapshot;

pub use shapes::{Circle, Line, Polygon};
pub use snapshot::{
    GameOverOverlay, Hud, HudText, ObstacleView, ParticleView, PlayerView, PowerupView, Snapshot,
};
