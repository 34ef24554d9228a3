//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON file. Missing fields
//! fall back to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing / field ===
    pub fps: u32,
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_speed: f32,

    // === Spawning ===
    pub obstacle_base_speed: f32,
    pub obstacle_ramp_step: f32,
    pub obstacle_ramp_ticks: u64,
    pub powerup_speed: f32,
    pub obstacle_spawn_chance: f64,
    pub powerup_spawn_chance: f64,
    pub trivia_bonus: f64,

    // === Combo ===
    pub combo_step: f64,
    pub combo_max: f64,
    pub combo_window_secs: f64,
    pub graze_margin: f32,

    // === Firewall ===
    pub firewall_score_threshold: f64,
    pub firewall_trigger_chance: f64,
    pub firewall_warning_ticks: u32,
    pub firewall_walls: u32,
    pub firewall_gap_width: f32,
    pub firewall_max_step: f32,
    pub firewall_speed: f32,

    // === Balance board ===
    pub tilt_threshold: i32,
    pub presence_threshold: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_speed: PLAYER_SPEED,

            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            obstacle_ramp_step: OBSTACLE_RAMP_STEP,
            obstacle_ramp_ticks: OBSTACLE_RAMP_TICKS,
            powerup_speed: POWERUP_SPEED,
            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            powerup_spawn_chance: POWERUP_SPAWN_CHANCE,
            trivia_bonus: TRIVIA_BONUS,

            combo_step: COMBO_STEP,
            combo_max: COMBO_MAX,
            combo_window_secs: COMBO_WINDOW_SECS,
            graze_margin: GRAZE_MARGIN,

            firewall_score_threshold: FIREWALL_SCORE_THRESHOLD,
            firewall_trigger_chance: FIREWALL_TRIGGER_CHANCE,
            firewall_warning_ticks: FIREWALL_WARNING_TICKS,
            firewall_walls: FIREWALL_WALLS,
            firewall_gap_width: FIREWALL_GAP_WIDTH,
            firewall_max_step: FIREWALL_MAX_STEP,
            firewall_speed: FIREWALL_SPEED,

            tilt_threshold: TILT_THRESHOLD,
            presence_threshold: PRESENCE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Environment variable naming a tuning file
    pub const ENV_VAR: &'static str = "NEON_TUNING";

    /// Seconds per frame
    pub fn frame_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Combo decay window in frames
    pub fn combo_window_frames(&self) -> u32 {
        (self.fps as f64 * self.combo_window_secs).round() as u32
    }

    /// Parse tuning from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file
    pub fn from_file(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from `path`, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let chances = [
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
            ("firewall_trigger_chance", self.firewall_trigger_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("{} is not a probability", value),
                });
            }
        }

        if self.fps == 0 {
            return Err(TuningError::Invalid {
                field: "fps",
                reason: "must be positive".to_string(),
            });
        }
        if self.obstacle_ramp_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "obstacle_ramp_ticks",
                reason: "must be positive".to_string(),
            });
        }

        // Entities must keep falling or the field never drains
        let speeds = [
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("powerup_speed", self.powerup_speed),
            ("firewall_speed", self.firewall_speed),
            ("firewall_max_step", self.firewall_max_step),
        ];
        for (field, value) in speeds {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("{} must be positive", value),
                });
            }
        }
        if self.obstacle_ramp_step.is_nan() || self.obstacle_ramp_step < 0.0 {
            return Err(TuningError::Invalid {
                field: "obstacle_ramp_step",
                reason: format!("{} must not be negative", self.obstacle_ramp_step),
            });
        }

        if self.combo_step.is_nan() || self.combo_step <= 0.0 {
            return Err(TuningError::Invalid {
                field: "combo_step",
                reason: format!("{} must be positive", self.combo_step),
            });
        }
        if self.combo_max < COMBO_MIN {
            return Err(TuningError::Invalid {
                field: "combo_max",
                reason: format!("must be at least {}", COMBO_MIN),
            });
        }

        // The gap must fit between the edge margins
        let usable = self.field_width - 2.0 * FIREWALL_EDGE_MARGIN;
        if self.firewall_gap_width <= 0.0 || self.firewall_gap_width > usable {
            return Err(TuningError::Invalid {
                field: "firewall_gap_width",
                reason: format!("must be in (0, {}]", usable),
            });
        }

        Ok(())
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 7.5, "fps": 30 }"#).unwrap();
        assert_eq!(tuning.player_speed, 7.5);
        assert_eq!(tuning.fps, 30);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.combo_window_frames(), 45);
    }

    #[test]
    fn test_default_window_is_ninety_frames() {
        assert_eq!(Tuning::default().combo_window_frames(), 90);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "obstacle_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacle_spawn_chance",
                ..
            }
        ));
    }

    fn rejected_field(json: &str) -> Option<&'static str> {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_values_that_stall_the_field() {
        assert_eq!(
            rejected_field(r#"{ "combo_step": -0.05 }"#),
            Some("combo_step")
        );
        assert_eq!(rejected_field(r#"{ "combo_step": 0.0 }"#), Some("combo_step"));
        assert_eq!(
            rejected_field(r#"{ "firewall_max_step": -10.0 }"#),
            Some("firewall_max_step")
        );
        assert_eq!(
            rejected_field(r#"{ "firewall_speed": 0.0 }"#),
            Some("firewall_speed")
        );
        assert_eq!(
            rejected_field(r#"{ "obstacle_base_speed": -3.0 }"#),
            Some("obstacle_base_speed")
        );
        assert_eq!(
            rejected_field(r#"{ "powerup_speed": 0.0 }"#),
            Some("powerup_speed")
        );
        assert_eq!(
            rejected_field(r#"{ "obstacle_ramp_step": -0.5 }"#),
            Some("obstacle_ramp_step")
        );
        // A flat ramp is allowed
        assert!(Tuning::from_json(r#"{ "obstacle_ramp_step": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_load_rejected_file_falls_back() {
        let path = std::env::temp_dir().join("neon_runner_stalled_tuning.json");
        std::fs::write(&path, r#"{ "firewall_speed": 0.0 }"#).unwrap();
        assert_eq!(Tuning::load(Some(&path)), Tuning::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("neon_runner_missing_tuning.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Tuning::load(Some(&path)), Tuning::default());
        assert_eq!(Tuning::load(None), Tuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.firewall_walls = 3;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
