//! Graze combo multiplier
//!
//! Grazing raises the multiplier one step per frame and refills the decay
//! window. Once the window runs dry the multiplier bleeds back toward 1.0
//! one step per frame.

use serde::{Deserialize, Serialize};

use crate::consts::COMBO_MIN;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    /// Always within [`COMBO_MIN`, `max`]
    pub multiplier: f64,
    /// Frames left before decay starts
    pub decay_timer: u32,
    step: f64,
    max: f64,
    window: u32,
}

impl Combo {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            multiplier: COMBO_MIN,
            decay_timer: 0,
            step: tuning.combo_step,
            max: tuning.combo_max,
            window: tuning.combo_window_frames(),
        }
    }

    /// Register a graze for this frame
    pub fn graze(&mut self) {
        self.multiplier = (self.multiplier + self.step).min(self.max);
        self.decay_timer = self.window;
    }

    /// Advance a frame without a graze
    pub fn idle(&mut self) {
        self.decay_timer = self.decay_timer.saturating_sub(1);
        if self.decay_timer == 0 {
            self.multiplier = (self.multiplier - self.step).max(COMBO_MIN);
        }
    }

    /// Close out a frame
    pub fn end_frame(&mut self, grazed: bool) {
        if grazed {
            self.graze();
        } else {
            self.idle();
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.multiplier >= self.max
    }
}
