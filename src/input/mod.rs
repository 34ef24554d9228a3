//! Input aggregation
//!
//! Two sources feed the player each frame:
//! - Digital keys, sampled by the host on the frame thread
//! - A balance board, read on a background thread and published through a
//!   single-slot [`TiltChannel`]
//!
//! Held keys win over the board; the board is only consulted when no key is
//! down.

pub mod board;

use std::sync::Arc;
use std::sync::atomic::{AtomicI8, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{BoardWeights, SensorEvent, SensorSource, spawn_reader};

/// One frame's horizontal command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    /// No movement
    #[default]
    Neutral,
}

impl Direction {
    /// -1 = left, 0 = neutral, 1 = right
    pub fn as_axis(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Neutral => 0,
            Direction::Right => 1,
        }
    }

    /// Inverse of [`Direction::as_axis`]; any other value is neutral
    pub fn from_axis(axis: i8) -> Self {
        match axis {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::Neutral,
        }
    }
}

/// Errors from the analog input device
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no balance board found")]
    DeviceNotFound,
    #[error("input device I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input device stream ended")]
    Disconnected,
}

/// Latest-value-wins slot shared between the board reader and the frame loop
#[derive(Debug, Clone, Default)]
pub struct TiltChannel {
    slot: Arc<AtomicI8>,
}

impl TiltChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot (reader side)
    pub fn publish(&self, direction: Direction) {
        self.slot.store(direction.as_axis(), Ordering::Release);
    }

    /// Read the most recent value (frame side)
    pub fn latest(&self) -> Direction {
        Direction::from_axis(self.slot.load(Ordering::Acquire))
    }
}

/// Digital key state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

/// Merges key state with the optional board tilt
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    tilt: Option<TiltChannel>,
}

impl InputAggregator {
    /// Key-only input
    pub fn keys_only() -> Self {
        Self { tilt: None }
    }

    pub fn with_tilt(tilt: TiltChannel) -> Self {
        Self { tilt: Some(tilt) }
    }

    /// Resolve this frame's direction. Keys override the board; both keys
    /// held cancel out.
    pub fn resolve(&self, keys: KeyState) -> Direction {
        match (keys.left, keys.right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            (true, true) => Direction::Neutral,
            (false, false) => self
                .tilt
                .as_ref()
                .map(TiltChannel::latest)
                .unwrap_or_default(),
        }
    }
}
