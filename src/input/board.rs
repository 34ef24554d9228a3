//! Balance board reader
//!
//! The board exposes four load cells as absolute axes on a Linux evdev node.
//! A background thread owns the four readings, derives a direction after each
//! update and publishes it into a [`TiltChannel`]. Because the readings never
//! leave the thread, the frame loop can't observe a half-updated set.

use std::thread::JoinHandle;

#[cfg(target_os = "linux")]
use std::collections::VecDeque;
#[cfg(target_os = "linux")]
use evdev::{AbsoluteAxisType, Device, EventType, InputEvent};

use super::{Direction, InputError, TiltChannel};
use crate::tuning::Tuning;

/// Name the kernel driver reports for the board
pub const BOARD_NAME: &str = "Nintendo Wii Remote Balance Board";

/// Load cell axis codes (`linux/input-event-codes.h`)
const ABS_HAT0X: u16 = 0x10;
const ABS_HAT0Y: u16 = 0x11;
const ABS_HAT1X: u16 = 0x12;
const ABS_HAT1Y: u16 = 0x13;

/// One of the four load cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Sensor {
    /// Map an absolute axis code to its load cell
    pub fn from_abs_code(code: u16) -> Option<Self> {
        match code {
            ABS_HAT0X => Some(Sensor::TopRight),
            ABS_HAT1X => Some(Sensor::TopLeft),
            ABS_HAT0Y => Some(Sensor::BottomRight),
            ABS_HAT1Y => Some(Sensor::BottomLeft),
            _ => None,
        }
    }
}

/// A single load cell update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorEvent {
    pub sensor: Sensor,
    pub value: i32,
}

/// Raw load cell readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardWeights {
    pub top_left: i32,
    pub top_right: i32,
    pub bottom_left: i32,
    pub bottom_right: i32,
}

impl BoardWeights {
    pub fn apply(&mut self, event: SensorEvent) {
        match event.sensor {
            Sensor::TopLeft => self.top_left = event.value,
            Sensor::TopRight => self.top_right = event.value,
            Sensor::BottomLeft => self.bottom_left = event.value,
            Sensor::BottomRight => self.bottom_right = event.value,
        }
    }

    pub fn left_total(&self) -> i32 {
        self.top_left + self.bottom_left
    }

    pub fn right_total(&self) -> i32 {
        self.top_right + self.bottom_right
    }

    /// Lean direction, or neutral when nobody is standing on the board
    pub fn direction(&self, tilt_threshold: i32, presence_threshold: i32) -> Direction {
        let left = self.left_total();
        let right = self.right_total();
        if left + right <= presence_threshold {
            return Direction::Neutral;
        }
        if left > right + tilt_threshold {
            Direction::Left
        } else if right > left + tilt_threshold {
            Direction::Right
        } else {
            Direction::Neutral
        }
    }
}

/// Blocking stream of load cell updates
pub trait SensorSource: Send {
    /// Wait for the next update. An error ends the stream.
    fn next_event(&mut self) -> Result<SensorEvent, InputError>;
}

/// Keep only load cell axis updates
#[cfg(target_os = "linux")]
pub fn sensor_event(event: &InputEvent) -> Option<SensorEvent> {
    if event.event_type() != EventType::ABSOLUTE {
        return None;
    }
    Sensor::from_abs_code(event.code()).map(|sensor| SensorEvent {
        sensor,
        value: event.value(),
    })
}

/// Load cell updates from a grabbed evdev device. The grab gives this
/// process exclusive use of the board until the source is dropped.
#[cfg(target_os = "linux")]
pub struct EvdevSource {
    device: Device,
    pending: VecDeque<SensorEvent>,
}

#[cfg(target_os = "linux")]
impl EvdevSource {
    pub fn grab(mut device: Device) -> Result<Self, InputError> {
        device.grab()?;
        log::info!(
            "Grabbed balance board {}",
            device.physical_path().unwrap_or("(no phys path)")
        );
        Ok(Self {
            device,
            pending: VecDeque::new(),
        })
    }
}

#[cfg(target_os = "linux")]
impl SensorSource for EvdevSource {
    fn next_event(&mut self) -> Result<SensorEvent, InputError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            let events = self.device.fetch_events()?;
            self.pending.extend(events.filter_map(|e| sensor_event(&e)));
        }
    }
}

#[cfg(target_os = "linux")]
impl Drop for EvdevSource {
    fn drop(&mut self) {
        if let Err(e) = self.device.ungrab() {
            log::warn!("Could not release balance board: {}", e);
        }
    }
}

/// Whether a reported device name is the balance board
pub fn is_balance_board(name: Option<&str>) -> bool {
    name.map(str::trim) == Some(BOARD_NAME)
}

/// Locate the balance board among the evdev nodes
#[cfg(target_os = "linux")]
pub fn find_balance_board() -> Result<Device, InputError> {
    evdev::enumerate()
        .find(|(_, device)| is_balance_board(device.name()))
        .map(|(path, device)| {
            log::debug!("Balance board found at {}", path.display());
            device
        })
        .ok_or(InputError::DeviceNotFound)
}

/// Start the reader thread. On any read failure the channel is reset to
/// neutral and the thread exits.
pub fn spawn_reader<S: SensorSource + 'static>(
    mut source: S,
    channel: TiltChannel,
    tilt_threshold: i32,
    presence_threshold: i32,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("balance-board".to_string())
        .spawn(move || {
            let mut weights = BoardWeights::default();
            log::info!("Balance board reader started");
            loop {
                match source.next_event() {
                    Ok(event) => {
                        weights.apply(event);
                        channel.publish(weights.direction(tilt_threshold, presence_threshold));
                    }
                    Err(e) => {
                        log::error!("Balance board reader stopped: {}", e);
                        channel.publish(Direction::Neutral);
                        break;
                    }
                }
            }
        })
}

/// Find, grab and start reading the balance board. Returns `None` (key-only
/// play) if any step fails.
#[cfg(target_os = "linux")]
pub fn connect(tuning: &Tuning) -> Option<TiltChannel> {
    let device = match find_balance_board() {
        Ok(device) => device,
        Err(e) => {
            log::warn!("{}; continuing with keyboard only", e);
            return None;
        }
    };
    let source = match EvdevSource::grab(device) {
        Ok(source) => source,
        Err(e) => {
            log::warn!("Could not grab balance board: {}; continuing with keyboard only", e);
            return None;
        }
    };

    let channel = TiltChannel::new();
    match spawn_reader(
        source,
        channel.clone(),
        tuning.tilt_threshold,
        tuning.presence_threshold,
    ) {
        Ok(_) => Some(channel),
        Err(e) => {
            log::warn!("Could not start balance board thread: {}", e);
            None
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn connect(_tuning: &Tuning) -> Option<TiltChannel> {
    log::warn!("Balance board needs Linux evdev; continuing with keyboard only");
    None
}
