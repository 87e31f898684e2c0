//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them or print them to a terminal.

use crate::control::threshold::{ActuatorCommand, Zone};
use crate::drivers::fan::Direction;
use crate::error::SensorError;
use crate::sensors::SensorReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the configured threshold).
    Started { threshold: f32 },

    /// Light switched.
    LightChanged(bool),

    /// Fan duty written.  `applied != requested` means it was clamped.
    FanLevelSet { requested: i32, applied: u8 },

    /// Fan direction written.
    FanDirectionSet(Direction),

    /// Fan stopped (level 0, direction Stopped).
    FanStopped,

    /// A temperature sample was taken.
    TemperatureRead(SensorReading),

    /// The threshold controller picked a command.
    Decision {
        reading: SensorReading,
        zone: Zone,
        command: ActuatorCommand,
    },

    /// Sampling failed; nothing was actuated this cycle.
    SensorFailed(SensorError),

    /// Exit requested; actuators are being switched off.
    ShuttingDown,
}

impl AppEvent {
    /// True when a fan level request was clamped before being applied.
    pub fn was_clamped(&self) -> bool {
        matches!(self, Self::FanLevelSet { requested, applied } if *requested != i32::from(*applied))
    }
}
