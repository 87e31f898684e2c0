//! Threshold controller.
//!
//! Maps one temperature sample to one actuator command through a fixed
//! cutoff.  Every call is a full re-evaluation with no memory: a reading
//! hovering around the threshold re-issues a command each cycle.
//!
//! The comparison is strict (`value > threshold`); a reading exactly at
//! the threshold selects the off action.
//!
//! [`evaluate`] has no side effects.  Applying the returned command is the
//! caller's job, which keeps the policy testable without any actuator.

use crate::drivers::fan::Direction;
use crate::sensors::SensorReading;

/// A single request to the actuator interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Switch the binary output (light).
    SetBinary(bool),
    /// Set fan direction, then level.
    Drive { direction: Direction, level: u8 },
    /// Fan level 0 and direction Stopped.
    Stop,
}

/// Which side of the cutoff a reading fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    BelowThreshold,
    /// Strictly above; equality classifies as [`Zone::BelowThreshold`].
    /// The name is kept from the controller's state table, which calls the
    /// fan-on state "at or above" even though the comparison is `>`.
    AtOrAboveThreshold,
}

/// Cutoff plus the command issued on each side.  Fixed for the lifetime of
/// the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub threshold: f32,
    pub on_action: ActuatorCommand,
    pub off_action: ActuatorCommand,
}

impl ThresholdPolicy {
    pub const fn new(threshold: f32, on_action: ActuatorCommand, off_action: ActuatorCommand) -> Self {
        Self {
            threshold,
            on_action,
            off_action,
        }
    }

    /// Fan forward at 75% above `threshold`, stopped otherwise.
    pub const fn fan_default(threshold: f32) -> Self {
        Self::new(
            threshold,
            ActuatorCommand::Drive {
                direction: Direction::Forward,
                level: 75,
            },
            ActuatorCommand::Stop,
        )
    }
}

pub fn classify(reading: SensorReading, policy: &ThresholdPolicy) -> Zone {
    if reading.value > policy.threshold {
        Zone::AtOrAboveThreshold
    } else {
        Zone::BelowThreshold
    }
}

/// Choose the command for `reading`.
pub fn evaluate(reading: SensorReading, policy: &ThresholdPolicy) -> ActuatorCommand {
    match classify(reading, policy) {
        Zone::AtOrAboveThreshold => policy.on_action,
        Zone::BelowThreshold => policy.off_action,
    }
}
