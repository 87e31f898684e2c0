//! Actuator drivers and hardware initialisation.

pub mod fan;
pub mod hw_init;
pub mod light;

use fan::Direction;

/// Last-commanded state of one actuator.  Write-only hardware has no
/// readback, so this is what the driver last applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorState {
    /// On/off output (light).
    Binary { on: bool },
    /// Duty-cycle output with direction (fan).
    Variable { level: u8, direction: Direction },
}
