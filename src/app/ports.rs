//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::drivers::ActuatorState;
use crate::drivers::fan::Direction;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::SensorReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one fresh reading per call, no history.
pub trait SensorPort {
    /// Take one sample.  A failed read is reported, never replaced by a
    /// made-up value.
    fn sample(&mut self) -> Result<SensorReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Errors are hardware faults only.  An out-of-range level is clamped and
/// the applied value returned.
pub trait ActuatorPort {
    /// Switch the light.
    fn set_binary(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Set fan duty (clamped to 0–100).  Returns the applied level.
    fn set_level(&mut self, level: i32) -> Result<u8, ActuatorError>;

    /// Set fan direction.
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError>;

    /// Fan level 0 and direction `Stopped`.  Idempotent.
    fn stop(&mut self) -> Result<(), ActuatorError>;

    /// Last-commanded light state.
    fn light_state(&self) -> ActuatorState;

    /// Last-commanded fan state.
    fn fan_state(&self) -> ActuatorState;

    /// Kill all actuators (safe shutdown).
    fn all_off(&mut self) -> Result<(), ActuatorError> {
        self.stop()?;
        self.set_binary(false)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / console)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, terminal).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
