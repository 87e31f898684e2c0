//! Unified error types for the home automation controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control surface's error handling uniform. All variants are `Copy` so
//! they can be passed through the service without allocation.
//!
//! Out-of-range fan levels are *not* errors: they are clamped by the fan
//! driver and the applied value is reported back to the caller.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not produce a trustworthy reading.
    Sensor(SensorError),
    /// An actuator write failed at the hardware level.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(InitError),
    /// Operator input could not be turned into a command.
    Input(InputError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Read failures.  A sensor reports one of these instead of fabricating a
/// value; the controller treats it as "no decision this cycle".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC conversion returned an error.
    AdcReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

/// Hardware faults raised by actuator drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Two peripherals were assigned the same pin.
    PinConflict(i32),
    /// The PWM channel could not be created with the requested range.
    PwmInitFailed,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinConflict(pin) => write!(f, "GPIO {} assigned twice", pin),
            Self::PwmInitFailed => write!(f, "PWM initialization failed"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Operator input that does not map to a command.  Reported to the control
/// surface, which re-prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Menu choice is not one of the listed options.
    InvalidChoice,
    /// A numeric argument could not be parsed.
    InvalidNumber,
    /// The input source was closed.
    EndOfInput,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChoice => write!(f, "invalid choice"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_preserve_kind() {
        assert_eq!(Error::from(SensorError::OutOfRange), Error::Sensor(SensorError::OutOfRange));
        assert_eq!(
            Error::from(ActuatorError::PwmWriteFailed),
            Error::Actuator(ActuatorError::PwmWriteFailed)
        );
        assert_eq!(Error::from(InitError::PwmInitFailed), Error::Init(InitError::PwmInitFailed));
    }

    #[test]
    fn display_is_prefixed_by_subsystem() {
        assert_eq!(Error::from(SensorError::AdcReadFailed).to_string(), "sensor: ADC read failed");
        assert_eq!(Error::from(InitError::PinConflict(17)).to_string(), "init: GPIO 17 assigned twice");
        assert_eq!(Error::Config("threshold").to_string(), "config: threshold");
    }
}
