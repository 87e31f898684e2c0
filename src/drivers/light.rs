//! Light relay driver.
//!
//! A single digital output: HIGH = on.  The driver is a dumb actuator;
//! repeated commands re-drive the pin every time.

use embedded_hal::digital::OutputPin;

use crate::drivers::ActuatorState;
use crate::error::ActuatorError;

pub struct LightDriver<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> LightDriver<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn state(&self) -> ActuatorState {
        ActuatorState::Binary { on: self.on }
    }

    /// Give the pin back (test inspection, re-use after shutdown).
    pub fn release(self) -> P {
        self.pin
    }
}
