//! DC fan motor driver (H-bridge + software PWM).
//!
//! Variable-speed forward/backward control: two direction inputs on the
//! H-bridge and a PWM channel for speed.
//!
//! | Direction | A    | B    |
//! |-----------|------|------|
//! | Forward   | HIGH | LOW  |
//! | Backward  | LOW  | HIGH |
//! | Stopped   | LOW  | LOW  |
//!
//! Level and direction are independent.  By convention a `Stopped`
//! direction goes with level 0, but the driver does not enforce it; use
//! [`FanDriver::stop`] to get both.

use core::fmt;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use serde::{Deserialize, Serialize};

use crate::drivers::ActuatorState;
use crate::error::ActuatorError;

/// Highest duty cycle, in percent.
pub const MAX_LEVEL: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Stopped,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Constrain a requested level to `0..=100`.
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(0, i32::from(MAX_LEVEL)) as u8
}

pub struct FanDriver<PWM, A, B> {
    pwm: PWM,
    pin_a: A,
    pin_b: B,
    level: u8,
    direction: Direction,
}

impl<PWM, A, B> FanDriver<PWM, A, B>
where
    PWM: SetDutyCycle,
    A: OutputPin,
    B: OutputPin,
{
    pub fn new(pwm: PWM, pin_a: A, pin_b: B) -> Self {
        Self {
            pwm,
            pin_a,
            pin_b,
            level: 0,
            direction: Direction::Stopped,
        }
    }

    /// Apply a duty cycle, clamping it first.  Returns the level actually
    /// applied so callers can tell clamping happened.
    pub fn set_level(&mut self, level: i32) -> Result<u8, ActuatorError> {
        let applied = clamp_level(level);
        self.pwm
            .set_duty_cycle_percent(applied)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.level = applied;
        Ok(applied)
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        let (a, b) = match direction {
            Direction::Forward => (true, false),
            Direction::Backward => (false, true),
            Direction::Stopped => (false, false),
        };
        write_pin(&mut self.pin_a, a)?;
        write_pin(&mut self.pin_b, b)?;
        self.direction = direction;
        Ok(())
    }

    /// Level 0 and both bridge inputs low, regardless of prior state.
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set_level(0)?;
        self.set_direction(Direction::Stopped)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.level > 0 && self.direction != Direction::Stopped
    }

    pub fn state(&self) -> ActuatorState {
        ActuatorState::Variable {
            level: self.level,
            direction: self.direction,
        }
    }

    pub fn release(self) -> (PWM, A, B) {
        (self.pwm, self.pin_a, self.pin_b)
    }
}

fn write_pin(pin: &mut impl OutputPin, high: bool) -> Result<(), ActuatorError> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| ActuatorError::GpioWriteFailed)
}
