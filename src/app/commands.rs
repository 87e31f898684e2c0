//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (menu, script,
//! timer) that the [`AppService`](super::service::AppService) interprets
//! and acts upon.  How the command was sourced is irrelevant to the core.

use crate::control::threshold::ActuatorCommand;
use crate::error::InputError;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    LightOn,
    LightOff,
    /// Set fan duty; out-of-range values are clamped.
    SetFanSpeed(i32),
    /// Sample and report the temperature, no actuation.
    ReadTemperature,
    /// One sample → decide → actuate cycle.
    AutoFanControl,
    /// Apply a raw actuator command (ramp demo, scripts).
    Apply(ActuatorCommand),
    /// Switch everything off and leave the loop.
    Exit,
}

/// Menu options, in display order.  The number shown is the index + 1.
pub const MENU: [&str; 6] = [
    "Turn Light ON",
    "Turn Light OFF",
    "Set Fan Speed",
    "Read Temperature",
    "Automatic Fan Control based on Temperature",
    "Exit",
];

/// The menu option that takes a fan speed argument.
pub const FAN_SPEED_CHOICE: u32 = 3;

impl AppCommand {
    /// Map a menu selection.  `speed` is consulted only for the fan speed
    /// option, which fails with `InvalidNumber` when it is absent.
    pub fn from_menu(choice: u32, speed: Option<i32>) -> Result<Self, InputError> {
        match choice {
            1 => Ok(Self::LightOn),
            2 => Ok(Self::LightOff),
            FAN_SPEED_CHOICE => speed.map(Self::SetFanSpeed).ok_or(InputError::InvalidNumber),
            4 => Ok(Self::ReadTemperature),
            5 => Ok(Self::AutoFanControl),
            6 => Ok(Self::Exit),
            _ => Err(InputError::InvalidChoice),
        }
    }
}

/// Parse a menu choice line.  Anything non-numeric is an invalid choice.
pub fn parse_choice(line: &str) -> Result<u32, InputError> {
    line.trim().parse().map_err(|_| InputError::InvalidChoice)
}

/// Parse a signed integer argument.
pub fn parse_number(line: &str) -> Result<i32, InputError> {
    line.trim().parse().map_err(|_| InputError::InvalidNumber)
}
