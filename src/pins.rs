//! GPIO / peripheral pin assignments for the home automation board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Numbers are BCM GPIO numbers on a Raspberry Pi.

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

/// Digital output: HIGH = light on.
pub const LIGHT_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Fan motor driver (H-bridge)
// ---------------------------------------------------------------------------

/// H-bridge input A: HIGH with B LOW = forward.
pub const MOTOR_A_GPIO: i32 = 18;
/// H-bridge input B: HIGH with A LOW = backward.
pub const MOTOR_B_GPIO: i32 = 27;
/// Software PWM output for fan speed.
pub const FAN_PWM_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// MCP3008 channel wired to the NTC thermistor divider.
pub const TEMP_ADC_CHANNEL: u8 = 4;

/// Every output pin, used by init to detect double assignment.
pub const OUTPUT_PINS: [i32; 4] = [LIGHT_GPIO, MOTOR_A_GPIO, MOTOR_B_GPIO, FAN_PWM_GPIO];
