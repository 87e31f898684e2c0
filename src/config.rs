//! System configuration parameters
//!
//! All tunable parameters for the controller.  Defaults reproduce the
//! stock behaviour; values can be overridden from a JSON file and from
//! command-line flags.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::drivers::fan::Direction;
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Automatic fan control ---
    /// Temperature (Celsius) above which the fan is switched on
    pub threshold_c: f32,
    /// Fan duty cycle (0-100%) applied when above threshold
    pub fan_on_level: u8,
    /// Fan direction applied when above threshold
    pub fan_on_direction: Direction,

    // --- Simulated sensor ---
    /// Lower bound of the simulated temperature range (Celsius)
    pub sim_base_c: f32,
    /// RNG seed for reproducible runs. None = seeded from entropy.
    pub seed: Option<u64>,

    // --- Fan PWM ---
    /// Software PWM range (full-scale duty)
    pub pwm_range: u16,

    // --- Timing ---
    /// Pause after each menu command (milliseconds)
    pub menu_delay_ms: u32,
    /// Headless control cycle interval (milliseconds)
    pub control_interval_ms: u32,

    // --- Ramp demo ---
    /// Duty increment per ramp step (1-100%)
    pub ramp_step: u8,
    /// Delay between ramp steps (milliseconds)
    pub ramp_step_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Automatic fan control
            threshold_c: 30.0,
            fan_on_level: 75,
            fan_on_direction: Direction::Forward,

            // Simulated sensor
            sim_base_c: 25.0,
            seed: None,

            // Fan PWM
            pwm_range: 100,

            // Timing
            menu_delay_ms: 500,
            control_interval_ms: 1000,

            // Ramp demo
            ramp_step: 10,
            ramp_step_ms: 1000,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document.  Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("config: {}", e);
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would drive the hardware outside its envelope.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_c.is_finite() {
            return Err(Error::Config("threshold_c must be finite"));
        }
        if !self.sim_base_c.is_finite() {
            return Err(Error::Config("sim_base_c must be finite"));
        }
        if self.fan_on_level > 100 {
            return Err(Error::Config("fan_on_level must be 0-100"));
        }
        if self.ramp_step == 0 || self.ramp_step > 100 {
            return Err(Error::Config("ramp_step must be 1-100"));
        }
        if self.control_interval_ms == 0 {
            return Err(Error::Config("control_interval_ms must be non-zero"));
        }
        Ok(())
    }
}
