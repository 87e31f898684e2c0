//! Hardware adapter: bridges peripherals to domain port traits.
//!
//! Owns the light and fan drivers plus a temperature source, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches the drivers.  Actuator state lives here and
//! is mutated only through the port methods.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::ActuatorState;
use crate::drivers::fan::{Direction, FanDriver};
use crate::drivers::hw_init::{Peripherals, SimPin, SimPwm};
use crate::drivers::light::LightDriver;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::SensorReading;

pub type SimLight = LightDriver<SimPin>;
pub type SimFan = FanDriver<SimPwm, SimPin, SimPin>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S> {
    sensor: S,
    light: SimLight,
    fan: SimFan,
}

impl<S: SensorPort> HardwareAdapter<S> {
    pub fn new(sensor: S, light: SimLight, fan: SimFan) -> Self {
        Self { sensor, light, fan }
    }

    /// Build the drivers from freshly initialised peripherals.
    pub fn from_peripherals(p: Peripherals, sensor: S) -> Self {
        Self::new(
            sensor,
            LightDriver::new(p.light),
            FanDriver::new(p.fan_pwm, p.motor_a, p.motor_b),
        )
    }

    pub fn light(&self) -> &SimLight {
        &self.light
    }

    pub fn fan(&self) -> &SimFan {
        &self.fan
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort> SensorPort for HardwareAdapter<S> {
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        self.sensor.sample()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S: SensorPort> ActuatorPort for HardwareAdapter<S> {
    fn set_binary(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.light.set(on)
    }

    fn set_level(&mut self, level: i32) -> Result<u8, ActuatorError> {
        self.fan.set_level(level)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.fan.set_direction(direction)
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.fan.stop()
    }

    fn light_state(&self) -> ActuatorState {
        self.light.state()
    }

    fn fan_state(&self) -> ActuatorState {
        self.fan.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::drivers::hw_init::init_peripherals;
    use crate::sensors::ScriptedTemperature;

    fn adapter() -> HardwareAdapter<ScriptedTemperature> {
        let p = init_peripherals(&SystemConfig::default()).unwrap();
        HardwareAdapter::from_peripherals(p, ScriptedTemperature::from_values(&[31.0]))
    }

    #[test]
    fn starts_with_everything_off() {
        let hw = adapter();
        assert_eq!(hw.light_state(), ActuatorState::Binary { on: false });
        assert_eq!(
            hw.fan_state(),
            ActuatorState::Variable {
                level: 0,
                direction: Direction::Stopped
            }
        );
    }

    #[test]
    fn all_off_resets_both_actuators() {
        let mut hw = adapter();
        hw.set_binary(true).unwrap();
        hw.set_direction(Direction::Forward).unwrap();
        assert_eq!(hw.set_level(80).unwrap(), 80);
        assert!(hw.fan().is_running());

        hw.all_off().unwrap();
        assert!(!hw.light().is_on());
        assert_eq!(hw.fan().level(), 0);
        assert_eq!(hw.fan().direction(), Direction::Stopped);
    }

    #[test]
    fn sample_delegates_to_sensor() {
        let mut hw = adapter();
        assert_eq!(hw.sample(), Ok(SensorReading::new(31.0)));
    }
}
