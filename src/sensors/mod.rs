//! Sensor sources.
//!
//! Every source implements [`SensorPort`](crate::app::ports::SensorPort)
//! and yields one fresh [`SensorReading`] per call.  Nothing is cached.

pub mod temperature;

pub use temperature::{ScriptedTemperature, SensorReading, SimulatedTemperature, ThermistorSensor};
