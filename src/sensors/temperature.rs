//! Temperature sources.
//!
//! - [`SimulatedTemperature`]: synthetic readings, uniform over
//!   `[base, base + 10.0)` in 0.1 °C steps.  Cannot fail.
//! - [`ScriptedTemperature`]: replays a fixed sequence of readings and
//!   failures, for deterministic tests and scripted runs.
//! - [`ThermistorSensor`]: NTC thermistor (10 kOhm @ 25 C, B = 3950) in a
//!   voltage divider with a fixed 10 kOhm resistor, read through an
//!   [`AdcChannel`].  The simplified Beta equation converts resistance to
//!   temperature.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::SensorPort;
use crate::drivers::hw_init::AdcChannel;
use crate::error::SensorError;

/// One temperature sample in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub value: f32,
}

impl SensorReading {
    pub const fn new(value: f32) -> Self {
        Self { value }
    }
}

// ── Simulated ─────────────────────────────────────────────────

/// Number of discrete 0.1 °C steps above `base`.
const SIM_STEPS: u32 = 100;

pub struct SimulatedTemperature {
    base_c: f32,
    rng: StdRng,
}

impl SimulatedTemperature {
    /// `seed = None` draws the seed from OS entropy.
    pub fn new(base_c: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { base_c, rng }
    }
}

impl SensorPort for SimulatedTemperature {
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        let step = self.rng.gen_range(0..SIM_STEPS);
        let value = self.base_c + step as f32 / 10.0;
        debug!("temp(sim) = {:.1}", value);
        Ok(SensorReading::new(value))
    }
}

// ── Scripted ──────────────────────────────────────────────────

/// Replays `script` in order, wrapping around at the end.
pub struct ScriptedTemperature {
    script: Vec<Result<f32, SensorError>>,
    next: usize,
}

impl ScriptedTemperature {
    pub fn new(script: Vec<Result<f32, SensorError>>) -> Self {
        Self { script, next: 0 }
    }

    pub fn from_values(values: &[f32]) -> Self {
        Self::new(values.iter().copied().map(Ok).collect())
    }
}

impl SensorPort for ScriptedTemperature {
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        // An empty script has nothing to read.
        let entry = self
            .script
            .get(self.next)
            .copied()
            .unwrap_or(Err(SensorError::AdcReadFailed));
        if !self.script.is_empty() {
            self.next = (self.next + 1) % self.script.len();
        }
        entry.map(SensorReading::new)
    }
}

// ── Thermistor ────────────────────────────────────────────────

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

pub struct ThermistorSensor<A> {
    adc: A,
}

impl<A: AdcChannel> ThermistorSensor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }
}

impl<A: AdcChannel> SensorPort for ThermistorSensor<A> {
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        let raw = self.adc.read_raw().map_err(|e| {
            warn!("thermistor ADC read failed: {:?}", e);
            SensorError::AdcReadFailed
        })?;
        adc_to_celsius(raw).map(SensorReading::new)
    }
}

/// Convert a 12-bit divider code to Celsius.  A rail-pinned voltage means
/// an open or shorted thermistor, reported rather than guessed at.
pub fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
        return Err(SensorError::OutOfRange);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}
