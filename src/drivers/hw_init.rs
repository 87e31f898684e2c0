//! One-shot hardware peripheral initialisation.
//!
//! Claims the output pins and the fan PWM channel and hands them to the
//! drivers.  On the host every peripheral is simulated: pins and PWM
//! channels track their level in memory and trace each write, so the rest
//! of the system is exercised exactly as it would be against real
//! `embedded-hal` implementations.

use core::convert::Infallible;

use embedded_hal::digital::{self, OutputPin, StatefulOutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use log::{info, trace};

use crate::config::SystemConfig;
use crate::error::InitError;
use crate::pins;

// ── Simulated GPIO ────────────────────────────────────────────

/// In-memory output pin.
#[derive(Debug)]
pub struct SimPin {
    gpio: i32,
    high: bool,
}

impl SimPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, high: false }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        trace!("gpio{} <- LOW", self.gpio);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        trace!("gpio{} <- HIGH", self.gpio);
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

// ── Simulated software PWM ────────────────────────────────────

/// In-memory PWM channel with a configurable full-scale range.
#[derive(Debug)]
pub struct SimPwm {
    gpio: i32,
    range: u16,
    duty: u16,
}

impl SimPwm {
    /// Create a channel.  A zero range cannot represent any duty cycle.
    pub fn new(gpio: i32, range: u16) -> Result<Self, InitError> {
        if range == 0 {
            return Err(InitError::PwmInitFailed);
        }
        Ok(Self { gpio, range, duty: 0 })
    }

    /// Raw duty last written, in `0..=range`.
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.range
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        trace!("pwm{} <- {}/{}", self.gpio, duty, self.range);
        self.duty = duty.min(self.range);
        Ok(())
    }
}

// ── Simulated ADC ─────────────────────────────────────────────

/// One ADC input channel returning raw conversion codes.
pub trait AdcChannel {
    type Error: core::fmt::Debug;

    /// Perform one conversion.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// ADC channel returning an injected raw code (12-bit scale).
#[derive(Debug)]
pub struct SimAdc {
    channel: u8,
    raw: u16,
}

impl SimAdc {
    pub fn new(channel: u8, raw: u16) -> Self {
        Self { channel, raw }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn set_raw(&mut self, raw: u16) {
        self.raw = raw;
    }
}

impl AdcChannel for SimAdc {
    type Error = Infallible;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        trace!("adc{} -> {}", self.channel, self.raw);
        Ok(self.raw)
    }
}

// ── Peripheral bundle ─────────────────────────────────────────

/// Every peripheral the drivers need, claimed once at startup.
#[derive(Debug)]
pub struct Peripherals {
    pub light: SimPin,
    pub motor_a: SimPin,
    pub motor_b: SimPin,
    pub fan_pwm: SimPwm,
}

/// Fail if any pin appears twice in `assigned`.
pub fn check_pin_assignments(assigned: &[i32]) -> Result<(), InitError> {
    for (i, pin) in assigned.iter().enumerate() {
        if assigned[i + 1..].contains(pin) {
            return Err(InitError::PinConflict(*pin));
        }
    }
    Ok(())
}

/// Claim and configure all output peripherals, leaving them off.
pub fn init_peripherals(config: &SystemConfig) -> Result<Peripherals, InitError> {
    check_pin_assignments(&pins::OUTPUT_PINS)?;

    let mut light = SimPin::new(pins::LIGHT_GPIO);
    let mut motor_a = SimPin::new(pins::MOTOR_A_GPIO);
    let mut motor_b = SimPin::new(pins::MOTOR_B_GPIO);
    let mut fan_pwm = SimPwm::new(pins::FAN_PWM_GPIO, config.pwm_range)?;

    // Infallible on the host; explicit so the start state is traced.
    let Ok(()) = light.set_low();
    let Ok(()) = motor_a.set_low();
    let Ok(()) = motor_b.set_low();
    let Ok(()) = fan_pwm.set_duty_cycle(0);

    info!(
        "hw_init(sim): light=gpio{} motor=gpio{}/gpio{} fan_pwm=gpio{} range={}",
        pins::LIGHT_GPIO,
        pins::MOTOR_A_GPIO,
        pins::MOTOR_B_GPIO,
        pins::FAN_PWM_GPIO,
        config.pwm_range
    );

    Ok(Peripherals {
        light,
        motor_a,
        motor_b,
        fan_pwm,
    })
}
