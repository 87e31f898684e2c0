//! Motor ramp demo.
//!
//! Drives the simulated fan forward from 0 to 100% in fixed steps, reverses
//! and ramps back down to 0, then stops.  Each step is applied through the
//! same service and ports as the controller, one command per step.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use homeauto::adapters::hardware::HardwareAdapter;
use homeauto::app::commands::AppCommand;
use homeauto::app::events::AppEvent;
use homeauto::app::ports::EventSink;
use homeauto::app::service::AppService;
use homeauto::config::SystemConfig;
use homeauto::control::ramp::MotorRamp;
use homeauto::drivers::fan::Direction;
use homeauto::drivers::hw_init;
use homeauto::error::Error;
use homeauto::sensors::ScriptedTemperature;

#[derive(Parser, Debug)]
#[command(name = "motor-ramp", version, about = "PWM motor ramp-up / ramp-down demo")]
struct Args {
    /// Duty increment per step (1-100)
    #[arg(long, default_value_t = SystemConfig::default().ramp_step)]
    step: u8,

    /// Delay between steps in milliseconds
    #[arg(long, default_value_t = SystemConfig::default().ramp_step_ms)]
    step_ms: u32,
}

/// Reports the ramp in motor terms.  Direction is reported on change only.
#[derive(Default)]
struct RampSink {
    direction: Option<Direction>,
}

impl RampSink {
    fn describe(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::FanLevelSet { applied, .. } => Some(format!("PWM Signal: Motor running at {}% speed", applied)),
            AppEvent::FanDirectionSet(dir) if self.direction != Some(*dir) => {
                self.direction = Some(*dir);
                Some(format!("Motor Direction: {:?}", dir))
            }
            AppEvent::FanStopped => Some("Motor stopped".to_owned()),
            _ => None,
        }
    }
}

impl EventSink for RampSink {
    fn emit(&mut self, event: &AppEvent) {
        if let Some(line) = self.describe(event) {
            info!("{}", line);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    let args = Args::parse();

    let config = SystemConfig {
        ramp_step: args.step,
        ramp_step_ms: args.step_ms,
        ..Default::default()
    };
    config.validate().context("invalid ramp parameters")?;

    info!("Motor Control System");
    let peripherals = hw_init::init_peripherals(&config)
        .map_err(Error::from)
        .context("peripheral initialization failed")?;
    // The ramp never samples; an empty script reports a read failure if it did.
    let mut hw = HardwareAdapter::from_peripherals(peripherals, ScriptedTemperature::new(Vec::new()));
    let mut app = AppService::from_config(&config);
    let mut sink = RampSink::default();

    let delay = Duration::from_millis(u64::from(config.ramp_step_ms));
    for command in MotorRamp::new(config.ramp_step) {
        app.handle_command(AppCommand::Apply(command), &mut hw, &mut sink)
            .context("ramp step failed")?;
        thread::sleep(delay);
    }
    Ok(())
}
