//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the threshold policy and dispatches commands.  All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│  dispatch · threshold   │
//!                 └────────────────────────┘
//! ```
//!
//! Single-threaded: each sample → evaluate → apply cycle runs to
//! completion before the next command is accepted.  The hardware adapter
//! is borrowed mutably for the whole call, so a second control surface
//! would have to go through the same owner.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::threshold::{self, ActuatorCommand, ThresholdPolicy};
use crate::error::Result;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

/// What the control surface should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Result of one automatic control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The command chosen and applied.
    Applied(ActuatorCommand),
    /// The sample failed; no actuator was touched.
    NoDecision(crate::error::SensorError),
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    policy: ThresholdPolicy,
    cycle_count: u64,
}

impl AppService {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self {
            policy,
            cycle_count: 0,
        }
    }

    /// Fan policy from configuration: configured direction/level above
    /// the threshold, stop otherwise.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(ThresholdPolicy::new(
            config.threshold_c,
            ActuatorCommand::Drive {
                direction: config.fan_on_direction,
                level: config.fan_on_level,
            },
            ActuatorCommand::Stop,
        ))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            threshold: self.policy.threshold,
        });
        info!(
            "AppService started (threshold={:.1}, on={:?}, off={:?})",
            self.policy.threshold, self.policy.on_action, self.policy.off_action
        );
    }

    /// Stop the fan and switch the light off.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> Result<()> {
        sink.emit(&AppEvent::ShuttingDown);
        hw.all_off()?;
        sink.emit(&AppEvent::FanStopped);
        sink.emit(&AppEvent::LightChanged(false));
        info!("AppService shut down after {} cycles", self.cycle_count);
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one command.  `hw` satisfies both ports so a single owner
    /// serialises every read and write.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<Flow> {
        debug!("command: {:?}", cmd);
        match cmd {
            AppCommand::LightOn => self.apply(ActuatorCommand::SetBinary(true), hw, sink)?,
            AppCommand::LightOff => self.apply(ActuatorCommand::SetBinary(false), hw, sink)?,
            AppCommand::SetFanSpeed(level) => self.set_fan_level(level, hw, sink)?,
            AppCommand::ReadTemperature => match hw.sample() {
                Ok(reading) => sink.emit(&AppEvent::TemperatureRead(reading)),
                Err(e) => {
                    sink.emit(&AppEvent::SensorFailed(e));
                    return Err(e.into());
                }
            },
            AppCommand::AutoFanControl => {
                self.run_cycle(hw, sink)?;
            }
            AppCommand::Apply(command) => self.apply(command, hw, sink)?,
            AppCommand::Exit => {
                self.shutdown(hw, sink)?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Sample → evaluate → apply.  A failed sample means no decision: the
    /// actuators keep their last-commanded state.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<CycleOutcome> {
        self.cycle_count += 1;

        let reading = match hw.sample() {
            Ok(r) => r,
            Err(e) => {
                warn!("cycle {}: sample failed ({}), no decision", self.cycle_count, e);
                sink.emit(&AppEvent::SensorFailed(e));
                return Ok(CycleOutcome::NoDecision(e));
            }
        };
        sink.emit(&AppEvent::TemperatureRead(reading));

        let zone = threshold::classify(reading, &self.policy);
        let command = threshold::evaluate(reading, &self.policy);
        sink.emit(&AppEvent::Decision {
            reading,
            zone,
            command,
        });

        self.apply(command, hw, sink)?;
        Ok(CycleOutcome::Applied(command))
    }

    /// Route one actuator command to the port.
    pub fn apply(
        &mut self,
        command: ActuatorCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match command {
            ActuatorCommand::SetBinary(on) => {
                hw.set_binary(on)?;
                sink.emit(&AppEvent::LightChanged(on));
            }
            ActuatorCommand::Drive { direction, level } => {
                hw.set_direction(direction)?;
                sink.emit(&AppEvent::FanDirectionSet(direction));
                self.set_fan_level(i32::from(level), hw, sink)?;
            }
            ActuatorCommand::Stop => {
                hw.stop()?;
                sink.emit(&AppEvent::FanStopped);
            }
        }
        Ok(())
    }

    fn set_fan_level(&mut self, level: i32, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> Result<()> {
        let applied = hw.set_level(level)?;
        let event = AppEvent::FanLevelSet {
            requested: level,
            applied,
        };
        if event.was_clamped() {
            debug!("fan level {} clamped to {}", level, applied);
        }
        sink.emit(&event);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    /// Automatic control cycles run since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
