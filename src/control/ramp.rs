//! Motor ramp profile.
//!
//! Forward ramp from 0 to 100 in `step` increments, backward ramp from
//! 100 down to 0, then stop.  Both end points are always included even
//! when `step` does not divide 100.

use crate::control::threshold::ActuatorCommand;
use crate::drivers::fan::{Direction, MAX_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Up,
    Down,
    Stop,
    Done,
}

/// Iterator over the ramp's actuator commands.
#[derive(Debug, Clone)]
pub struct MotorRamp {
    step: u8,
    level: u8,
    phase: Phase,
}

impl MotorRamp {
    /// `step` is clamped to `1..=100`.
    pub fn new(step: u8) -> Self {
        Self {
            step: step.clamp(1, MAX_LEVEL),
            level: 0,
            phase: Phase::Up,
        }
    }
}

impl Iterator for MotorRamp {
    type Item = ActuatorCommand;

    fn next(&mut self) -> Option<ActuatorCommand> {
        match self.phase {
            Phase::Up => {
                let cmd = ActuatorCommand::Drive {
                    direction: Direction::Forward,
                    level: self.level,
                };
                if self.level == MAX_LEVEL {
                    self.phase = Phase::Down;
                } else {
                    self.level = self.level.saturating_add(self.step).min(MAX_LEVEL);
                }
                Some(cmd)
            }
            Phase::Down => {
                let cmd = ActuatorCommand::Drive {
                    direction: Direction::Backward,
                    level: self.level,
                };
                if self.level == 0 {
                    self.phase = Phase::Stop;
                } else {
                    self.level = self.level.saturating_sub(self.step);
                }
                Some(cmd)
            }
            Phase::Stop => {
                self.phase = Phase::Done;
                Some(ActuatorCommand::Stop)
            }
            Phase::Done => None,
        }
    }
}
