//! Terminal control surface.
//!
//! [`Console`] reads menu selections from any `BufRead` (stdin, a script
//! file, a test buffer) and prints application events as plain sentences
//! to any `Write`.  It knows nothing about the hardware; it only turns
//! lines into [`AppCommand`]s and events into text.

use std::io::{BufRead, Write};

use log::warn;

use crate::app::commands::{self, AppCommand, FAN_SPEED_CHOICE, MENU};
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::threshold::Zone;
use crate::drivers::fan::Direction;
use crate::error::InputError;

pub struct Console<R, W> {
    input: R,
    output: W,
    line: String,
    /// Direction written ahead of a level; reported after the level line.
    pending_direction: Option<Direction>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
            pending_direction: None,
        }
    }

    pub fn print_menu(&mut self) {
        self.say(format_args!("\nSelect an option:"));
        for (i, label) in MENU.iter().enumerate() {
            self.say(format_args!("{}. {}", i + 1, label));
        }
    }

    /// Prompt for and read one command.  Option 3 reads a second line for
    /// the speed.
    pub fn read_command(&mut self) -> Result<AppCommand, InputError> {
        self.prompt("Enter choice: ");
        let choice = commands::parse_choice(self.read_line()?)?;
        let speed = if choice == FAN_SPEED_CHOICE {
            self.prompt("Enter fan speed (0-100): ");
            Some(commands::parse_number(self.read_line()?)?)
        } else {
            None
        };
        AppCommand::from_menu(choice, speed)
    }

    /// Report rejected input without leaving the loop.
    pub fn report_input_error(&mut self, err: InputError) {
        match err {
            InputError::InvalidChoice => self.say(format_args!("Invalid choice. Please try again.")),
            InputError::InvalidNumber => self.say(format_args!("Invalid number. Please try again.")),
            InputError::EndOfInput => self.say(format_args!("Input closed.")),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<&str, InputError> {
        self.line.clear();
        match self.input.read_line(&mut self.line) {
            Ok(0) => Err(InputError::EndOfInput),
            Ok(_) => Ok(self.line.as_str()),
            Err(e) => {
                warn!("console read failed: {}", e);
                Err(InputError::EndOfInput)
            }
        }
    }

    fn prompt(&mut self, text: &str) {
        let res = write!(self.output, "{}", text).and_then(|()| self.output.flush());
        if let Err(e) = res {
            warn!("console write failed: {}", e);
        }
    }

    fn say(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.output, "{}", args) {
            warn!("console write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> EventSink for Console<R, W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { .. } => self.say(format_args!("=== Home Automation System ===")),
            AppEvent::LightChanged(on) => {
                self.say(format_args!("Light turned {}.", if *on { "ON" } else { "OFF" }));
            }
            AppEvent::FanLevelSet { applied, .. } => {
                self.say(format_args!("Fan speed set to {}%.", applied));
                match self.pending_direction.take() {
                    Some(Direction::Stopped) => self.say(format_args!("Fan direction cleared.")),
                    Some(dir) => self.say(format_args!("Fan started in {} direction.", dir)),
                    None => {}
                }
            }
            AppEvent::FanDirectionSet(dir) => self.pending_direction = Some(*dir),
            AppEvent::FanStopped => {
                self.pending_direction = None;
                self.say(format_args!("Fan speed set to 0%."));
                self.say(format_args!("Fan stopped."));
            }
            AppEvent::TemperatureRead(r) => {
                self.say(format_args!("Current Temperature: {:.2}\u{00b0}C", r.value));
            }
            AppEvent::Decision { zone, .. } => match zone {
                Zone::AtOrAboveThreshold => {
                    self.say(format_args!("Temperature exceeds threshold! Turning fan ON."));
                }
                Zone::BelowThreshold => {
                    self.say(format_args!("Temperature is below threshold. Turning fan OFF."));
                }
            },
            AppEvent::SensorFailed(e) => {
                self.say(format_args!("Temperature read failed ({}). No action taken.", e));
            }
            AppEvent::ShuttingDown => self.say(format_args!("Exiting...")),
        }
    }
}
