//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Used by the headless control loop and the ramp demo.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { threshold } => {
                info!("START | threshold={:.1}\u{00b0}C", threshold);
            }
            AppEvent::LightChanged(on) => {
                info!("LIGHT | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::FanLevelSet { requested, applied } => {
                if event.was_clamped() {
                    info!("PWM   | duty={}% (requested {})", applied, requested);
                } else {
                    info!("PWM   | duty={}%", applied);
                }
            }
            AppEvent::FanDirectionSet(dir) => {
                info!("DIR   | {}", dir);
            }
            AppEvent::FanStopped => {
                info!("FAN   | stopped");
            }
            AppEvent::TemperatureRead(r) => {
                info!("TEMP  | {:.2}\u{00b0}C", r.value);
            }
            AppEvent::Decision { zone, command, .. } => {
                info!("CTRL  | {:?} -> {:?}", zone, command);
            }
            AppEvent::SensorFailed(e) => {
                warn!("TEMP  | read failed: {} (no decision)", e);
            }
            AppEvent::ShuttingDown => {
                info!("STOP  | shutting down");
            }
        }
    }
}
