//! Integration tests: AppService → threshold controller → actuators.

use homeauto::adapters::console::Console;
use homeauto::adapters::hardware::HardwareAdapter;
use homeauto::app::commands::AppCommand;
use homeauto::app::events::AppEvent;
use homeauto::app::ports::{ActuatorPort, EventSink, SensorPort};
use homeauto::app::service::{AppService, CycleOutcome, Flow};
use homeauto::config::SystemConfig;
use homeauto::control::threshold::{ActuatorCommand, ThresholdPolicy};
use homeauto::drivers::ActuatorState;
use homeauto::drivers::fan::{Direction, clamp_level};
use homeauto::drivers::hw_init::init_peripherals;
use homeauto::error::{ActuatorError, Error, SensorError};
use homeauto::sensors::{ScriptedTemperature, SensorReading};

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum ActCall {
    SetBinary(bool),
    SetLevel(i32),
    SetDirection(Direction),
    Stop,
}

struct MockHw {
    readings: ScriptedTemperature,
    calls: Vec<ActCall>,
    light: bool,
    level: u8,
    direction: Direction,
    pwm_fault: bool,
}

impl MockHw {
    fn new(script: Vec<Result<f32, SensorError>>) -> Self {
        Self {
            readings: ScriptedTemperature::new(script),
            calls: Vec::new(),
            light: false,
            level: 0,
            direction: Direction::Stopped,
            pwm_fault: false,
        }
    }
}

impl SensorPort for MockHw {
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        self.readings.sample()
    }
}

impl ActuatorPort for MockHw {
    fn set_binary(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(ActCall::SetBinary(on));
        self.light = on;
        Ok(())
    }
    fn set_level(&mut self, level: i32) -> Result<u8, ActuatorError> {
        self.calls.push(ActCall::SetLevel(level));
        if self.pwm_fault {
            return Err(ActuatorError::PwmWriteFailed);
        }
        self.level = clamp_level(level);
        Ok(self.level)
    }
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.calls.push(ActCall::SetDirection(direction));
        self.direction = direction;
        Ok(())
    }
    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.calls.push(ActCall::Stop);
        self.level = 0;
        self.direction = Direction::Stopped;
        Ok(())
    }
    fn light_state(&self) -> ActuatorState {
        ActuatorState::Binary { on: self.light }
    }
    fn fan_state(&self) -> ActuatorState {
        ActuatorState::Variable {
            level: self.level,
            direction: self.direction,
        }
    }
}

struct RecSink {
    events: Vec<AppEvent>,
}
impl RecSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}
impl EventSink for RecSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(*e);
    }
}

fn make_app(script: Vec<Result<f32, SensorError>>) -> (AppService, MockHw, RecSink) {
    let mut app = AppService::from_config(&SystemConfig::default());
    let hw = MockHw::new(script);
    let mut sink = RecSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

fn fan(level: u8, direction: Direction) -> ActuatorState {
    ActuatorState::Variable { level, direction }
}

// ── Threshold scenarios ───────────────────────────────────────

#[test]
fn hot_reading_runs_fan_forward_at_75() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(32.5)]);
    let outcome = app.run_cycle(&mut hw, &mut sink).unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Applied(ActuatorCommand::Drive {
            direction: Direction::Forward,
            level: 75
        })
    );
    assert_eq!(hw.fan_state(), fan(75, Direction::Forward));
    assert_eq!(
        hw.calls,
        vec![ActCall::SetDirection(Direction::Forward), ActCall::SetLevel(75)]
    );
}

#[test]
fn cool_reading_stops_fan() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(28.0)]);
    let outcome = app.run_cycle(&mut hw, &mut sink).unwrap();

    assert_eq!(outcome, CycleOutcome::Applied(ActuatorCommand::Stop));
    assert_eq!(hw.fan_state(), fan(0, Direction::Stopped));
    assert_eq!(hw.calls, vec![ActCall::Stop]);
}

#[test]
fn reading_at_threshold_counts_as_below() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(30.0)]);
    assert_eq!(
        app.run_cycle(&mut hw, &mut sink).unwrap(),
        CycleOutcome::Applied(ActuatorCommand::Stop)
    );
}

#[test]
fn command_is_reissued_every_cycle_while_hot() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(31.0), Ok(33.0), Ok(29.9)]);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &mut sink).unwrap();
    }
    assert_eq!(app.cycle_count(), 3);
    assert_eq!(
        hw.calls,
        vec![
            ActCall::SetDirection(Direction::Forward),
            ActCall::SetLevel(75),
            ActCall::SetDirection(Direction::Forward),
            ActCall::SetLevel(75),
            ActCall::Stop,
        ]
    );
}

#[test]
fn failed_sample_means_no_decision() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(33.0), Err(SensorError::AdcReadFailed)]);
    app.run_cycle(&mut hw, &mut sink).unwrap();
    hw.calls.clear();

    let outcome = app.run_cycle(&mut hw, &mut sink).unwrap();
    assert_eq!(outcome, CycleOutcome::NoDecision(SensorError::AdcReadFailed));
    assert!(hw.calls.is_empty(), "no actuator call on a failed sample");
    assert_eq!(hw.fan_state(), fan(75, Direction::Forward), "last command stands");
    assert!(sink
        .events
        .contains(&AppEvent::SensorFailed(SensorError::AdcReadFailed)));
}

#[test]
fn custom_policy_can_drive_the_light() {
    let policy = ThresholdPolicy::new(
        20.0,
        ActuatorCommand::SetBinary(true),
        ActuatorCommand::SetBinary(false),
    );
    let mut app = AppService::new(policy);
    let mut hw = MockHw::new(vec![Ok(25.0)]);
    let mut sink = RecSink::new();
    app.run_cycle(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.light_state(), ActuatorState::Binary { on: true });
}

// ── Command dispatch ──────────────────────────────────────────

#[test]
fn light_commands_toggle_binary_output() {
    let (mut app, mut hw, mut sink) = make_app(vec![]);
    assert_eq!(
        app.handle_command(AppCommand::LightOn, &mut hw, &mut sink).unwrap(),
        Flow::Continue
    );
    assert_eq!(hw.light_state(), ActuatorState::Binary { on: true });
    app.handle_command(AppCommand::LightOff, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.light_state(), ActuatorState::Binary { on: false });
    assert!(sink.events.contains(&AppEvent::LightChanged(true)));
}

#[test]
fn fan_speed_is_clamped_and_reported() {
    let (mut app, mut hw, mut sink) = make_app(vec![]);
    app.handle_command(AppCommand::SetFanSpeed(150), &mut hw, &mut sink).unwrap();
    app.handle_command(AppCommand::SetFanSpeed(-5), &mut hw, &mut sink).unwrap();

    assert!(sink.events.contains(&AppEvent::FanLevelSet {
        requested: 150,
        applied: 100
    }));
    assert!(sink.events.contains(&AppEvent::FanLevelSet {
        requested: -5,
        applied: 0
    }));
}

#[test]
fn read_temperature_reports_without_actuating() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(26.4)]);
    app.handle_command(AppCommand::ReadTemperature, &mut hw, &mut sink).unwrap();
    assert!(hw.calls.is_empty());
    assert!(sink
        .events
        .contains(&AppEvent::TemperatureRead(SensorReading::new(26.4))));
}

#[test]
fn read_temperature_failure_is_surfaced() {
    let (mut app, mut hw, mut sink) = make_app(vec![Err(SensorError::OutOfRange)]);
    assert_eq!(
        app.handle_command(AppCommand::ReadTemperature, &mut hw, &mut sink),
        Err(Error::Sensor(SensorError::OutOfRange))
    );
}

#[test]
fn exit_switches_everything_off() {
    let (mut app, mut hw, mut sink) = make_app(vec![]);
    app.handle_command(AppCommand::LightOn, &mut hw, &mut sink).unwrap();
    app.handle_command(
        AppCommand::Apply(ActuatorCommand::Drive {
            direction: Direction::Backward,
            level: 60,
        }),
        &mut hw,
        &mut sink,
    )
    .unwrap();

    let flow = app.handle_command(AppCommand::Exit, &mut hw, &mut sink).unwrap();
    assert_eq!(flow, Flow::Exit);
    assert_eq!(hw.fan_state(), fan(0, Direction::Stopped));
    assert_eq!(hw.light_state(), ActuatorState::Binary { on: false });
    assert!(sink.events.contains(&AppEvent::ShuttingDown));
}

#[test]
fn exit_goes_through_all_off_and_reports_each_actuator() {
    let (mut app, mut hw, mut sink) = make_app(vec![]);
    app.handle_command(AppCommand::LightOn, &mut hw, &mut sink).unwrap();
    hw.calls.clear();
    sink.events.clear();

    app.handle_command(AppCommand::Exit, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.calls, vec![ActCall::Stop, ActCall::SetBinary(false)]);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::ShuttingDown,
            AppEvent::FanStopped,
            AppEvent::LightChanged(false),
        ]
    );
}

#[test]
fn drive_reports_direction_before_level() {
    let (mut app, mut hw, mut sink) = make_app(vec![]);
    sink.events.clear();
    app.handle_command(
        AppCommand::Apply(ActuatorCommand::Drive {
            direction: Direction::Forward,
            level: 0,
        }),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    assert_eq!(
        sink.events,
        vec![
            AppEvent::FanDirectionSet(Direction::Forward),
            AppEvent::FanLevelSet {
                requested: 0,
                applied: 0
            },
        ]
    );
}

#[test]
fn pwm_fault_is_a_hardware_error_not_a_clamp() {
    let (mut app, mut hw, mut sink) = make_app(vec![Ok(34.0)]);
    hw.pwm_fault = true;
    assert_eq!(
        app.run_cycle(&mut hw, &mut sink),
        Err(Error::Actuator(ActuatorError::PwmWriteFailed))
    );
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::FanLevelSet { .. })));
}

// ── Full stack against the simulated hardware ─────────────────

#[test]
fn simulated_hardware_follows_threshold_decisions() {
    let config = SystemConfig::default();
    let peripherals = init_peripherals(&config).unwrap();
    let mut hw = HardwareAdapter::from_peripherals(peripherals, ScriptedTemperature::from_values(&[32.5, 28.0]));
    let mut app = AppService::from_config(&config);
    let mut sink = RecSink::new();

    app.handle_command(AppCommand::AutoFanControl, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.fan_state(), fan(75, Direction::Forward));
    assert!(hw.fan().is_running());

    app.handle_command(AppCommand::AutoFanControl, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.fan_state(), fan(0, Direction::Stopped));
}

#[test]
fn scripted_menu_session_end_to_end() {
    let config = SystemConfig::default();
    let peripherals = init_peripherals(&config).unwrap();
    let mut hw = HardwareAdapter::from_peripherals(peripherals, ScriptedTemperature::from_values(&[32.5]));
    let mut app = AppService::from_config(&config);
    let mut console = Console::new("1\n7\n5\n6\n".as_bytes(), Vec::new());

    app.start(&mut console);
    loop {
        match console.read_command() {
            Ok(cmd) => {
                if app.handle_command(cmd, &mut hw, &mut console).unwrap() == Flow::Exit {
                    break;
                }
            }
            Err(e) => console.report_input_error(e),
        }
    }

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("Light turned ON."));
    assert!(out.contains("Invalid choice. Please try again."));
    assert!(out.contains("Temperature exceeds threshold! Turning fan ON.\nFan speed set to 75%.\nFan started in forward direction.\n"));
    assert!(out.contains("Exiting...\nFan speed set to 0%.\nFan stopped.\nLight turned OFF.\n"));
    assert!(out.contains("Light turned OFF."));
    assert!(!hw.light().is_on());
    assert_eq!(hw.fan().level(), 0);
}
