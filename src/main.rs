//! Home automation controller: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter        Console / LogEventSink           │
//! │  (Sensor+Actuator)      (menu input, EventSink)          │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ─────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            AppService (pure logic)                 │  │
//! │  │  command dispatch · threshold controller           │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Interactive menu by default; `--headless` runs the automatic fan
//! control cycle on a timer instead.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use homeauto::adapters::console::Console;
use homeauto::adapters::hardware::HardwareAdapter;
use homeauto::adapters::log_sink::LogEventSink;
use homeauto::app::service::{AppService, Flow};
use homeauto::config::SystemConfig;
use homeauto::drivers::hw_init;
use homeauto::error::{Error, InputError};
use homeauto::sensors::SimulatedTemperature;

type SimHardware = HardwareAdapter<SimulatedTemperature>;

#[derive(Parser, Debug)]
#[command(name = "homeauto", version, about = "Light, fan and temperature control")]
struct Args {
    /// JSON configuration file
    #[arg(long, env = "HOMEAUTO_CONFIG")]
    config: Option<PathBuf>,

    /// Run the automatic fan control loop instead of the menu
    #[arg(long)]
    headless: bool,

    /// Stop after this many headless cycles (default: run forever)
    #[arg(long)]
    cycles: Option<u64>,

    /// Override the fan threshold (Celsius)
    #[arg(long)]
    threshold: Option<f32>,

    /// Seed the simulated temperature sensor
    #[arg(long)]
    seed: Option<u64>,

    /// Read menu selections from a file instead of stdin
    #[arg(long, conflicts_with = "headless")]
    script: Option<PathBuf>,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn load_config(args: &Args) -> Result<SystemConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SystemConfig::from_json_str(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SystemConfig::default(),
    };
    if let Some(t) = args.threshold {
        config.threshold_c = t;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    info!("homeauto v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    // Peripheral init failure is fatal: nothing can be actuated safely.
    let peripherals = hw_init::init_peripherals(&config)
        .map_err(Error::from)
        .context("peripheral initialization failed")?;
    let sensor = SimulatedTemperature::new(config.sim_base_c, config.seed);
    let mut hw = HardwareAdapter::from_peripherals(peripherals, sensor);
    let mut app = AppService::from_config(&config);

    if args.headless {
        return run_headless(&mut app, &mut hw, &config, args.cycles);
    }

    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            run_menu(&mut app, &mut hw, &config, Console::new(BufReader::new(file), stdout))
        }
        None => run_menu(&mut app, &mut hw, &config, Console::new(io::stdin().lock(), stdout)),
    }
}

fn run_menu<R: BufRead>(
    app: &mut AppService,
    hw: &mut SimHardware,
    config: &SystemConfig,
    mut console: Console<R, Stdout>,
) -> Result<()> {
    app.start(&mut console);
    let delay = Duration::from_millis(u64::from(config.menu_delay_ms));

    loop {
        console.print_menu();
        match console.read_command() {
            Ok(cmd) => match app.handle_command(cmd, hw, &mut console) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                // Already reported to the operator; the next read may succeed.
                Err(Error::Sensor(e)) => warn!("temperature unavailable: {}", e),
                Err(e) => return Err(abort(app, hw, e)),
            },
            Err(InputError::EndOfInput) => {
                info!("input closed, shutting down");
                app.shutdown(hw, &mut console).context("shutdown failed")?;
                return Ok(());
            }
            Err(e) => console.report_input_error(e),
        }
        thread::sleep(delay);
    }
}

fn run_headless(
    app: &mut AppService,
    hw: &mut SimHardware,
    config: &SystemConfig,
    cycles: Option<u64>,
) -> Result<()> {
    let mut sink = LogEventSink::new();
    app.start(&mut sink);
    let interval = Duration::from_millis(u64::from(config.control_interval_ms));

    info!("headless: interval={}ms cycles={:?}", config.control_interval_ms, cycles);
    loop {
        if cycles.is_some_and(|n| app.cycle_count() >= n) {
            break;
        }
        // A failed sample is a skipped cycle, not a reason to stop.
        if let Err(e) = app.run_cycle(hw, &mut sink) {
            return Err(abort(app, hw, e));
        }
        thread::sleep(interval);
    }

    app.shutdown(hw, &mut sink).context("shutdown failed")?;
    Ok(())
}

/// Hardware fault mid-run: best-effort switch-off, then surface the error.
fn abort(app: &mut AppService, hw: &mut SimHardware, err: Error) -> anyhow::Error {
    error!("fatal: {}, switching everything off", err);
    if let Err(e) = app.shutdown(hw, &mut LogEventSink::new()) {
        error!("shutdown after fault also failed: {}", e);
    }
    anyhow::Error::new(err).context("control loop aborted")
}
