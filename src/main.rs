use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use chargemon::bus::SmbusRegisterBus;
use chargemon::config::Config;
use chargemon::core::PollLoop;
use chargemon::displayers::Dashboard;
use chargemon::sources::ChargerSource;
use chargemon::ui::{self, TerminalSurface};

/// chargemon - a live telemetry console for the LTC4162 battery charger
#[derive(Parser, Debug, Clone)]
#[command(name = "chargemon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// I2C character device the charger is attached to
    #[arg(short = 'b', long = "bus", value_name = "PATH", default_value = "/dev/i2c-1")]
    bus: String,

    /// 7-bit chip address, decimal or 0x-prefixed hex
    #[arg(short = 'a', long = "address", value_name = "ADDR", default_value = "0x68", value_parser = parse_address)]
    address: u8,

    /// Battery shunt resistance in ohms
    #[arg(short = 'r', long = "rsense", value_name = "OHMS", default_value = "0.01")]
    rsense: f64,

    /// Number of series battery cells. Hardcoded rather than detected because
    /// the chip stops reporting the count when running on battery only
    #[arg(short = 'c', long = "cells", value_name = "COUNT", default_value = "4")]
    cells: u8,

    /// Poll interval in milliseconds
    #[arg(short = 'i', long = "interval", value_name = "MS", default_value = "250")]
    interval_ms: u64,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Parse a chip address given as decimal or 0x-prefixed hex
fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid I2C address {s:?}: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Allow RUST_LOG to override the CLI setting
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting chargemon v{}", env!("CARGO_PKG_VERSION"));

    let config = Config {
        bus_path: cli.bus,
        bus_address: cli.address,
        rsense_ohms: cli.rsense,
        cell_count: cli.cells,
        poll_interval: Duration::from_millis(cli.interval_ms),
    };
    config.validate()?;

    let mut bus = SmbusRegisterBus::open(&config.bus_path, config.bus_address)?;
    info!(
        "polling {} at 0x{:02X} every {:?}",
        config.bus_path, config.bus_address, config.poll_interval
    );

    let mut surface = TerminalSurface::new().context("initializing terminal")?;
    let mut poll = PollLoop::new(
        ChargerSource::new(config.rsense_ohms, config.cell_count),
        Dashboard::new(),
        config.poll_interval,
    );
    poll.run(&mut bus, &mut surface, ui::quit_requested)
}
