//! spirtc - DS1391/MAX6902 SPI real-time clock tool
//!
//! Reads and sets the time of a DS1391/DS1393/DS1394 or MAX6902 clock chip
//! behind an SPI transport.
//!
//! # Architecture
//!
//! The chip family is detected once when the device is opened (or given
//! with `--chip`). Every command then goes through the same
//! `RtcDevice`, which frames register accesses for that family.

mod cli;
mod commands;
mod config;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands, ProgrammerArgs};
use config::Config;
use programmers::BoxedMaster;
use spirtc_core::RtcDevice;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Probe { programmer } => {
            let rtc = open(&programmer, &config)?;
            commands::run_probe(&rtc)
        }
        Commands::Read { programmer } => {
            let mut rtc = open(&programmer, &config)?;
            commands::run_read(&mut rtc)
        }
        Commands::Set {
            programmer,
            time,
            weekday,
        } => {
            // Parse before touching the bus
            let time = commands::parse_time(&time, weekday)?;
            let mut rtc = open(&programmer, &config)?;
            commands::run_set(&mut rtc, &time)
        }
        Commands::Systohc { programmer } => {
            let mut rtc = open(&programmer, &config)?;
            commands::run_systohc(&mut rtc)
        }
        Commands::GetReg { programmer, reg } => {
            let mut rtc = open(&programmer, &config)?;
            commands::run_get_reg(&mut rtc, reg)
        }
        Commands::SetReg {
            programmer,
            reg,
            value,
        } => {
            let mut rtc = open(&programmer, &config)?;
            commands::run_set_reg(&mut rtc, reg, value)
        }
        Commands::ListProgrammers => {
            commands::list_programmers();
            Ok(())
        }
    }
}

/// Open the RTC named on the command line, falling back to the config file
fn open(
    args: &ProgrammerArgs,
    config: &Config,
) -> Result<RtcDevice<BoxedMaster>, Box<dyn std::error::Error>> {
    let programmer = args
        .programmer
        .as_deref()
        .or(config.programmer.as_deref())
        .ok_or_else(|| {
            format!(
                "No programmer given. Use -p or set `programmer` in spirtc.toml\n\n{}",
                programmers::programmer_help()
            )
        })?;
    let chip = args.chip.or(config.chip);

    programmers::open_rtc(programmer, chip)
}
