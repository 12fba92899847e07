//! CLI argument parsing

use clap::{Parser, Subcommand};
use spirtc_core::{ChipFamily, Register, RegisterAddr};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u8
pub fn parse_hex_u8(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u8>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a register given by name (e.g. `control`) or address (e.g. `0x0F`)
pub fn parse_register(s: &str) -> Result<RegisterAddr, String> {
    if let Some(reg) = Register::from_name(s) {
        return Ok(RegisterAddr::Named(reg));
    }
    let addr = parse_hex_u8(s).map_err(|_| format!("Unknown register: {}", s))?;
    if addr > 0x7F {
        return Err(format!("Register address 0x{:02X} out of range (0x00-0x7F)", addr));
    }
    Ok(RegisterAddr::Raw(addr))
}

/// Parse a chip family name (e.g. `ds1391`, `MAX6902`)
pub fn parse_chip(s: &str) -> Result<ChipFamily, String> {
    ChipFamily::from_name(s)
        .ok_or_else(|| format!("Unknown chip: {} (expected ds1391 or max6902)", s))
}

#[derive(Parser)]
#[command(name = "spirtc")]
#[command(author, version, about = "DS1391/MAX6902 SPI real-time clock tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (TOML)
    /// Defaults to ./spirtc.toml, then /etc/spirtc.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Programmer options shared across commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProgrammerArgs {
    /// Programmer to use, e.g. linux_spi:dev=/dev/spidev1.0 or dummy:chip=max6902
    /// (overrides the configuration file)
    #[arg(short, long)]
    pub programmer: Option<String>,

    /// Chip family (ds1391 or max6902); skips autodetection
    #[arg(short, long, value_parser = parse_chip)]
    pub chip: Option<ChipFamily>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the RTC chip family
    Probe {
        #[command(flatten)]
        programmer: ProgrammerArgs,
    },

    /// Print the current time of the RTC
    Read {
        #[command(flatten)]
        programmer: ProgrammerArgs,
    },

    /// Set the RTC time
    Set {
        #[command(flatten)]
        programmer: ProgrammerArgs,

        /// Time to set, "YYYY-MM-DD HH:MM:SS"
        #[arg(short, long)]
        time: String,

        /// Day of week 1-7 (default: ISO weekday of the date, Monday = 1)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
        weekday: Option<u8>,
    },

    /// Set the RTC from the system's local time
    Systohc {
        #[command(flatten)]
        programmer: ProgrammerArgs,
    },

    /// Read a raw register
    GetReg {
        #[command(flatten)]
        programmer: ProgrammerArgs,

        /// Register name or address (hex or decimal)
        #[arg(short, long, value_parser = parse_register)]
        reg: RegisterAddr,
    },

    /// Write a raw register
    SetReg {
        #[command(flatten)]
        programmer: ProgrammerArgs,

        /// Register name or address (hex or decimal)
        #[arg(short, long, value_parser = parse_register)]
        reg: RegisterAddr,

        /// Value to write (hex or decimal)
        #[arg(long, value_parser = parse_hex_u8)]
        value: u8,
    },

    /// List available programmers
    ListProgrammers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u8() {
        assert_eq!(parse_hex_u8("0x0F"), Ok(0x0F));
        assert_eq!(parse_hex_u8("0XA6"), Ok(0xA6));
        assert_eq!(parse_hex_u8("19"), Ok(19));
        assert!(parse_hex_u8("0x100").is_err());
        assert!(parse_hex_u8("ten").is_err());
    }

    #[test]
    fn test_parse_register() {
        assert_eq!(
            parse_register("Century"),
            Ok(RegisterAddr::Named(Register::Century))
        );
        assert_eq!(parse_register("0x13"), Ok(RegisterAddr::Raw(0x13)));
        assert!(parse_register("0x80").is_err());
        assert!(parse_register("alarm").is_err());
    }

    #[test]
    fn test_parse_chip() {
        assert_eq!(parse_chip("DS1393"), Ok(ChipFamily::Ds1391));
        assert_eq!(parse_chip("max6902"), Ok(ChipFamily::Max6902));
        assert!(parse_chip("ds3231").is_err());

        let cli = Cli::try_parse_from(["spirtc", "read", "-c", "max6902"]).unwrap();
        match cli.command {
            Commands::Read { programmer } => {
                assert_eq!(programmer.chip, Some(ChipFamily::Max6902));
            }
            _ => panic!("expected read"),
        }
    }

    #[test]
    fn test_cli_parses_set() {
        let cli = Cli::try_parse_from([
            "spirtc",
            "set",
            "-p",
            "dummy",
            "--time",
            "2024-01-15 10:30:00",
            "--weekday",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Set {
                programmer,
                time,
                weekday,
            } => {
                assert_eq!(programmer.programmer.as_deref(), Some("dummy"));
                assert_eq!(time, "2024-01-15 10:30:00");
                assert_eq!(weekday, Some(2));
            }
            _ => panic!("expected set"),
        }

        assert!(Cli::try_parse_from(["spirtc", "set", "--time", "x", "--weekday", "8"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
