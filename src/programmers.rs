//! Programmer registration and dispatch
//!
//! This module provides a centralized registry for all transports, with
//! support for feature-gated inclusion and dynamic help text generation.

use spirtc_core::programmer::SpiMaster;
use spirtc_core::{ChipFamily, RtcDevice};

/// Boxed transport as handed to the RTC device
pub type BoxedMaster = Box<dyn SpiMaster + Send>;

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    let mut programmers = Vec::new();

    #[cfg(feature = "dummy")]
    programmers.push(ProgrammerInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory RTC emulator for testing (chip=ds1391|max6902)",
    });

    #[cfg(feature = "linux-spi")]
    programmers.push(ProgrammerInfo {
        name: "linux_spi",
        aliases: &["linux-spi", "spidev"],
        description: "Linux spidev interface (dev=/dev/spidevX.Y,spispeed=<kHz>,mode=<0-3>)",
    });

    programmers
}

/// Generate help text listing all available programmers
pub fn programmer_help() -> String {
    let programmers = available_programmers();

    if programmers.is_empty() {
        return "No programmers available (recompile with programmer features enabled)".to_string();
    }

    let mut help = String::from("Available programmers:\n");
    for p in &programmers {
        help.push_str(&format!("  {:12} - {}\n", p.name, p.description));
        if !p.aliases.is_empty() {
            help.push_str(&format!("  {:12}   aliases: {}\n", "", p.aliases.join(", ")));
        }
    }
    help
}

/// Resolve a programmer name or alias to its primary name
pub fn find_programmer(name: &str) -> Option<&'static str> {
    available_programmers()
        .into_iter()
        .find(|p| p.name == name || p.aliases.iter().any(|a| *a == name))
        .map(|p| p.name)
}

/// Parse a programmer string into name and options
///
/// Format: "name" or "name:option1=value1,option2=value2"
pub fn parse_programmer_string(s: &str) -> (&str, Vec<(&str, &str)>) {
    if let Some((name, opts)) = s.split_once(':') {
        let options: Vec<_> = opts
            .split(',')
            .filter_map(|opt| opt.split_once('='))
            .collect();
        (name, options)
    } else {
        (s, Vec::new())
    }
}

/// Open the transport named by a programmer string
#[allow(unused_variables)]
pub fn open_programmer(programmer: &str) -> Result<BoxedMaster, Box<dyn std::error::Error>> {
    let (name, options) = parse_programmer_string(programmer);

    let canonical_name = find_programmer(name).ok_or_else(|| unknown_programmer_error(name))?;

    match canonical_name {
        #[cfg(feature = "dummy")]
        "dummy" => spirtc_dummy::open_dummy(&options)
            .map_err(|e| -> Box<dyn std::error::Error> {
                format!("Invalid dummy parameters: {}", e).into()
            }),

        #[cfg(feature = "linux-spi")]
        "linux_spi" => {
            log::info!("Opening Linux SPI programmer...");
            spirtc_linux_spi::open_linux_spi(&options).map_err(|e| -> Box<dyn std::error::Error> {
                format!(
                    "Failed to open Linux SPI device: {}\n\
                     Make sure the device exists and you have read/write permissions.\n\
                     You may need to: sudo usermod -aG spi $USER",
                    e
                )
                .into()
            })
        }

        _ => Err(unknown_programmer_error(name)),
    }
}

/// Open a programmer and bind an RTC device to it
///
/// With `chip` given the family is taken as-is, otherwise it is probed.
pub fn open_rtc(
    programmer: &str,
    chip: Option<ChipFamily>,
) -> Result<RtcDevice<BoxedMaster>, Box<dyn std::error::Error>> {
    let master = open_programmer(programmer)?;

    match chip {
        Some(family) => {
            log::info!("Using {} without probing", family);
            Ok(RtcDevice::with_family(master, family))
        }
        None => Ok(RtcDevice::probe(master)?),
    }
}

fn unknown_programmer_error(name: &str) -> Box<dyn std::error::Error> {
    let mut msg = format!("Unknown programmer: {}\n\n", name);
    msg.push_str(&programmer_help());
    msg.push_str("\nUse 'spirtc list-programmers' for more details");
    msg.into()
}
