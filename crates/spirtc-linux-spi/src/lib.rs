//! spirtc-linux-spi - Linux spidev transport
//!
//! This crate lets spirtc reach a DS1391 or MAX6902 clock through the
//! `/dev/spidevX.Y` device interface.
//!
//! # Overview
//!
//! The Linux SPI driver exposes SPI controllers through character devices
//! at `/dev/spidevX.Y` where X is the bus number and Y is the chip select.
//! Both clock families need SPI mode 3 with 8-bit words, which is what
//! [`LinuxSpiConfig::default`] selects.
//!
//! # Example
//!
//! ```no_run
//! use spirtc_linux_spi::{LinuxSpi, LinuxSpiConfig};
//! use spirtc_core::{RtcDevice, RtcOps};
//!
//! // Open with default settings (1 MHz, mode 3)
//! let spi = LinuxSpi::open_device("/dev/spidev1.0")?;
//!
//! // Or with custom settings
//! let config = LinuxSpiConfig::new("/dev/spidev1.0").with_speed(500_000);
//! let spi = LinuxSpi::open(&config)?;
//!
//! let mut rtc = RtcDevice::probe(spi)?;
//! println!("{}: {}", rtc.family(), rtc.read_time()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with spirtc CLI
//!
//! ```bash
//! # Probe chip using default settings
//! spirtc probe -p linux_spi:dev=/dev/spidev1.0
//!
//! # Specify SPI speed in kHz
//! spirtc read -p linux_spi:dev=/dev/spidev1.0,spispeed=500
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with spidev support enabled (`CONFIG_SPI_SPIDEV`)
//! - Read/write access to `/dev/spidevX.Y` device
//! - May require adding user to `spi` group or using udev rules

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_options, LinuxSpi, LinuxSpiConfig};
pub use error::{LinuxSpiError, Result};

/// Open a Linux SPI device and return a boxed SpiMaster
///
/// This is a convenience function for use in the CLI programmer dispatch.
///
/// # Example Options
///
/// - `dev=/dev/spidev1.0` - Required: device path
/// - `spispeed=500` - Optional: speed in kHz (default: 1000)
/// - `mode=3` - Optional: SPI mode 0-3 (default: 3)
pub fn open_linux_spi(
    options: &[(&str, &str)],
) -> std::result::Result<
    Box<dyn spirtc_core::programmer::SpiMaster + Send>,
    Box<dyn std::error::Error>,
> {
    let config = parse_options(options)?;
    let spi = LinuxSpi::open(&config)?;
    Ok(Box::new(spi))
}
