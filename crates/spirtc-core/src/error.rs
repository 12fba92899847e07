//! Error types for spirtc-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Transport errors
    /// SPI transfer failed (no reply from the bus, short read)
    SpiTransferFailed,

    // Codec errors
    /// A register byte holds a nibble above 9
    ///
    /// The chip is malfunctioning or mis-wired; the value is never wrapped.
    InvalidBcd {
        /// The raw register byte
        raw: u8,
    },
    /// Value does not fit the BCD field or the year range of the chip
    PrecisionLoss {
        /// The value that was rejected
        value: u16,
    },
    /// Register address outside the 7-bit register space
    InvalidRegister {
        /// The rejected address
        addr: u8,
    },
    /// The named register does not exist on the detected chip family
    RegisterUnavailable,

    // Time errors
    /// Time fields do not form a valid calendar date and time of day
    CalendarInvalid,

    // Chip errors
    /// A MAX6902 time write failed after write protection was cleared
    ///
    /// Write protection is left disabled and the clock holds a partially
    /// applied time.
    WriteProtectWindow {
        /// Number of clock registers written before the failure
        completed: u8,
    },
    /// The autodetection probe could not talk to the chip
    DeviceUnreachable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
            Self::InvalidBcd { raw } => {
                write!(f, "invalid BCD register value 0x{:02X}", raw)
            }
            Self::PrecisionLoss { value } => {
                write!(f, "value {} does not fit the register encoding", value)
            }
            Self::InvalidRegister { addr } => {
                write!(f, "invalid register address 0x{:02X}", addr)
            }
            Self::RegisterUnavailable => write!(f, "register not present on this chip"),
            Self::CalendarInvalid => write!(f, "invalid calendar time"),
            Self::WriteProtectWindow { completed } => write!(
                f,
                "time write aborted after {} of 8 registers, write protection left disabled",
                completed
            ),
            Self::DeviceUnreachable => write!(f, "RTC device unreachable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
