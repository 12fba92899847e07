//! SPI types and command structures
//!
//! This module provides the transaction type used by every RTC register
//! access and the SPI bus modes a transport can be configured with.

mod command;
mod mode;

pub use command::{SpiCommand, MAX_TRANSACTION_LEN};
pub use mode::SpiMode;
