//! Transport traits and abstractions
//!
//! This module defines the trait every SPI backend implements so the RTC
//! protocols can talk to a chip.

mod traits;

pub use traits::*;
