//! RTC chip families and register maps
//!
//! This module describes the two supported clock chip families, their
//! register addresses and the bit fields the time codec cares about.

mod flags;
pub mod registers;
mod types;

pub use flags::{Max6902Control, MonthCentury};
pub use types::*;
