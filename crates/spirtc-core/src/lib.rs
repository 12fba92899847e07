//! spirtc-core - Core library for SPI real-time clock chips
//!
//! This crate talks to the DS1391/DS1393/DS1394 and MAX6902 clock chips
//! over a generic SPI master. It detects which of the two families is
//! present, frames register accesses for it and converts the BCD clock
//! registers to and from a calendar time. It is designed to be `no_std`
//! compatible for use in embedded environments.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`)
//! - `alloc` - Enable heap allocation for boxed SPI masters
//! - `is_sync` - Blocking API instead of async
//!
//! # Example
//!
//! ```ignore
//! use spirtc_core::{RtcDevice, RtcOps, programmer::SpiMaster};
//!
//! fn show_time<M: SpiMaster>(master: M) {
//!     match RtcDevice::probe(master) {
//!         Ok(mut rtc) => {
//!             println!("Found: {}", rtc.family());
//!             match rtc.read_time() {
//!                 Ok(t) => println!("Time: {}", t),
//!                 Err(e) => println!("Read failed: {}", e),
//!             }
//!         }
//!         Err(e) => println!("Probe failed: {}", e),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// Allow async fn in traits - we use maybe-async for dual sync/async support
#![allow(async_fn_in_trait)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod chip;
pub mod codec;
pub mod detect;
pub mod device;
pub mod error;
pub mod programmer;
pub mod protocol;
pub mod spi;
pub mod time;

pub use chip::{ChipFamily, Register};
pub use device::{RegisterAddr, RtcDevice, RtcOps};
pub use error::{Error, Result};
pub use time::CalendarTime;
