//! Transport trait definitions
//!
//! These traits use `maybe_async` to support both sync and async modes.
//! - By default, traits are async (suitable for Embassy, tokio)
//! - With the `is_sync` feature, traits become synchronous

use crate::error::Result;
use crate::spi::SpiCommand;
use maybe_async::maybe_async;

/// SPI Master trait (sync or async depending on `is_sync` feature)
///
/// This trait represents a bus master that can run one chip-select framed
/// transaction: write the command byte and any write data, then read
/// `read_buf.len()` bytes, all under a single chip-select assertion.
///
/// Implementations configure the bus for the RTC (SPI mode 3, 8-bit words)
/// when they are opened. A failed or short transfer is reported as
/// [`Error::SpiTransferFailed`](crate::error::Error::SpiTransferFailed);
/// implementations never retry on their own.
///
/// ## Example
///
/// ```ignore
/// #[maybe_async]
/// impl SpiMaster for MyBus {
///     async fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
///         default_execute(cmd, |write_data, read_buf| {
///             self.transfer(write_data, read_buf).await
///         })
///     }
/// }
/// ```
#[maybe_async(AFIT)]
pub trait SpiMaster {
    /// Execute a single SPI transaction
    ///
    /// The command contains all the information needed for the transaction:
    /// - `command`: The command byte (register address + read/write bit)
    /// - `write_data`: Data to write after the command byte
    /// - `read_buf`: Buffer to read data into
    async fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()>;
}

// Blanket impl for boxed SPI masters to allow trait objects (sync mode only)
// In async mode, traits with async fn are not object-safe
#[cfg(all(feature = "alloc", feature = "is_sync"))]
impl SpiMaster for alloc::boxed::Box<dyn SpiMaster + Send> {
    fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        (**self).execute(cmd)
    }
}

/// Helper function for implementing `SpiMaster::execute()`.
///
/// Most backends follow the same pattern:
/// 1. Build a write buffer from the command byte + write data
/// 2. Call an internal transfer method
///
/// This function handles step 1, delegating step 2 to the provided closure.
/// The closure receives the write data and the read buffer to fill directly.
///
/// # Example
///
/// ```ignore
/// fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> CoreResult<()> {
///     default_execute(cmd, |write_data, read_buf| {
///         self.spi_transfer(write_data, read_buf)
///             .map_err(|_| CoreError::SpiTransferFailed)
///     })
/// }
/// ```
#[cfg(feature = "alloc")]
pub fn default_execute<F>(cmd: &mut SpiCommand<'_>, transfer_fn: F) -> Result<()>
where
    F: FnOnce(&[u8], &mut [u8]) -> Result<()>,
{
    let mut write_data = alloc::vec![0u8; cmd.write_len()];
    cmd.encode_write(&mut write_data);

    transfer_fn(&write_data, cmd.read_buf)
}
