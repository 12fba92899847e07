//! RTC chip protocols
//!
//! Each chip family has its own register map, command bit polarity and
//! clock register layout. Both families implement [`ChipProtocol`]; a
//! [`Protocol`] value picks one of them once and is then used for every
//! access.
//!
//! Uses `maybe_async` to support both sync and async modes:
//! - With `is_sync` feature: blocking/synchronous
//! - Without `is_sync` feature: async (for Embassy, tokio)

mod ds1391;
mod max6902;

pub use ds1391::Ds1391;
pub use max6902::Max6902;

use crate::chip::ChipFamily;
use crate::codec;
use crate::error::Result;
use crate::programmer::SpiMaster;
use crate::spi::SpiCommand;
use crate::time::CalendarTime;
use maybe_async::maybe_async;

/// Register and clock access for one chip family
///
/// All methods are single blocking operations on the bus. None of them
/// retry; a transport error is returned as-is.
#[maybe_async(AFIT)]
pub trait ChipProtocol {
    /// Family this protocol speaks to
    fn family(&self) -> ChipFamily;

    /// Read one register
    async fn get_register<M: SpiMaster + ?Sized>(&self, master: &mut M, addr: u8) -> Result<u8>;

    /// Write one register
    async fn set_register<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        addr: u8,
        value: u8,
    ) -> Result<()>;

    /// Read the clock
    ///
    /// Fails with [`Error::CalendarInvalid`](crate::error::Error::CalendarInvalid)
    /// if the registers do not hold a valid date and time.
    async fn read_time<M: SpiMaster + ?Sized>(&self, master: &mut M) -> Result<CalendarTime>;

    /// Set the clock
    ///
    /// The time is validated before anything is sent to the chip.
    async fn set_time<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        time: &CalendarTime,
    ) -> Result<()>;
}

/// Protocol of the detected chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// DS1391/93/94
    Ds1391(Ds1391),
    /// MAX6902
    Max6902(Max6902),
}

impl Protocol {
    /// Protocol for `family`
    pub const fn for_family(family: ChipFamily) -> Self {
        match family {
            ChipFamily::Ds1391 => Self::Ds1391(Ds1391),
            ChipFamily::Max6902 => Self::Max6902(Max6902),
        }
    }
}

#[maybe_async(AFIT)]
impl ChipProtocol for Protocol {
    fn family(&self) -> ChipFamily {
        match self {
            Self::Ds1391(p) => p.family(),
            Self::Max6902(p) => p.family(),
        }
    }

    async fn get_register<M: SpiMaster + ?Sized>(&self, master: &mut M, addr: u8) -> Result<u8> {
        match self {
            Self::Ds1391(p) => p.get_register(master, addr).await,
            Self::Max6902(p) => p.get_register(master, addr).await,
        }
    }

    async fn set_register<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        addr: u8,
        value: u8,
    ) -> Result<()> {
        match self {
            Self::Ds1391(p) => p.set_register(master, addr, value).await,
            Self::Max6902(p) => p.set_register(master, addr, value).await,
        }
    }

    async fn read_time<M: SpiMaster + ?Sized>(&self, master: &mut M) -> Result<CalendarTime> {
        match self {
            Self::Ds1391(p) => p.read_time(master).await,
            Self::Max6902(p) => p.read_time(master).await,
        }
    }

    async fn set_time<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        time: &CalendarTime,
    ) -> Result<()> {
        match self {
            Self::Ds1391(p) => p.set_time(master, time).await,
            Self::Max6902(p) => p.set_time(master, time).await,
        }
    }
}

/// Read a single register: command byte out, one byte in
#[maybe_async]
pub(crate) async fn read_register<M: SpiMaster + ?Sized>(
    master: &mut M,
    family: ChipFamily,
    addr: u8,
) -> Result<u8> {
    let command = codec::read_command(addr, family)?;
    let mut buf = [0u8; 1];
    let mut cmd = SpiCommand::read_reg(command, &mut buf);
    master.execute(&mut cmd).await?;
    log::trace!("{}: read  0x{:02X} -> 0x{:02X}", family, addr, buf[0]);
    Ok(buf[0])
}

/// Write a single register: command byte and data byte out, nothing in
#[maybe_async]
pub(crate) async fn write_register<M: SpiMaster + ?Sized>(
    master: &mut M,
    family: ChipFamily,
    addr: u8,
    value: u8,
) -> Result<()> {
    let command = codec::write_command(addr, family)?;
    let data = [value];
    let mut cmd = SpiCommand::write_reg(command, &data);
    master.execute(&mut cmd).await?;
    log::trace!("{}: write 0x{:02X} <- 0x{:02X}", family, addr, value);
    Ok(())
}
