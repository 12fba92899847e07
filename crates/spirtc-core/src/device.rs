//! RTC device handle
//!
//! [`RtcDevice`] owns the SPI master and the protocol of the chip found on
//! it. The family is fixed at construction; every call goes through the
//! same [`Protocol`].

use crate::chip::{ChipFamily, Register};
use crate::detect::Detector;
use crate::error::{Error, Result};
use crate::programmer::SpiMaster;
use crate::protocol::{ChipProtocol, Protocol};
use crate::time::CalendarTime;
use maybe_async::maybe_async;

/// Clock access as used by an RTC framework
#[maybe_async(AFIT)]
pub trait RtcOps {
    /// Read the current time
    async fn read_time(&mut self) -> Result<CalendarTime>;

    /// Set the current time
    async fn set_time(&mut self, time: &CalendarTime) -> Result<()>;
}

/// Register address, either raw or by logical name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAddr {
    /// Raw address (0x00-0x7F)
    Raw(u8),
    /// Logical register, resolved through the family's register map
    Named(Register),
}

impl From<u8> for RegisterAddr {
    fn from(addr: u8) -> Self {
        Self::Raw(addr)
    }
}

impl From<Register> for RegisterAddr {
    fn from(reg: Register) -> Self {
        Self::Named(reg)
    }
}

/// A detected RTC chip on an SPI master
pub struct RtcDevice<M> {
    master: M,
    protocol: Protocol,
}

impl<M: SpiMaster> RtcDevice<M> {
    /// Detect the chip on `master` and bind to its protocol
    ///
    /// Fails with [`Error::DeviceUnreachable`] if the probe cannot talk to
    /// the chip; no device is created in that case.
    #[maybe_async]
    pub async fn probe(mut master: M) -> Result<Self> {
        let family = Detector::new().run(&mut master).await?;
        Ok(Self::with_family(master, family))
    }

    /// Bind to a known chip family without probing
    pub fn with_family(master: M, family: ChipFamily) -> Self {
        Self {
            master,
            protocol: Protocol::for_family(family),
        }
    }

    /// Chip family of this device
    pub fn family(&self) -> ChipFamily {
        self.protocol.family()
    }

    /// Read a register
    #[maybe_async]
    pub async fn get_register(&mut self, reg: impl Into<RegisterAddr>) -> Result<u8> {
        let addr = self.resolve(reg.into())?;
        self.protocol.get_register(&mut self.master, addr).await
    }

    /// Write a register
    #[maybe_async]
    pub async fn set_register(&mut self, reg: impl Into<RegisterAddr>, value: u8) -> Result<()> {
        let addr = self.resolve(reg.into())?;
        self.protocol.set_register(&mut self.master, addr, value).await
    }

    /// Mutable access to the SPI master
    pub fn master_mut(&mut self) -> &mut M {
        &mut self.master
    }

    /// Release the SPI master
    pub fn into_inner(self) -> M {
        self.master
    }

    fn resolve(&self, reg: RegisterAddr) -> Result<u8> {
        match reg {
            RegisterAddr::Raw(addr) => Ok(addr),
            RegisterAddr::Named(reg) => self
                .family()
                .register_map()
                .address(reg)
                .ok_or(Error::RegisterUnavailable),
        }
    }
}

#[maybe_async(AFIT)]
impl<M: SpiMaster> RtcOps for RtcDevice<M> {
    async fn read_time(&mut self) -> Result<CalendarTime> {
        self.protocol.read_time(&mut self.master).await
    }

    async fn set_time(&mut self, time: &CalendarTime) -> Result<()> {
        self.protocol.set_time(&mut self.master, time).await
    }
}

impl<M> core::fmt::Debug for RtcDevice<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RtcDevice")
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "is_sync"))]
mod tests {
    extern crate std;

    use super::*;
    use crate::detect::TRICKLE_PROBE;
    use crate::protocol::mock::MockSpi;
    use std::vec;

    #[test]
    fn test_probe_binds_family() {
        let spi = MockSpi::new().respond(&[TRICKLE_PROBE]);
        let dev = RtcDevice::probe(spi).unwrap();
        assert_eq!(dev.family(), ChipFamily::Ds1391);

        let spi = MockSpi::new().respond(&[0x00]);
        let dev = RtcDevice::probe(spi).unwrap();
        assert_eq!(dev.family(), ChipFamily::Max6902);
    }

    #[test]
    fn test_probe_failure_aborts() {
        let spi = MockSpi::new().fail_at(1);
        assert_eq!(
            RtcDevice::probe(spi).map(|d| d.family()),
            Err(Error::DeviceUnreachable)
        );
    }

    #[test]
    fn test_named_register_uses_family_map() {
        let mut dev = RtcDevice::with_family(MockSpi::new().respond(&[0x20]), ChipFamily::Max6902);
        assert_eq!(dev.get_register(Register::Century), Ok(0x20));
        dev.set_register(Register::Control, 0x80).unwrap();
        assert_eq!(dev.master_mut().writes(), [vec![0x93], vec![0x0F, 0x80]]);

        let mut dev = RtcDevice::with_family(MockSpi::new(), ChipFamily::Ds1391);
        assert_eq!(
            dev.get_register(Register::Century),
            Err(Error::RegisterUnavailable)
        );
        assert!(dev.into_inner().transfers.is_empty());
    }

    #[test]
    fn test_raw_register_out_of_range() {
        let mut dev = RtcDevice::with_family(MockSpi::new(), ChipFamily::Ds1391);
        assert_eq!(
            dev.set_register(0x80u8, 0x00),
            Err(Error::InvalidRegister { addr: 0x80 })
        );
    }

    #[test]
    fn test_rtc_ops_forward_to_protocol() {
        let spi = MockSpi::new().respond(&[0x00, 0x30, 0x10, 0x02, 0x15, 0x81, 0x24, 0x00]);
        let mut dev = RtcDevice::with_family(spi, ChipFamily::Ds1391);
        let t = dev.read_time().unwrap();
        assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 2));

        dev.set_time(&t).unwrap();
        assert_eq!(dev.master_mut().transfers.len(), 2);
        assert_eq!(dev.master_mut().transfers[1].write[0], 0x81);
    }
}
