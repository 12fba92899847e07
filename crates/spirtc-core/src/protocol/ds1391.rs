//! DS1391/DS1393/DS1394 protocol
//!
//! The clock registers 0x01-0x07 are read and written as one burst:
//!
//! ```text
//! Seconds Minutes Hours Day Date Month/Century Year
//! ```
//!
//! The century is a single flag in bit 7 of the month register, giving a
//! range of 1900-2099. A register address with bit 7 set is a write.

use super::{read_register, write_register, ChipProtocol};
use crate::chip::registers::ds1391;
use crate::chip::{ChipFamily, MonthCentury};
use crate::codec::{self, decode_bcd, encode_bcd};
use crate::error::Result;
use crate::programmer::SpiMaster;
use crate::spi::{SpiCommand, MAX_TRANSACTION_LEN};
use crate::time::CalendarTime;
use maybe_async::maybe_async;

/// Bytes returned by the clock burst read
///
/// Seven clock registers followed by the first alarm register, which is
/// ignored.
pub const BURST_LEN: usize = 8;

/// Number of clock registers written by a burst write
pub const CLOCK_LEN: usize = 7;

const BASE_YEAR: u16 = 1900;

/// DS1391 family protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ds1391;

impl Ds1391 {
    /// Decode the clock burst into a calendar time
    pub fn decode_clock(regs: &[u8; BURST_LEN]) -> Result<CalendarTime> {
        let month_reg = MonthCentury::from_bits_retain(regs[5]);
        let century = if month_reg.contains(MonthCentury::CENTURY) {
            100
        } else {
            0
        };

        let time = CalendarTime {
            second: decode_bcd(regs[0])?,
            minute: decode_bcd(regs[1])?,
            hour: decode_bcd(regs[2])?,
            weekday: decode_bcd(regs[3])?,
            day: decode_bcd(regs[4])?,
            month: decode_bcd(regs[5] & MonthCentury::MONTH_MASK)?,
            year: BASE_YEAR + century + u16::from(decode_bcd(regs[6])?),
        };

        time.validate()?;
        Ok(time)
    }

    /// Encode a calendar time into the seven clock registers
    pub fn encode_clock(time: &CalendarTime) -> Result<[u8; CLOCK_LEN]> {
        time.check_writable(ChipFamily::Ds1391)?;

        let mut month = encode_bcd(time.month)?;
        if time.year >= 2000 {
            month |= MonthCentury::CENTURY.bits();
        }

        Ok([
            encode_bcd(time.second)?,
            encode_bcd(time.minute)?,
            encode_bcd(time.hour)?,
            encode_bcd(time.weekday)?,
            encode_bcd(time.day)?,
            month,
            encode_bcd((time.year % 100) as u8)?,
        ])
    }
}

#[maybe_async(AFIT)]
impl ChipProtocol for Ds1391 {
    fn family(&self) -> ChipFamily {
        ChipFamily::Ds1391
    }

    async fn get_register<M: SpiMaster + ?Sized>(&self, master: &mut M, addr: u8) -> Result<u8> {
        read_register(master, ChipFamily::Ds1391, addr).await
    }

    async fn set_register<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        addr: u8,
        value: u8,
    ) -> Result<()> {
        write_register(master, ChipFamily::Ds1391, addr, value).await
    }

    async fn read_time<M: SpiMaster + ?Sized>(&self, master: &mut M) -> Result<CalendarTime> {
        let command = codec::read_command(ds1391::SECONDS, ChipFamily::Ds1391)?;
        let mut regs = [0u8; BURST_LEN];
        let mut cmd = SpiCommand::read_reg(command, &mut regs);
        master.execute(&mut cmd).await?;

        log::trace!("ds1391: clock registers {:02X?}", regs);
        Self::decode_clock(&regs)
    }

    async fn set_time<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        time: &CalendarTime,
    ) -> Result<()> {
        let mut txn = [0u8; MAX_TRANSACTION_LEN];
        txn[0] = codec::write_command(ds1391::SECONDS, ChipFamily::Ds1391)?;
        txn[1..=CLOCK_LEN].copy_from_slice(&Self::encode_clock(time)?);

        let mut cmd = SpiCommand::write_reg(txn[0], &txn[1..=CLOCK_LEN]);
        master.execute(&mut cmd).await?;

        log::debug!("ds1391: clock set to {}", time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_century_bit_set_for_2023() {
        let t = CalendarTime::new(2023, 6, 1, 12, 0, 0, 4);
        let regs = Ds1391::encode_clock(&t).unwrap();
        assert_eq!(regs[5], 0x86);
        assert_eq!(regs[6], 0x23);
    }

    #[test]
    fn test_century_bit_clear_for_1999() {
        let t = CalendarTime::new(1999, 12, 31, 23, 59, 59, 5);
        let regs = Ds1391::encode_clock(&t).unwrap();
        assert_eq!(regs, [0x59, 0x59, 0x23, 0x05, 0x31, 0x12, 0x99]);
    }

    #[test]
    fn test_decode_clock() {
        let regs = [0x00, 0x30, 0x10, 0x02, 0x15, 0x81, 0x24, 0xFF];
        let t = Ds1391::decode_clock(&regs).unwrap();
        assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 2));
    }

    #[test]
    fn test_decode_rejects_bad_bcd() {
        let regs = [0x5A, 0x30, 0x10, 0x02, 0x15, 0x01, 0x24, 0x00];
        assert_eq!(
            Ds1391::decode_clock(&regs),
            Err(Error::InvalidBcd { raw: 0x5A })
        );
    }

    #[test]
    fn test_decode_rejects_invalid_calendar() {
        // 31 February
        let regs = [0x00, 0x00, 0x00, 0x01, 0x31, 0x02, 0x24, 0x00];
        assert_eq!(Ds1391::decode_clock(&regs), Err(Error::CalendarInvalid));
        // Month 13 is valid BCD but not a month
        let regs = [0x00, 0x00, 0x00, 0x01, 0x01, 0x13, 0x24, 0x00];
        assert_eq!(Ds1391::decode_clock(&regs), Err(Error::CalendarInvalid));
    }

    fn round_trip(t: &CalendarTime) -> Result<CalendarTime> {
        let clock = Ds1391::encode_clock(t)?;
        let mut regs = [0u8; BURST_LEN];
        regs[..CLOCK_LEN].copy_from_slice(&clock);
        Ds1391::decode_clock(&regs)
    }

    #[test]
    fn test_round_trip_every_year() {
        for year in 1900..=2099u16 {
            let t = CalendarTime::new(year, 1, 1, 0, 0, 0, 1);
            assert_eq!(round_trip(&t), Ok(t), "{}", year);

            let t = CalendarTime::new(year, 12, 31, 23, 59, 59, 7);
            assert_eq!(round_trip(&t), Ok(t), "{}", year);
        }
    }

    #[test]
    fn test_round_trip_last_day_of_every_month() {
        use chrono::NaiveDate;

        for year in 1900..=2099u16 {
            for month in 1..=12u8 {
                let exists = |d: u8| NaiveDate::from_ymd_opt(year.into(), month.into(), d.into());
                let last = (28..=31u8).rev().find(|d| exists(*d).is_some()).unwrap();

                let t = CalendarTime::new(year, month, last, 12, 34, 56, 4);
                assert_eq!(round_trip(&t), Ok(t), "{}-{:02}", year, month);

                let t = CalendarTime::new(year, month, last + 1, 12, 34, 56, 4);
                assert_eq!(round_trip(&t), Err(Error::CalendarInvalid));
            }
        }
    }

    #[test]
    fn test_encode_rejects_out_of_range_year() {
        let t = CalendarTime::new(2100, 1, 1, 0, 0, 0, 5);
        assert_eq!(
            Ds1391::encode_clock(&t),
            Err(Error::PrecisionLoss { value: 2100 })
        );
    }

    #[cfg(feature = "is_sync")]
    mod wire {
        extern crate std;

        use super::*;
        use crate::protocol::mock::MockSpi;
        use std::vec;

        #[test]
        fn test_read_time_is_one_burst() {
            let mut spi =
                MockSpi::new().respond(&[0x00, 0x30, 0x10, 0x02, 0x15, 0x81, 0x24, 0x00]);
            let t = Ds1391.read_time(&mut spi).unwrap();

            assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 2));
            assert_eq!(spi.transfers.len(), 1);
            assert_eq!(spi.transfers[0].write, [0x01]);
            assert_eq!(spi.transfers[0].read_len, BURST_LEN);
        }

        #[test]
        fn test_set_time_is_one_burst() {
            let mut spi = MockSpi::new();
            let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 2);
            Ds1391.set_time(&mut spi, &t).unwrap();

            assert_eq!(
                spi.writes(),
                [[0x81, 0x00, 0x30, 0x10, 0x02, 0x15, 0x81, 0x24]]
            );
            assert_eq!(spi.transfers[0].read_len, 0);
        }

        #[test]
        fn test_register_access_polarity() {
            let mut spi = MockSpi::new().respond(&[0xA6]);
            Ds1391.set_register(&mut spi, 0x0F, 0xA6).unwrap();
            assert_eq!(Ds1391.get_register(&mut spi, 0x0F), Ok(0xA6));

            assert_eq!(spi.writes(), [vec![0x8F, 0xA6], vec![0x0F]]);
            assert_eq!(spi.transfers[1].read_len, 1);
        }

        #[test]
        fn test_invalid_time_sends_nothing() {
            let mut spi = MockSpi::new();
            let t = CalendarTime::new(2024, 13, 1, 0, 0, 0, 1);
            assert_eq!(Ds1391.set_time(&mut spi, &t), Err(Error::CalendarInvalid));
            assert!(spi.transfers.is_empty());
        }

        #[test]
        fn test_transport_error_propagates() {
            let mut spi = MockSpi::new().fail_at(0);
            assert_eq!(Ds1391.read_time(&mut spi), Err(Error::SpiTransferFailed));
        }
    }
}
