//! MAX6902 protocol
//!
//! The clock burst (command 0xBF) returns
//!
//! ```text
//! Seconds Minutes Hours Date Month Day Year Control
//! ```
//!
//! The century lives in its own register (0x13) outside the burst, so a
//! time read takes two transactions. A register address with bit 7 set is
//! a read, the opposite of the DS1391.
//!
//! Writes are only accepted while the write protect bit of the control
//! register is clear. Setting the time opens that window, writes each clock
//! register on its own and closes the window again. The sequence is not
//! atomic: if a write in the middle fails, the clock keeps the registers
//! written so far and write protection stays off.

use super::{read_register, write_register, ChipProtocol};
use crate::chip::registers::max6902;
use crate::chip::{ChipFamily, Max6902Control};
use crate::codec::{decode_bcd, encode_bcd};
use crate::error::{Error, Result};
use crate::programmer::SpiMaster;
use crate::spi::SpiCommand;
use crate::time::CalendarTime;
use maybe_async::maybe_async;

/// Bytes returned by the clock burst read (seven clock registers + control)
pub const BURST_LEN: usize = 8;

/// Number of registers written inside the write protect window
pub const WINDOW_WRITES: usize = 8;

/// MAX6902 protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max6902;

impl Max6902 {
    /// Decode the clock burst and the century register into a calendar time
    pub fn decode_clock(regs: &[u8; BURST_LEN], century: u8) -> Result<CalendarTime> {
        let century = u16::from(decode_bcd(century)?);

        let time = CalendarTime {
            second: decode_bcd(regs[0])?,
            minute: decode_bcd(regs[1])?,
            hour: decode_bcd(regs[2])?,
            day: decode_bcd(regs[3])?,
            month: decode_bcd(regs[4])?,
            weekday: decode_bcd(regs[5])?,
            year: century * 100 + u16::from(decode_bcd(regs[6])?),
        };

        time.validate()?;
        Ok(time)
    }

    /// Encode a calendar time into (register, value) writes, in the order
    /// they are sent
    pub fn encode_clock(time: &CalendarTime) -> Result<[(u8, u8); WINDOW_WRITES]> {
        time.check_writable(ChipFamily::Max6902)?;

        Ok([
            (max6902::SECONDS, encode_bcd(time.second)?),
            (max6902::MINUTES, encode_bcd(time.minute)?),
            (max6902::HOURS, encode_bcd(time.hour)?),
            (max6902::DATE, encode_bcd(time.day)?),
            (max6902::MONTH, encode_bcd(time.month)?),
            (max6902::DAY, encode_bcd(time.weekday)?),
            (max6902::YEAR, encode_bcd((time.year % 100) as u8)?),
            (max6902::CENTURY, encode_bcd((time.year / 100) as u8)?),
        ])
    }
}

#[maybe_async(AFIT)]
impl ChipProtocol for Max6902 {
    fn family(&self) -> ChipFamily {
        ChipFamily::Max6902
    }

    async fn get_register<M: SpiMaster + ?Sized>(&self, master: &mut M, addr: u8) -> Result<u8> {
        read_register(master, ChipFamily::Max6902, addr).await
    }

    async fn set_register<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        addr: u8,
        value: u8,
    ) -> Result<()> {
        write_register(master, ChipFamily::Max6902, addr, value).await
    }

    async fn read_time<M: SpiMaster + ?Sized>(&self, master: &mut M) -> Result<CalendarTime> {
        let mut regs = [0u8; BURST_LEN];
        let mut cmd = SpiCommand::read_reg(max6902::CLOCK_BURST_READ, &mut regs);
        master.execute(&mut cmd).await?;

        let century = read_register(master, ChipFamily::Max6902, max6902::CENTURY).await?;

        log::trace!(
            "max6902: clock registers {:02X?}, century 0x{:02X}",
            regs,
            century
        );
        Self::decode_clock(&regs, century)
    }

    async fn set_time<M: SpiMaster + ?Sized>(
        &self,
        master: &mut M,
        time: &CalendarTime,
    ) -> Result<()> {
        let writes = Self::encode_clock(time)?;

        // Remove write protection
        write_register(
            master,
            ChipFamily::Max6902,
            max6902::CONTROL,
            Max6902Control::empty().bits(),
        )
        .await?;

        for (completed, (addr, value)) in writes.iter().enumerate() {
            if let Err(e) = write_register(master, ChipFamily::Max6902, *addr, *value).await {
                log::error!(
                    "max6902: write to 0x{:02X} failed ({}), write protect left off",
                    addr,
                    e
                );
                return Err(Error::WriteProtectWindow {
                    completed: completed as u8,
                });
            }
        }

        // Write protect
        if let Err(e) = write_register(
            master,
            ChipFamily::Max6902,
            max6902::CONTROL,
            Max6902Control::WRITE_PROTECT.bits(),
        )
        .await
        {
            log::error!(
                "max6902: restoring write protection failed ({}), clock set but unprotected",
                e
            );
            return Err(Error::WriteProtectWindow {
                completed: WINDOW_WRITES as u8,
            });
        }

        log::debug!("max6902: clock set to {}", time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_century_register_2023() {
        let t = CalendarTime::new(2023, 3, 14, 15, 9, 26, 2);
        let writes = Max6902::encode_clock(&t).unwrap();
        assert_eq!(writes[6], (max6902::YEAR, 0x23));
        assert_eq!(writes[7], (max6902::CENTURY, 0x20));

        let regs = [0x26, 0x09, 0x15, 0x14, 0x03, 0x02, 0x23, 0x80];
        assert_eq!(Max6902::decode_clock(&regs, 0x20), Ok(t));
        assert_ne!(Max6902::decode_clock(&regs, 0x19), Ok(t));
    }

    #[test]
    fn test_all_centuries() {
        for century in 0..100u16 {
            let year = century * 100 + 42;
            let t = CalendarTime::new(year, 7, 1, 8, 0, 0, 3);
            let writes = Max6902::encode_clock(&t).unwrap();

            let mut regs = [0u8; BURST_LEN];
            for (i, (_, value)) in writes[..7].iter().enumerate() {
                regs[i] = *value;
            }
            let decoded = Max6902::decode_clock(&regs, writes[7].1).unwrap();
            assert_eq!(decoded.year, year);
            assert_eq!(decoded, t);
        }
    }

    #[test]
    fn test_burst_order_differs_from_ds1391() {
        // Date before month, weekday after month
        let regs = [0x00, 0x30, 0x10, 0x15, 0x01, 0x02, 0x24, 0x80];
        let t = Max6902::decode_clock(&regs, 0x20).unwrap();
        assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 2));
    }

    #[test]
    fn test_decode_rejects_bad_century() {
        let regs = [0x00, 0x30, 0x10, 0x15, 0x01, 0x02, 0x24, 0x80];
        assert_eq!(
            Max6902::decode_clock(&regs, 0x2B),
            Err(Error::InvalidBcd { raw: 0x2B })
        );
    }

    #[cfg(feature = "is_sync")]
    mod wire {
        extern crate std;

        use super::*;
        use crate::protocol::mock::MockSpi;
        use std::vec;

        #[test]
        fn test_read_time_takes_two_transactions() {
            let mut spi = MockSpi::new()
                .respond(&[0x00, 0x30, 0x10, 0x15, 0x01, 0x02, 0x24, 0x80])
                .respond(&[0x20]);
            let t = Max6902.read_time(&mut spi).unwrap();

            assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 2));
            assert_eq!(spi.writes(), [vec![0xBF], vec![0x93]]);
            assert_eq!(spi.transfers[0].read_len, BURST_LEN);
            assert_eq!(spi.transfers[1].read_len, 1);
        }

        #[test]
        fn test_set_time_write_protect_window() {
            let mut spi = MockSpi::new();
            let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 2);
            Max6902.set_time(&mut spi, &t).unwrap();

            assert_eq!(
                spi.writes(),
                [
                    vec![0x0F, 0x00],
                    vec![0x01, 0x00],
                    vec![0x03, 0x30],
                    vec![0x05, 0x10],
                    vec![0x07, 0x15],
                    vec![0x09, 0x01],
                    vec![0x0B, 0x02],
                    vec![0x0D, 0x24],
                    vec![0x13, 0x20],
                    vec![0x0F, 0x80],
                ]
            );
        }

        #[test]
        fn test_failure_inside_window() {
            // Transaction 0 clears write protect; 4 is the 4th clock write
            let mut spi = MockSpi::new().fail_at(4);
            let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 2);
            assert_eq!(
                Max6902.set_time(&mut spi, &t),
                Err(Error::WriteProtectWindow { completed: 3 })
            );
            // Nothing after the failed write, in particular no restore
            assert_eq!(spi.transfers.len(), 5);
        }

        #[test]
        fn test_failure_opening_window_is_transport_error() {
            let mut spi = MockSpi::new().fail_at(0);
            let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 2);
            assert_eq!(
                Max6902.set_time(&mut spi, &t),
                Err(Error::SpiTransferFailed)
            );
        }

        #[test]
        fn test_failure_restoring_write_protect() {
            let mut spi = MockSpi::new().fail_at(9);
            let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 2);
            assert_eq!(
                Max6902.set_time(&mut spi, &t),
                Err(Error::WriteProtectWindow { completed: 8 })
            );
        }

        #[test]
        fn test_invalid_time_sends_nothing() {
            let mut spi = MockSpi::new();
            let t = CalendarTime::new(2024, 13, 1, 0, 0, 0, 1);
            assert_eq!(Max6902.set_time(&mut spi, &t), Err(Error::CalendarInvalid));
            assert!(spi.transfers.is_empty());
        }

        #[test]
        fn test_register_access_polarity() {
            let mut spi = MockSpi::new().respond(&[0x80]);
            assert_eq!(Max6902.get_register(&mut spi, max6902::CONTROL), Ok(0x80));
            Max6902.set_register(&mut spi, max6902::CONTROL, 0x00).unwrap();
            assert_eq!(spi.writes(), [vec![0x8F], vec![0x0F, 0x00]]);
        }
    }
}
