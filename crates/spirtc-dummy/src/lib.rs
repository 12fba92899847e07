//! spirtc-dummy - In-memory RTC emulator for testing
//!
//! This crate provides a dummy SPI master with a DS1391 or MAX6902 register
//! file behind it. It decodes the command byte with the emulated chip's
//! read/write polarity, so a host that frames a transaction for the wrong
//! family sees the same confusion it would on real hardware. The clock does
//! not tick.
//!
//! Any transaction can be made to fail, which is how the partial-write
//! paths of the protocols are exercised without hardware.

#![cfg_attr(not(feature = "std"), no_std)]

use spirtc_core::chip::registers::{ds1391, max6902};
use spirtc_core::chip::{ChipFamily, Max6902Control};
use spirtc_core::error::{Error, Result};
use spirtc_core::programmer::SpiMaster;
use spirtc_core::spi::SpiCommand;

/// Size of the emulated register space (7-bit addresses)
const REG_SPACE: usize = 0x80;

/// Address bits of the command byte
const ADDR_MASK: u8 = 0x7F;

/// Value seen on MISO when the chip does not drive it
const BUS_IDLE: u8 = 0xFF;

/// MAX6902 registers returned by the clock burst, in order
const MAX6902_BURST: [u8; 8] = [
    max6902::SECONDS,
    max6902::MINUTES,
    max6902::HOURS,
    max6902::DATE,
    max6902::MONTH,
    max6902::DAY,
    max6902::YEAR,
    max6902::CONTROL,
];

/// Configuration for the dummy RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummyConfig {
    /// Emulated chip family
    pub family: ChipFamily,
    /// Fail the transaction with this zero-based index
    pub fail_at: Option<usize>,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            family: ChipFamily::Ds1391,
            fail_at: None,
        }
    }
}

/// Dummy RTC programmer
///
/// Emulates a DS1391 or MAX6902 in memory for testing purposes. Both start
/// at 2000-01-01 00:00:00, weekday 6; the MAX6902 starts write protected.
pub struct DummyRtc {
    config: DummyConfig,
    regs: [u8; REG_SPACE],
    transactions: usize,
}

impl DummyRtc {
    /// Create a new dummy RTC with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        let mut regs = [0u8; REG_SPACE];
        match config.family {
            ChipFamily::Ds1391 => {
                regs[ds1391::DAY as usize] = 0x06;
                regs[ds1391::DATE as usize] = 0x01;
                regs[ds1391::MONTH_CENTURY as usize] = 0x81;
            }
            ChipFamily::Max6902 => {
                regs[max6902::DATE as usize] = 0x01;
                regs[max6902::MONTH as usize] = 0x01;
                regs[max6902::DAY as usize] = 0x06;
                regs[max6902::CONTROL as usize] = Max6902Control::WRITE_PROTECT.bits();
                regs[max6902::CENTURY as usize] = 0x20;
            }
        }
        Self {
            config,
            regs,
            transactions: 0,
        }
    }

    /// Create a dummy RTC of the given family
    pub fn with_family(family: ChipFamily) -> Self {
        Self::new(DummyConfig {
            family,
            ..Default::default()
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Fail the transaction with this zero-based index (counted since creation)
    pub fn set_fail_at(&mut self, index: Option<usize>) {
        self.config.fail_at = index;
    }

    /// Number of transactions seen so far, failed ones included
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    /// Current content of a register
    pub fn register(&self, addr: u8) -> u8 {
        self.regs[(addr & ADDR_MASK) as usize]
    }

    fn is_write(&self, command: u8) -> bool {
        let rw = command & !ADDR_MASK != 0;
        match self.config.family {
            ChipFamily::Ds1391 => rw,
            ChipFamily::Max6902 => !rw,
        }
    }

    fn handle_read(&self, command: u8, buf: &mut [u8]) {
        match self.config.family {
            ChipFamily::Ds1391 => {
                // Burst reads auto-increment through the register space
                let start = (command & ADDR_MASK) as usize;
                for (i, byte) in buf.iter_mut().enumerate() {
                    *byte = self.regs[(start + i) % REG_SPACE];
                }
            }
            ChipFamily::Max6902 if command == max6902::CLOCK_BURST_READ => {
                buf.fill(BUS_IDLE);
                for (byte, addr) in buf.iter_mut().zip(MAX6902_BURST) {
                    *byte = self.regs[addr as usize];
                }
            }
            ChipFamily::Max6902 => {
                buf.fill(BUS_IDLE);
                if let Some(byte) = buf.first_mut() {
                    *byte = self.regs[(command & ADDR_MASK) as usize];
                }
            }
        }
    }

    fn handle_write(&mut self, addr: u8, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        match self.config.family {
            ChipFamily::Ds1391 => {
                for (i, &byte) in data.iter().enumerate() {
                    self.regs[(addr as usize + i) % REG_SPACE] = byte;
                }
            }
            ChipFamily::Max6902 => {
                let Some(&byte) = data.first() else {
                    return;
                };
                let control = self.regs[max6902::CONTROL as usize];
                let protected = Max6902Control::from_bits_retain(control)
                    .contains(Max6902Control::WRITE_PROTECT);
                if protected && addr != max6902::CONTROL {
                    log::trace!("dummy: MAX6902 write to 0x{:02X} ignored, write protected", addr);
                    return;
                }
                self.regs[addr as usize] = byte;
            }
        }
    }
}

impl SpiMaster for DummyRtc {
    fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        let index = self.transactions;
        self.transactions += 1;

        if self.config.fail_at == Some(index) {
            log::debug!("dummy: failing transaction {} (0x{:02X})", index, cmd.command);
            return Err(Error::SpiTransferFailed);
        }

        if self.is_write(cmd.command) {
            let addr = cmd.command & ADDR_MASK;
            if cmd.write_data.is_empty() {
                // MOSI is driven low during a read phase; the chip takes it as data
                let zeros = [0u8; REG_SPACE];
                let len = cmd.read_buf.len().min(REG_SPACE);
                self.handle_write(addr, &zeros[..len]);
            } else {
                self.handle_write(addr, cmd.write_data);
            }
            cmd.read_buf.fill(BUS_IDLE);
        } else {
            self.handle_read(cmd.command, cmd.read_buf);
        }
        Ok(())
    }
}

/// Parse programmer options from a list of key-value pairs
///
/// - `chip=ds1391|max6902` - emulated family (default: ds1391)
/// - `fail_at=N` - fail the Nth transaction, counted from 0
#[cfg(feature = "std")]
pub fn parse_options(options: &[(&str, &str)]) -> core::result::Result<DummyConfig, String> {
    let mut config = DummyConfig::default();

    for (key, value) in options {
        match *key {
            "chip" => {
                config.family = ChipFamily::from_name(value).ok_or_else(|| {
                    format!("Unknown chip: {} (expected ds1391 or max6902)", value)
                })?;
            }
            "fail_at" => {
                let index = value
                    .parse()
                    .map_err(|_| format!("Invalid fail_at value: {}", value))?;
                config.fail_at = Some(index);
            }
            _ => {
                log::warn!("dummy: Unknown option: {}={}", key, value);
            }
        }
    }

    Ok(config)
}

/// Open a dummy RTC and return a boxed SpiMaster
#[cfg(feature = "std")]
pub fn open_dummy(
    options: &[(&str, &str)],
) -> core::result::Result<Box<dyn SpiMaster + Send>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    log::info!("dummy: Emulating {}", config.family);
    Ok(Box::new(DummyRtc::new(config)))
}
