//! Chip family autodetection
//!
//! Both supported chips answer on the same chip select, so the family is
//! found by writing a pattern to the DS1391 trickle charger register using
//! DS1391 framing and reading it back. A DS1391 echoes the pattern. On a
//! MAX6902 the same bytes address a different register with the opposite
//! direction, so the readback does not match.
//!
//! The probe leaves the pattern in the DS1391 trickle register. On a
//! MAX6902 the readback is a write to Control, and the chip latches the
//! zero byte the host clocks out while reading, so write protect ends up
//! cleared.

use crate::chip::registers::ds1391;
use crate::chip::ChipFamily;
use crate::error::{Error, Result};
use crate::programmer::SpiMaster;
use crate::protocol::{read_register, write_register};
use maybe_async::maybe_async;

/// Pattern written to the DS1391 trickle charger register
pub const TRICKLE_PROBE: u8 = 0xA6;

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectState {
    /// The probe has not run yet
    Unprobed,
    /// The probe identified a chip family
    Probed(ChipFamily),
    /// The chip could not be reached
    Failed,
}

/// One-shot chip family detector
#[derive(Debug)]
pub struct Detector {
    state: DetectState,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    /// Create a detector that has not probed yet
    pub const fn new() -> Self {
        Self {
            state: DetectState::Unprobed,
        }
    }

    /// Current state
    pub fn state(&self) -> DetectState {
        self.state
    }

    /// Run the probe
    ///
    /// The bus is only touched on the first call; later calls return the
    /// stored outcome.
    #[maybe_async]
    pub async fn run<M: SpiMaster + ?Sized>(&mut self, master: &mut M) -> Result<ChipFamily> {
        match self.state {
            DetectState::Probed(family) => return Ok(family),
            DetectState::Failed => return Err(Error::DeviceUnreachable),
            DetectState::Unprobed => {}
        }

        match probe(master).await {
            Ok(family) => {
                log::info!("probe found {} on SPI bus", family);
                self.state = DetectState::Probed(family);
                Ok(family)
            }
            Err(e) => {
                log::error!("RTC probe failed: {}", e);
                self.state = DetectState::Failed;
                Err(Error::DeviceUnreachable)
            }
        }
    }
}

#[maybe_async]
async fn probe<M: SpiMaster + ?Sized>(master: &mut M) -> Result<ChipFamily> {
    write_register(master, ChipFamily::Ds1391, ds1391::TRICKLE, TRICKLE_PROBE).await?;
    let readback = read_register(master, ChipFamily::Ds1391, ds1391::TRICKLE).await?;

    log::debug!(
        "probe: trickle readback 0x{:02X} (expected 0x{:02X})",
        readback,
        TRICKLE_PROBE
    );

    if readback == TRICKLE_PROBE {
        Ok(ChipFamily::Ds1391)
    } else {
        Ok(ChipFamily::Max6902)
    }
}
