//! SPI bus modes

/// SPI clock polarity/phase combination
///
/// Both supported RTC families sample on the rising edge with an idle-high
/// clock, so [`SpiMode::Mode3`] is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    #[default]
    Mode3,
}

impl SpiMode {
    /// Clock polarity: true if the clock idles high
    pub const fn cpol(&self) -> bool {
        matches!(self, Self::Mode2 | Self::Mode3)
    }

    /// Clock phase: true if data is sampled on the trailing edge
    pub const fn cpha(&self) -> bool {
        matches!(self, Self::Mode1 | Self::Mode3)
    }

    /// Mode number as used by spidev (`SPI_MODE_n`)
    pub const fn bits(&self) -> u8 {
        match self {
            Self::Mode0 => 0,
            Self::Mode1 => 1,
            Self::Mode2 => 2,
            Self::Mode3 => 3,
        }
    }

    /// Build a mode from its number (0-3)
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Mode0),
            1 => Some(Self::Mode1),
            2 => Some(Self::Mode2),
            3 => Some(Self::Mode3),
            _ => None,
        }
    }
}

impl core::fmt::Display for SpiMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mode {}", self.bits())
    }
}
