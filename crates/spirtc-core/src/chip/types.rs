//! Chip family and register map definitions

use super::registers::{ds1391, max6902};

/// RTC chip family
///
/// The two families share a footprint and the SPI bus but differ in
/// register layout, read/write bit polarity and century encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ChipFamily {
    /// Dallas/Maxim DS1391/DS1393/DS1394
    #[cfg_attr(
        feature = "std",
        serde(alias = "ds1393", alias = "ds1394", alias = "ds139x")
    )]
    Ds1391,
    /// Maxim MAX6902
    Max6902,
}

impl ChipFamily {
    /// Human readable chip name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ds1391 => "DS139x",
            Self::Max6902 => "MAX6902",
        }
    }

    /// Register map of this family
    pub const fn register_map(&self) -> &'static RegisterMap {
        match self {
            Self::Ds1391 => &DS1391_MAP,
            Self::Max6902 => &MAX6902_MAP,
        }
    }

    /// Absolute years the clock registers can hold
    pub const fn year_range(&self) -> (u16, u16) {
        match self {
            // Year byte plus one century bit on a 1900 base
            Self::Ds1391 => (1900, 2099),
            // Year byte plus a full BCD century register
            Self::Max6902 => (0, 9999),
        }
    }

    /// Parse a family name as used on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        const DS1391_NAMES: [&str; 4] = ["ds1391", "ds1393", "ds1394", "ds139x"];

        if DS1391_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            Some(Self::Ds1391)
        } else if "max6902".eq_ignore_ascii_case(name) {
            Some(Self::Max6902)
        } else {
            None
        }
    }
}

impl core::fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical register name, independent of the chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Hundredths of seconds (DS1391 only)
    Hundredths,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Day of week
    Weekday,
    /// Day of month
    Date,
    /// Month (DS1391: with century flag)
    Month,
    /// Year within the century
    Year,
    /// Century (MAX6902 only)
    Century,
    /// Control register
    Control,
    /// Status register (DS1391 only)
    Status,
    /// Trickle charger (DS1391 only)
    Trickle,
}

impl Register {
    /// All logical registers
    pub const ALL: [Register; 12] = [
        Self::Hundredths,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Weekday,
        Self::Date,
        Self::Month,
        Self::Year,
        Self::Century,
        Self::Control,
        Self::Status,
        Self::Trickle,
    ];

    /// Lower-case register name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hundredths => "hundredths",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Weekday => "weekday",
            Self::Date => "date",
            Self::Month => "month",
            Self::Year => "year",
            Self::Century => "century",
            Self::Control => "control",
            Self::Status => "status",
            Self::Trickle => "trickle",
        }
    }

    /// Look up a register by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl core::fmt::Display for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static register table of one chip family
#[derive(Debug)]
pub struct RegisterMap {
    /// Family this table describes
    pub family: ChipFamily,
    entries: &'static [(Register, u8)],
}

impl RegisterMap {
    /// Address of a logical register, if the family has it
    pub fn address(&self, reg: Register) -> Option<u8> {
        self.entries
            .iter()
            .find(|(r, _)| *r == reg)
            .map(|(_, addr)| *addr)
    }

    /// Logical name of a register address, if known
    pub fn register_at(&self, addr: u8) -> Option<Register> {
        self.entries
            .iter()
            .find(|(_, a)| *a == addr)
            .map(|(r, _)| *r)
    }

    /// Iterate over all (register, address) pairs of this family
    pub fn iter(&self) -> impl Iterator<Item = (Register, u8)> + '_ {
        self.entries.iter().copied()
    }
}

static DS1391_MAP: RegisterMap = RegisterMap {
    family: ChipFamily::Ds1391,
    entries: &[
        (Register::Hundredths, ds1391::HUNDREDTHS),
        (Register::Seconds, ds1391::SECONDS),
        (Register::Minutes, ds1391::MINUTES),
        (Register::Hours, ds1391::HOURS),
        (Register::Weekday, ds1391::DAY),
        (Register::Date, ds1391::DATE),
        (Register::Month, ds1391::MONTH_CENTURY),
        (Register::Year, ds1391::YEAR),
        (Register::Control, ds1391::CONTROL),
        (Register::Status, ds1391::STATUS),
        (Register::Trickle, ds1391::TRICKLE),
    ],
};

static MAX6902_MAP: RegisterMap = RegisterMap {
    family: ChipFamily::Max6902,
    entries: &[
        (Register::Seconds, max6902::SECONDS),
        (Register::Minutes, max6902::MINUTES),
        (Register::Hours, max6902::HOURS),
        (Register::Date, max6902::DATE),
        (Register::Month, max6902::MONTH),
        (Register::Weekday, max6902::DAY),
        (Register::Year, max6902::YEAR),
        (Register::Control, max6902::CONTROL),
        (Register::Century, max6902::CENTURY),
    ],
};
