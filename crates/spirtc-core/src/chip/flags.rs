//! Register bit fields

use bitflags::bitflags;

bitflags! {
    /// DS1391 Month/Century register (0x06)
    ///
    /// The low bits hold the BCD month (01-12); bit 7 selects the century.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MonthCentury: u8 {
        /// Set for years 2000-2099, clear for 1900-1999
        const CENTURY = 0x80;
    }
}

impl MonthCentury {
    /// Mask for the BCD month digits
    pub const MONTH_MASK: u8 = 0x7F;
}

bitflags! {
    /// MAX6902 Control register (0x0F)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Max6902Control: u8 {
        /// Write protect: timekeeping registers ignore writes while set
        const WRITE_PROTECT = 0x80;
    }
}
