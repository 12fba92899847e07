//! Register addresses of the supported RTC chips
//!
//! Addresses are the 7-bit register numbers; the read/write bit is applied
//! by [`codec`](crate::codec) according to the chip family.

/// Dallas/Maxim DS1391/DS1393/DS1394
pub mod ds1391 {
    // ========================================================================
    // Timekeeping
    // ========================================================================

    /// Hundredths of seconds
    pub const HUNDREDTHS: u8 = 0x00;
    /// Seconds (BCD 00-59)
    pub const SECONDS: u8 = 0x01;
    /// Minutes (BCD 00-59)
    pub const MINUTES: u8 = 0x02;
    /// Hours (BCD 00-23, 24 hour mode)
    pub const HOURS: u8 = 0x03;
    /// Day of week (1-7)
    pub const DAY: u8 = 0x04;
    /// Day of month (BCD 01-31)
    pub const DATE: u8 = 0x05;
    /// Month (BCD 01-12) with century flag in bit 7
    pub const MONTH_CENTURY: u8 = 0x06;
    /// Year within the century (BCD 00-99)
    pub const YEAR: u8 = 0x07;

    // ========================================================================
    // Alarm
    // ========================================================================

    /// Alarm hundredths of seconds
    pub const ALARM_HUNDREDTHS: u8 = 0x08;
    /// Alarm seconds
    pub const ALARM_SECONDS: u8 = 0x09;
    /// Alarm minutes
    pub const ALARM_MINUTES: u8 = 0x0A;
    /// Alarm hours
    pub const ALARM_HOURS: u8 = 0x0B;
    /// Alarm day/date
    pub const ALARM_DAY_DATE: u8 = 0x0C;

    // ========================================================================
    // Control
    // ========================================================================

    /// Control register
    pub const CONTROL: u8 = 0x0D;
    /// Status register
    pub const STATUS: u8 = 0x0E;
    /// Trickle charger register, also used for autodetection
    pub const TRICKLE: u8 = 0x0F;
}

/// Maxim MAX6902
pub mod max6902 {
    /// Seconds (BCD 00-59)
    pub const SECONDS: u8 = 0x01;
    /// Minutes (BCD 00-59)
    pub const MINUTES: u8 = 0x03;
    /// Hours (BCD 00-23)
    pub const HOURS: u8 = 0x05;
    /// Day of month (BCD 01-31)
    pub const DATE: u8 = 0x07;
    /// Month (BCD 01-12)
    pub const MONTH: u8 = 0x09;
    /// Day of week (1-7)
    pub const DAY: u8 = 0x0B;
    /// Year within the century (BCD 00-99)
    pub const YEAR: u8 = 0x0D;
    /// Control register (write protect)
    pub const CONTROL: u8 = 0x0F;
    /// Century (BCD 00-99)
    pub const CENTURY: u8 = 0x13;

    /// Clock burst read command
    ///
    /// Returns Seconds, Minutes, Hours, Date, Month, Day, Year, Control.
    pub const CLOCK_BURST_READ: u8 = 0xBF;
}
