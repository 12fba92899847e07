//! Calendar time as stored by the RTC chips

use crate::chip::ChipFamily;
use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Wall-clock time as held in the timekeeping registers
///
/// `weekday` is the raw chip ordinal (1-7). The chips only count it up at
/// midnight; they never derive it from the date, so it is carried through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarTime {
    /// Absolute year, e.g. 2024
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub day: u8,
    /// Day of week 1-7
    pub weekday: u8,
    /// Hour 0-23
    pub hour: u8,
    /// Minute 0-59
    pub minute: u8,
    /// Second 0-59
    pub second: u8,
}

impl CalendarTime {
    /// Create a calendar time from its fields
    ///
    /// No validation is done here; see [`validate`](Self::validate).
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        weekday: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
        }
    }

    /// Convert from a chrono date and time
    ///
    /// The weekday is taken from the date, Monday = 1 ... Sunday = 7.
    /// Years outside 0-9999 cannot be stored by any supported chip.
    pub fn from_naive(dt: &NaiveDateTime) -> Result<Self> {
        let year = u16::try_from(dt.year())
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or(Error::PrecisionLoss {
                value: dt.year().clamp(0, i32::from(u16::MAX)) as u16,
            })?;

        Ok(Self {
            year,
            month: dt.month() as u8,
            day: dt.day() as u8,
            weekday: dt.weekday().number_from_monday() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            // Leap seconds are folded into :59
            second: dt.second().min(59) as u8,
        })
    }

    /// Convert to a chrono date and time, dropping the weekday
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        self.date()?
            .and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
            .ok_or(Error::CalendarInvalid)
    }

    /// Weekday of the stored date, Monday = 1 ... Sunday = 7
    pub fn iso_weekday(&self) -> Result<u8> {
        Ok(self.date()?.weekday().number_from_monday() as u8)
    }

    /// Check that the fields form a real date and time of day
    ///
    /// Month must be 1-12, the day must exist in that month (leap years
    /// included), hour 0-23, minute and second 0-59. The weekday is not
    /// checked against the date.
    pub fn validate(&self) -> Result<()> {
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return Err(Error::CalendarInvalid);
        }
        self.date().map(|_| ())
    }

    /// Check that this time can be written to a chip of `family`
    ///
    /// On top of [`validate`](Self::validate) the weekday must be 1-7 and
    /// the year must be within the family's range, otherwise
    /// [`Error::PrecisionLoss`] is returned.
    pub fn check_writable(&self, family: ChipFamily) -> Result<()> {
        self.validate()?;
        if !(1..=7).contains(&self.weekday) {
            return Err(Error::CalendarInvalid);
        }
        let (min, max) = family.year_range();
        if self.year < min || self.year > max {
            return Err(Error::PrecisionLoss { value: self.year });
        }
        Ok(())
    }

    fn date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .ok_or(Error::CalendarInvalid)
    }
}

impl core::fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(
            CalendarTime::new(2024, 1, 15, 10, 30, 0, 2).validate(),
            Ok(())
        );
        assert_eq!(
            CalendarTime::new(2024, 2, 29, 23, 59, 59, 4).validate(),
            Ok(())
        );

        let invalid = [
            CalendarTime::new(2024, 13, 1, 0, 0, 0, 1),
            CalendarTime::new(2024, 0, 1, 0, 0, 0, 1),
            CalendarTime::new(2023, 2, 29, 0, 0, 0, 1),
            CalendarTime::new(2024, 4, 31, 0, 0, 0, 1),
            CalendarTime::new(2024, 1, 0, 0, 0, 0, 1),
            CalendarTime::new(2024, 1, 1, 24, 0, 0, 1),
            CalendarTime::new(2024, 1, 1, 0, 60, 0, 1),
            CalendarTime::new(2024, 1, 1, 0, 0, 60, 1),
        ];
        for t in invalid {
            assert_eq!(t.validate(), Err(Error::CalendarInvalid), "{:?}", t);
        }
    }

    #[test]
    fn test_check_writable_year_range() {
        let t = CalendarTime::new(2100, 1, 1, 0, 0, 0, 5);
        assert_eq!(
            t.check_writable(ChipFamily::Ds1391),
            Err(Error::PrecisionLoss { value: 2100 })
        );
        assert_eq!(t.check_writable(ChipFamily::Max6902), Ok(()));

        let t = CalendarTime::new(1899, 12, 31, 0, 0, 0, 7);
        assert!(t.check_writable(ChipFamily::Ds1391).is_err());
        assert_eq!(t.check_writable(ChipFamily::Max6902), Ok(()));
    }

    #[test]
    fn test_check_writable_weekday() {
        let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 0);
        assert_eq!(
            t.check_writable(ChipFamily::Ds1391),
            Err(Error::CalendarInvalid)
        );
        let t = CalendarTime::new(2024, 1, 15, 10, 30, 0, 8);
        assert_eq!(
            t.check_writable(ChipFamily::Max6902),
            Err(Error::CalendarInvalid)
        );
    }

    #[test]
    fn test_naive_conversion() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let t = CalendarTime::from_naive(&dt).unwrap();
        // 2024-01-15 is a Monday
        assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 1));
        assert_eq!(t.to_naive(), Ok(dt));
        assert_eq!(t.iso_weekday(), Ok(1));
    }

    #[test]
    fn test_display() {
        let t = CalendarTime::new(1999, 12, 31, 23, 59, 5, 5);
        let mut buf = [0u8; 32];
        let mut w = Cursor { buf: &mut buf, len: 0 };
        core::fmt::write(&mut w, format_args!("{}", t)).unwrap();
        let len = w.len;
        assert_eq!(&buf[..len], b"1999-12-31 23:59:05");
    }

    struct Cursor<'a> {
        buf: &'a mut [u8],
        len: usize,
    }

    impl core::fmt::Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            Ok(())
        }
    }
}
