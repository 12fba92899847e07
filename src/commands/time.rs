//! Clock read/set commands

use chrono::{Local, NaiveDateTime};
use spirtc_core::programmer::SpiMaster;
use spirtc_core::{CalendarTime, RtcDevice, RtcOps};

/// Format accepted by `set --time`
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a "YYYY-MM-DD HH:MM:SS" time
///
/// Without an explicit weekday the ISO weekday of the date is used
/// (Monday = 1).
pub fn parse_time(
    s: &str,
    weekday: Option<u8>,
) -> Result<CalendarTime, Box<dyn std::error::Error>> {
    let dt = NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|e| format!("Invalid time '{}': {} (expected YYYY-MM-DD HH:MM:SS)", s, e))?;
    let mut time = CalendarTime::from_naive(&dt)?;
    if let Some(weekday) = weekday {
        time.weekday = weekday;
    }
    Ok(time)
}

/// Print the current time of the RTC
pub fn run_read<M: SpiMaster>(rtc: &mut RtcDevice<M>) -> Result<(), Box<dyn std::error::Error>> {
    let time = rtc.read_time()?;
    println!("{} (weekday {})", time, time.weekday);
    Ok(())
}

/// Set the RTC time
pub fn run_set<M: SpiMaster>(
    rtc: &mut RtcDevice<M>,
    time: &CalendarTime,
) -> Result<(), Box<dyn std::error::Error>> {
    rtc.set_time(time)?;
    println!("Set {} to {} (weekday {})", rtc.family(), time, time.weekday);
    Ok(())
}

/// Set the RTC from the host's local time
pub fn run_systohc<M: SpiMaster>(rtc: &mut RtcDevice<M>) -> Result<(), Box<dyn std::error::Error>> {
    let now = Local::now().naive_local();
    let time = CalendarTime::from_naive(&now)?;
    log::debug!("System time is {}", time);
    run_set(rtc, &time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_weekday_default() {
        // 2024-01-15 is a Monday
        let t = parse_time("2024-01-15 10:30:00", None).unwrap();
        assert_eq!(t, CalendarTime::new(2024, 1, 15, 10, 30, 0, 1));

        let t = parse_time("2024-01-15 10:30:00", Some(2)).unwrap();
        assert_eq!(t.weekday, 2);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("2024-13-01 00:00:00", None).is_err());
        assert!(parse_time("2024-02-30 00:00:00", None).is_err());
        assert!(parse_time("yesterday", None).is_err());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_set_then_read_on_dummy() {
        use spirtc_core::ChipFamily;
        use spirtc_dummy::DummyRtc;

        let mut rtc = RtcDevice::probe(DummyRtc::with_family(ChipFamily::Max6902)).unwrap();
        let t = parse_time("2101-03-04 05:06:07", None).unwrap();
        run_set(&mut rtc, &t).unwrap();
        assert_eq!(rtc.read_time(), Ok(t));
        run_read(&mut rtc).unwrap();

        // DS1391 cannot hold 2101
        let mut rtc = RtcDevice::probe(DummyRtc::with_family(ChipFamily::Ds1391)).unwrap();
        assert!(run_set(&mut rtc, &t).is_err());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_systohc_on_dummy() {
        use spirtc_core::ChipFamily;
        use spirtc_dummy::DummyRtc;

        let mut rtc = RtcDevice::probe(DummyRtc::with_family(ChipFamily::Max6902)).unwrap();
        run_systohc(&mut rtc).unwrap();
        let t = rtc.read_time().unwrap();
        assert!(t.year >= 2024);
    }
}
