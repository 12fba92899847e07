//! Raw register access commands

use spirtc_core::programmer::SpiMaster;
use spirtc_core::{RegisterAddr, RtcDevice};

/// Read one register and print its value
pub fn run_get_reg<M: SpiMaster>(
    rtc: &mut RtcDevice<M>,
    reg: RegisterAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = rtc.get_register(reg)?;
    println!("{}: 0x{:02X}", describe(rtc, reg), value);
    Ok(())
}

/// Write one register
pub fn run_set_reg<M: SpiMaster>(
    rtc: &mut RtcDevice<M>,
    reg: RegisterAddr,
    value: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    rtc.set_register(reg, value)?;
    println!("{} <- 0x{:02X}", describe(rtc, reg), value);
    Ok(())
}

fn describe<M: SpiMaster>(rtc: &RtcDevice<M>, reg: RegisterAddr) -> String {
    let map = rtc.family().register_map();
    match reg {
        RegisterAddr::Named(r) => match map.address(r) {
            Some(addr) => format!("0x{:02X} ({})", addr, r),
            None => r.to_string(),
        },
        RegisterAddr::Raw(addr) => match map.register_at(addr) {
            Some(r) => format!("0x{:02X} ({})", addr, r),
            None => format!("0x{:02X}", addr),
        },
    }
}

#[cfg(all(test, feature = "dummy"))]
mod tests {
    use super::*;
    use spirtc_core::{ChipFamily, Register};
    use spirtc_dummy::DummyRtc;

    #[test]
    fn test_describe() {
        let family = ChipFamily::Max6902;
        let rtc = RtcDevice::with_family(DummyRtc::with_family(family), family);
        assert_eq!(describe(&rtc, RegisterAddr::Raw(0x13)), "0x13 (century)");
        assert_eq!(describe(&rtc, RegisterAddr::Raw(0x02)), "0x02");
        assert_eq!(
            describe(&rtc, RegisterAddr::Named(Register::Control)),
            "0x0F (control)"
        );
    }

    #[test]
    fn test_set_then_get() {
        let family = ChipFamily::Ds1391;
        let mut rtc = RtcDevice::with_family(DummyRtc::with_family(family), family);
        run_set_reg(&mut rtc, RegisterAddr::Raw(0x20), 0x5A).unwrap();
        assert_eq!(rtc.get_register(0x20u8), Ok(0x5A));
        assert!(run_get_reg(&mut rtc, RegisterAddr::Named(Register::Century)).is_err());
    }
}
