//! Probe command implementation

use spirtc_core::programmer::SpiMaster;
use spirtc_core::RtcDevice;

/// Print the chip family an RTC device is bound to
pub fn run_probe<M: SpiMaster>(rtc: &RtcDevice<M>) -> Result<(), Box<dyn std::error::Error>> {
    let family = rtc.family();
    println!("Found RTC chip:");
    println!("  Family: {}", family);

    println!("  Registers:");
    for (reg, addr) in family.register_map().iter() {
        println!("    0x{:02X} {}", addr, reg);
    }
    Ok(())
}
