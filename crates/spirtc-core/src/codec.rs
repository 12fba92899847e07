//! Register codec
//!
//! Pure conversions between register contents and values: BCD digits and
//! the per-family command byte that frames every transaction.
//!
//! The two chip families use opposite read/write bit polarity:
//!
//! | Family  | Read          | Write         |
//! |---------|---------------|---------------|
//! | DS1391  | bit 7 clear   | bit 7 set     |
//! | MAX6902 | bit 7 set     | bit 7 clear   |

use crate::chip::ChipFamily;
use crate::error::{Error, Result};

/// Read/write direction bit of the command byte
const RW_BIT: u8 = 0x80;

/// Decode a BCD byte into its value (0-99)
///
/// Fails with [`Error::InvalidBcd`] if either nibble is above 9.
pub const fn decode_bcd(raw: u8) -> Result<u8> {
    let tens = raw >> 4;
    let ones = raw & 0x0F;
    if tens > 9 || ones > 9 {
        return Err(Error::InvalidBcd { raw });
    }
    Ok(tens * 10 + ones)
}

/// Encode a value (0-99) as a BCD byte
///
/// Fails with [`Error::PrecisionLoss`] for values of 100 and above.
pub const fn encode_bcd(value: u8) -> Result<u8> {
    if value >= 100 {
        return Err(Error::PrecisionLoss {
            value: value as u16,
        });
    }
    Ok(((value / 10) << 4) | (value % 10))
}

/// Build the command byte that reads register `addr`
pub const fn read_command(addr: u8, family: ChipFamily) -> Result<u8> {
    if addr & RW_BIT != 0 {
        return Err(Error::InvalidRegister { addr });
    }
    Ok(match family {
        ChipFamily::Ds1391 => addr,
        ChipFamily::Max6902 => addr | RW_BIT,
    })
}

/// Build the command byte that writes register `addr`
pub const fn write_command(addr: u8, family: ChipFamily) -> Result<u8> {
    if addr & RW_BIT != 0 {
        return Err(Error::InvalidRegister { addr });
    }
    Ok(match family {
        ChipFamily::Ds1391 => addr | RW_BIT,
        ChipFamily::Max6902 => addr,
    })
}
