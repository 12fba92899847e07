//! SPI command structure

/// Largest transaction the RTC protocols issue: command byte + 8 data bytes
pub const MAX_TRANSACTION_LEN: usize = 9;

/// A single SPI transaction
///
/// One chip-select assertion: the command byte and `write_data` are clocked
/// out, then `read_buf.len()` bytes are clocked in.
///
/// Designed to avoid allocation - uses slices for data.
/// The lifetime parameter `'a` ties the command to the buffers it references.
pub struct SpiCommand<'a> {
    /// The command byte (register address with the read/write bit applied)
    pub command: u8,

    /// Data to write after the command byte
    pub write_data: &'a [u8],

    /// Buffer to read into (mutable)
    pub read_buf: &'a mut [u8],
}

impl<'a> SpiCommand<'a> {
    /// Create a read command: command byte out, `buf.len()` bytes in
    pub fn read_reg(command: u8, buf: &'a mut [u8]) -> Self {
        Self {
            command,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a write command: command byte followed by `data`, nothing read
    pub fn write_reg(command: u8, data: &'a [u8]) -> Self {
        Self {
            command,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Returns true if this command has a read phase
    pub fn has_read(&self) -> bool {
        !self.read_buf.is_empty()
    }

    /// Returns true if this command has a write data phase
    pub fn has_write(&self) -> bool {
        !self.write_data.is_empty()
    }

    /// Number of bytes clocked out (command byte + write data)
    pub fn write_len(&self) -> usize {
        1 + self.write_data.len()
    }

    /// Calculate the total number of bytes to transfer
    pub fn total_bytes(&self) -> usize {
        self.write_len() + self.read_buf.len()
    }

    /// Encode the outgoing bytes (command + write data) into `buf`
    ///
    /// Returns the number of bytes written. `buf` must hold at least
    /// [`write_len`](Self::write_len) bytes.
    pub fn encode_write(&self, buf: &mut [u8]) -> usize {
        let len = self.write_len();
        buf[0] = self.command;
        buf[1..len].copy_from_slice(self.write_data);
        len
    }
}
