//! Linux SMBus register transport

use anyhow::{Context, Result};
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use log::debug;

use crate::core::RegisterBus;

/// Register bus backed by a Linux I2C character device.
///
/// The chip's registers are 16-bit words, so every read is a single SMBus
/// "read word data" transaction. The kernel driver supplies the transport
/// timeout; a timed-out transaction surfaces as an ordinary read failure.
pub struct SmbusRegisterBus {
    dev: LinuxI2CDevice,
}

impl SmbusRegisterBus {
    /// Open the bus device at `path` (e.g. `/dev/i2c-1`) addressing the chip
    /// at the 7-bit address `addr`.
    pub fn open(path: &str, addr: u8) -> Result<Self> {
        let dev = LinuxI2CDevice::new(path, u16::from(addr))
            .with_context(|| format!("opening I2C device {path} at address 0x{addr:02X}"))?;
        debug!("opened {path} at 0x{addr:02X}");
        Ok(SmbusRegisterBus { dev })
    }
}

impl RegisterBus for SmbusRegisterBus {
    fn read_register(&mut self, addr: u8) -> Result<u16> {
        Ok(self.dev.smbus_read_word_data(addr)?)
    }
}
