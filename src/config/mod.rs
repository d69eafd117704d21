//! Application configuration

use std::time::Duration;

use anyhow::{bail, Result};

/// Startup configuration, constant for the process lifetime.
///
/// Everything here comes from the command line; there is no config file and
/// nothing is persisted.
#[derive(Debug, Clone)]
pub struct Config {
    /// I2C character device the charger is attached to.
    pub bus_path: String,
    /// 7-bit chip address on the bus.
    pub bus_address: u8,
    /// Battery shunt resistance in ohms.
    pub rsense_ohms: f64,
    /// Series cell count used for all voltage scaling. Operator-supplied:
    /// the chip's own detected count becomes unavailable when the system
    /// runs on battery alone.
    pub cell_count: u8,
    /// Delay between poll cycles.
    pub poll_interval: Duration,
}

impl Config {
    /// Reject operator mistakes before touching the hardware. Failing here
    /// is fatal: these are startup errors, not runtime conditions.
    pub fn validate(&self) -> Result<()> {
        if !self.rsense_ohms.is_finite() || self.rsense_ohms <= 0.0 {
            bail!(
                "shunt resistance must be a positive number of ohms, got {}",
                self.rsense_ohms
            );
        }
        if !(1..=15).contains(&self.cell_count) {
            bail!("cell count must be between 1 and 15, got {}", self.cell_count);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus_path: "/dev/i2c-1".to_string(),
            bus_address: 0x68,
            rsense_ohms: 0.01,
            cell_count: 4,
            poll_interval: Duration::from_millis(250),
        }
    }
}
