//! Register bus trait

use anyhow::Result;

/// Trait for the register-based bus transport.
///
/// The charger exposes fixed-address 16-bit registers and the bus protocol
/// addresses one register per transaction, so this is the whole interface.
/// The dashboard never writes registers.
///
/// Implementations must fail with an error on I/O failure, bus-not-ready or
/// timeout; a timeout is an ordinary read failure, not a special case. The
/// handle is exclusively owned by one poll loop for its lifetime.
pub trait RegisterBus {
    /// Read the 16-bit register at `addr`.
    fn read_register(&mut self, addr: u8) -> Result<u16>;
}
