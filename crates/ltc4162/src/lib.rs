//! ltc4162: register model for the LTC4162 multi-chemistry battery charger.
//!
//! This crate contains the pure, I/O-free half of the charger telemetry
//! pipeline:
//! - The register catalog (addresses and names of every polled register)
//! - Unit conversions from raw 16-bit register words to physical values
//! - The decoded telemetry model (states, statuses, bitfields, readings,
//!   derived power) and its decode rules
//!
//! Reading the registers off the wire is the caller's job; everything here is
//! a total function over the 16-bit word domain.

pub mod registers;
pub mod telemetry;
pub mod units;

// Re-export the types that make up a snapshot
pub use registers::Register;
pub use telemetry::{
    AnalogReadings, ChargerConfigBits, ChargerState, ChargerStatus, Chemistry, ConfigBits,
    DecodeError, DerivedPower, DeviceIdentity, SystemStatusBits, TelemetrySnapshot,
    TelemetrySpeed,
};
