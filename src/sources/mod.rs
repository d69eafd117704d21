//! Telemetry sources
//!
//! A source owns the rules for turning bus reads into one immutable
//! telemetry snapshot per poll cycle.

mod charger;

pub use charger::ChargerSource;
