//! chargemon: a live telemetry console for the LTC4162 battery charger
//!
//! This library provides the application half of the dashboard:
//! - Collaborator traits for the register bus and the display surface
//! - The telemetry source that assembles one snapshot per poll cycle
//! - The fixed-layout dashboard renderer
//! - The poll loop and startup configuration
//!
//! The chip model itself (register catalog, unit conversions, decode rules)
//! lives in the `ltc4162` crate.

pub mod core;
pub mod sources;
pub mod displayers;
pub mod bus;
pub mod ui;
pub mod config;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::core::{CellStyle, DisplaySurface, PollLoop, RegisterBus};
