//! Dashboard renderers
//!
//! A renderer is a pure projection of a telemetry snapshot onto display
//! cells; it owns the layout and nothing else.

mod dashboard;

pub use dashboard::Dashboard;
