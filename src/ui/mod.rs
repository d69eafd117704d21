//! Terminal UI backend

mod terminal;

pub use terminal::{quit_requested, TerminalSurface};
