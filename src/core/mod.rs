//! Core traits and the poll loop

mod bus;
mod poll;
mod surface;

pub use bus::RegisterBus;
pub use poll::{LoopState, PollLoop};
pub use surface::{CellStyle, DisplaySurface};
