//! Display surface trait

use anyhow::Result;

/// Styling tag for a dashboard cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Plain label text.
    Normal,
    /// Emphasized value text.
    Highlight,
    /// Error banner text.
    Alert,
}

/// Trait for the grid-of-cells display surface.
///
/// Writes are buffered; nothing becomes visible until [`refresh`] is called,
/// which the renderer does exactly once per cycle. The core never reads input
/// from the surface — quit and resize events belong to the program shell.
///
/// [`refresh`]: DisplaySurface::refresh
pub trait DisplaySurface {
    /// Write `text` starting at (`row`, `col`), overwriting what was there.
    fn set_cell(&mut self, row: u16, col: u16, text: &str, style: CellStyle) -> Result<()>;

    /// Queue a wipe of the whole surface.
    fn clear(&mut self) -> Result<()>;

    /// Make everything written since the last refresh visible at once.
    fn refresh(&mut self) -> Result<()>;
}
