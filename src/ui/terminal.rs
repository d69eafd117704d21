//! Terminal implementation of the display surface
//!
//! An alternate-screen terminal grid. All writes are queued on stdout and
//! flushed by `refresh`, so each poll cycle becomes one atomic repaint.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};

use crate::core::{CellStyle, DisplaySurface};

/// Grid-of-cells surface on the controlling terminal.
///
/// Entering raw mode and the alternate screen happens on construction; both
/// are restored on drop, also on the error path.
pub struct TerminalSurface {
    out: Stdout,
}

impl TerminalSurface {
    pub fn new() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
            .context("entering alternate screen")?;
        Ok(TerminalSurface { out })
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_cell(&mut self, row: u16, col: u16, text: &str, style: CellStyle) -> Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        match style {
            CellStyle::Normal => queue!(self.out, Print(text))?,
            CellStyle::Highlight => queue!(
                self.out,
                SetForegroundColor(Color::Cyan),
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor,
            )?,
            CellStyle::Alert => queue!(
                self.out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor,
            )?,
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// True once the operator asked to quit (q, Esc or Ctrl-C).
///
/// Drains the terminal event queue without blocking; called by the shell
/// between poll cycles. Raw mode means Ctrl-C arrives as a key event, not a
/// signal, so it is handled here.
pub fn quit_requested() -> bool {
    while let Ok(true) = event::poll(Duration::ZERO) {
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(_) => return false,
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            _ => {}
        }
    }
    false
}
