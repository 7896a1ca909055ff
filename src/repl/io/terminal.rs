//! # Terminal I/O Implementations
//!
//! crossterm-backed streams for the real console. Drawing commands are
//! queued and only reach the terminal on `flush`, so a frame is written in
//! one go. Mode changes (raw mode, alternate screen, cursor visibility)
//! are tracked so that a dropped stream, including one dropped while
//! unwinding from a panic, hands the shell back in a usable state.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style::Print};
use std::io::{self, Write};
use std::time::Duration;

/// Key and resize events from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        event::poll(timeout).context("Failed to poll terminal events")
    }

    fn read(&mut self) -> Result<Event> {
        event::read().context("Failed to read terminal event")
    }
}

/// Terminal modes the console has switched on and must switch off again
#[derive(Debug, Default, Clone, Copy)]
struct ModeGuard {
    raw_mode: bool,
    alternate_screen: bool,
    cursor_hidden: bool,
}

/// Console output on a crossterm terminal
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    modes: ModeGuard,
}

impl TerminalRenderStream<io::Stdout> {
    /// Render to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            modes: ModeGuard::default(),
        }
    }

    /// Undo every mode change still in effect. Errors are ignored since
    /// this also runs from `Drop`.
    fn restore_modes(&mut self) {
        if self.modes.alternate_screen {
            let _ = execute!(self.writer, LeaveAlternateScreen);
            self.modes.alternate_screen = false;
        }
        if self.modes.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.modes.raw_mode = false;
        }
        if self.modes.cursor_hidden {
            let _ = execute!(self.writer, cursor::Show);
            self.modes.cursor_hidden = false;
        }
    }
}

impl<W: Write> Drop for TerminalRenderStream<W> {
    fn drop(&mut self) {
        let pending = self.modes;
        if pending.raw_mode || pending.alternate_screen || pending.cursor_hidden {
            tracing::warn!("Terminal stream dropped without cleanup, restoring modes");
            self.restore_modes();
        }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Print keeps crossterm's cursor bookkeeping in step with the text
        let text = String::from_utf8_lossy(buf);
        queue!(self.writer, Print(text))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        queue!(
            self.writer,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All)
        )
        .context("Failed to clear screen")
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.writer, cursor::MoveTo(x, y)).context("Failed to move cursor")
    }

    fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.writer, cursor::Hide)?;
        self.modes.cursor_hidden = true;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        queue!(self.writer, cursor::Show)?;
        self.modes.cursor_hidden = false;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        terminal::size().context("Failed to query terminal size")
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(self.writer, EnterAlternateScreen)?;
        self.modes.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(self.writer, LeaveAlternateScreen)?;
        self.modes.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        self.modes.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        self.modes.raw_mode = false;
        Ok(())
    }
}
