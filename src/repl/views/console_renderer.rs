//! # Console Renderer
//!
//! Draws the whole console on every frame:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ > help                       │  transcript tail
//! │ Available commands:          │
//! │ ...                          │
//! │   cases                      │  overlay: suggestions or
//! │ * cases list                 │  search results (max 5 rows)
//! │ > cases l█                   │  prompt
//! └──────────────────────────────┘
//! ```

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::repl::io::RenderStream;
use crate::repl::models::{LineEditor, LineMode, Transcript, MAX_SUGGESTIONS};

/// Prompt shown before the live buffer
pub const PROMPT: &str = "> ";

/// Marker in front of the selected overlay row
const SELECTED_MARKER: &str = "* ";
const UNSELECTED_MARKER: &str = "  ";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for rendering
    fn initialize(&mut self) -> Result<()>;

    /// Render the full console state
    fn render_full(&mut self, editor: &LineEditor, transcript: &Transcript) -> Result<()>;

    /// Record a new terminal size
    fn update_size(&mut self, width: u16, height: u16);

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Overlay rows and the prompt line computed for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    overlay: Vec<String>,
    prompt: String,
    /// Display width of the prompt up to the cursor
    cursor_column: usize,
}

pub struct ConsoleRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> ConsoleRenderer<RS> {
    /// Create renderer owning the given render stream
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn build_frame(editor: &LineEditor) -> Frame {
        match editor.mode() {
            LineMode::Suggesting {
                suggestions,
                selected,
            } => {
                let highlighted = selected.unwrap_or(0);
                Frame {
                    overlay: marked_rows(suggestions, Some(highlighted)),
                    prompt: format!("{PROMPT}{}", editor.buffer()),
                    cursor_column: PROMPT.width() + editor.buffer().width(),
                }
            }
            LineMode::ReverseSearching(session) => {
                let results = session.results();
                // Keep the highlighted result inside the visible window
                let start = session.cursor().saturating_sub(MAX_SUGGESTIONS - 1);
                let end = (start + MAX_SUGGESTIONS).min(results.len());
                let window = &results[start..end];

                let head = format!("(reverse-i-search)'{}': ", session.term());
                // Cursor sits right after the term, before the closing quote
                let cursor_column = head.width() - "': ".len();
                let current = session.current().unwrap_or("");
                let mut overlay = marked_rows(window, Some(session.cursor() - start));
                if results.is_empty() {
                    overlay = vec![format!("{UNSELECTED_MARKER}(no matches)")];
                }
                Frame {
                    overlay,
                    prompt: format!("{head}{current}"),
                    cursor_column,
                }
            }
            LineMode::Editing | LineMode::BrowsingHistory { .. } => Frame {
                overlay: Vec::new(),
                prompt: format!("{PROMPT}{}", editor.buffer()),
                cursor_column: PROMPT.width() + editor.buffer().width(),
            },
        }
    }

    fn draw_line(&mut self, row: u16, text: &str) -> Result<()> {
        let width = self.terminal_size.0 as usize;
        self.render_stream.move_cursor(0, row)?;
        self.render_stream
            .write_all(truncate_to_width(text, width).as_bytes())?;
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for ConsoleRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.clear_screen()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_full(&mut self, editor: &LineEditor, transcript: &Transcript) -> Result<()> {
        let (width, height) = self.terminal_size;
        if height == 0 || width == 0 {
            return Ok(());
        }

        let frame = Self::build_frame(editor);
        let prompt_row = height - 1;
        let overlay_rows = frame.overlay.len().min(prompt_row as usize);
        let transcript_rows = prompt_row as usize - overlay_rows;

        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;

        let lines = transcript.display_tail(transcript_rows);
        for (row, (_, line)) in lines.iter().enumerate() {
            self.draw_line(row as u16, line)?;
        }

        let overlay_start = transcript_rows;
        for (offset, line) in frame.overlay.iter().take(overlay_rows).enumerate() {
            self.draw_line((overlay_start + offset) as u16, line)?;
        }

        self.draw_line(prompt_row, &frame.prompt)?;

        let cursor_x = frame.cursor_column.min(width as usize - 1) as u16;
        self.render_stream.move_cursor(cursor_x, prompt_row)?;
        self.render_stream.show_cursor()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn update_size(&mut self, width: u16, height: u16) {
        tracing::debug!("Terminal resized to {}x{}", width, height);
        self.terminal_size = (width, height);
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.show_cursor()?;
        self.render_stream.flush()?;
        Ok(())
    }
}

/// Prefix each row with the selection marker
fn marked_rows(rows: &[String], selected: Option<usize>) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if Some(i) == selected {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            format!("{marker}{row}")
        })
        .collect()
}

/// Cut `text` so that its display width fits in `width` columns
fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}
