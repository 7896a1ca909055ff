//! # Mock I/O Implementations for Testing
//!
//! Scripted input and an in-memory screen so the whole console can be
//! exercised without a terminal.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Mock event stream replaying pre-programmed events
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a stream from plain key events
    pub fn from_keys(keys: Vec<KeyEvent>) -> Self {
        Self::new(keys.into_iter().map(Event::Key).collect())
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.push_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    /// Queue one key press per character of `text`
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Terminal state as seen by the mock, shared with tests
#[derive(Debug)]
struct ScreenState {
    size: TerminalSize,
    rows: Vec<Vec<char>>,
    cursor: (u16, u16),
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
    frames: usize,
}

impl ScreenState {
    fn new(size: TerminalSize) -> Self {
        Self {
            size,
            rows: blank_rows(size),
            cursor: (0, 0),
            cursor_visible: true,
            raw_mode: false,
            alternate_screen: false,
            frames: 0,
        }
    }

    fn put_str(&mut self, text: &str) {
        let (width, height) = (self.size.0 as usize, self.size.1 as usize);
        for ch in text.chars() {
            let (x, y) = (self.cursor.0 as usize, self.cursor.1 as usize);
            if y >= height {
                return;
            }
            if x < width {
                self.rows[y][x] = ch;
            }
            self.cursor.0 = self.cursor.0.saturating_add(1);
        }
    }
}

fn blank_rows((width, height): TerminalSize) -> Vec<Vec<char>> {
    vec![vec![' '; width as usize]; height as usize]
}

/// Read handle on a [`MockRenderStream`]'s screen, usable after the stream
/// has been moved into a renderer
#[derive(Debug, Clone)]
pub struct MockScreen {
    state: Arc<Mutex<ScreenState>>,
}

impl MockScreen {
    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Text of one row with trailing spaces removed
    pub fn line(&self, row: u16) -> String {
        self.lock()
            .rows
            .get(row as usize)
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// All rows, trailing spaces removed
    pub fn lines(&self) -> Vec<String> {
        let height = self.lock().size.1;
        (0..height).map(|row| self.line(row)).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.lock().cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.lock().cursor_visible
    }

    pub fn raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn alternate_screen(&self) -> bool {
        self.lock().alternate_screen
    }

    /// Number of full clears, i.e. frames drawn
    pub fn frames(&self) -> usize {
        self.lock().frames
    }
}

/// Mock render stream drawing into an in-memory character grid
#[derive(Debug)]
pub struct MockRenderStream {
    screen: MockScreen,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            screen: MockScreen {
                state: Arc::new(Mutex::new(ScreenState::new(size))),
            },
        }
    }

    pub fn screen(&self) -> MockScreen {
        self.screen.clone()
    }

    /// Simulate a terminal resize
    pub fn resize(&self, size: TerminalSize) {
        let mut state = self.screen.lock();
        state.size = size;
        state.rows = blank_rows(size);
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.screen.lock().put_str(&text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut state = self.screen.lock();
        let size = state.size;
        state.rows = blank_rows(size);
        state.cursor = (0, 0);
        state.frames += 1;
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.screen.lock().cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.screen.lock().cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.screen.lock().cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.screen.lock().size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.screen.lock().alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.screen.lock().alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.screen.lock().raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.screen.lock().raw_mode = false;
        Ok(())
    }
}
