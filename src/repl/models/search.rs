//! # Reverse Search Session
//!
//! Ephemeral state of a reverse-i-search: the typed term, the history
//! entries it matches and a clamped result cursor. The live edit buffer is
//! not part of the session; it stays untouched while the search is active.

use crate::repl::models::{history::CommandHistory, suggestions::NavDirection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    term: String,
    results: Vec<String>,
    cursor: usize,
}

impl SearchSession {
    /// Start a session over the whole history, unfiltered
    pub fn begin(history: &CommandHistory) -> Self {
        Self {
            term: String::new(),
            results: history.entries().to_vec(),
            cursor: 0,
        }
    }

    /// Replace the search term and refilter; the cursor returns to 0
    pub fn update_term(&mut self, term: String, history: &CommandHistory) {
        self.results = history.matching(&term);
        self.term = term;
        self.cursor = 0;
    }

    /// Move the result cursor one step, clamped to the result range.
    ///
    /// Returns `false` when there are no results.
    pub fn navigate(&mut self, direction: NavDirection) -> bool {
        if self.results.is_empty() {
            return false;
        }

        self.cursor = match direction {
            NavDirection::Up => self.cursor.saturating_sub(1),
            NavDirection::Down => (self.cursor + 1).min(self.results.len() - 1),
        };
        true
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&str> {
        self.results.get(self.cursor).map(String::as_str)
    }
}
