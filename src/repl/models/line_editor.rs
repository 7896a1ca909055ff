//! # Line Editor Model
//!
//! The command-line input model behind the console prompt. It owns the live
//! buffer, the command history and the current mode, and exposes one method
//! per user intent. Every method checks its own precondition and returns
//! `false` (or `None`) when called outside it, leaving state untouched.
//!
//! ## Modes
//!
//! ```text
//!            type (matches)             Tab / Esc / type (no match)
//!  Editing ─────────────────▶ Suggesting ─────────────────▶ Editing
//!     │  ▲
//!  Up │  │ Down past end / type
//!     ▼  │
//!  BrowsingHistory
//!
//!  any ──Ctrl+R──▶ ReverseSearching ──Enter/Esc/Ctrl+R──▶ Editing
//! ```
//!
//! The mode is a single tagged enum so suggestions and a search session can
//! never be active together.

use crate::repl::models::{
    history::CommandHistory,
    search::SearchSession,
    suggestions::{wrap_selection, NavDirection, Vocabulary},
};

/// Mode of the line editor, carrying the state that only exists in that mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Plain typing; no overlay
    #[default]
    Editing,
    /// Buffer holds the history entry at `index`
    BrowsingHistory { index: usize },
    /// Non-empty completion list for the current buffer
    Suggesting {
        suggestions: Vec<String>,
        selected: Option<usize>,
    },
    /// Reverse-i-search over history; the live buffer is hidden
    ReverseSearching(SearchSession),
}

/// Data-free discriminant of [`LineMode`], cheap to copy into snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Editing,
    BrowsingHistory,
    Suggesting,
    ReverseSearching,
}

impl LineMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            LineMode::Editing => ModeKind::Editing,
            LineMode::BrowsingHistory { .. } => ModeKind::BrowsingHistory,
            LineMode::Suggesting { .. } => ModeKind::Suggesting,
            LineMode::ReverseSearching(_) => ModeKind::ReverseSearching,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineEditor {
    buffer: String,
    mode: LineMode,
    history: CommandHistory,
    vocabulary: Vocabulary,
}

impl LineEditor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_history(vocabulary, CommandHistory::new())
    }

    pub fn with_history(vocabulary: Vocabulary, history: CommandHistory) -> Self {
        Self {
            buffer: String::new(),
            mode: LineMode::Editing,
            history,
            vocabulary,
        }
    }

    // ── queries ──────────────────────────────────────────────────────────

    /// The live edit buffer (hidden, but preserved, while searching)
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Text currently receiving keystrokes: the search term while searching,
    /// otherwise the live buffer
    pub fn active_text(&self) -> &str {
        match &self.mode {
            LineMode::ReverseSearching(session) => session.term(),
            _ => &self.buffer,
        }
    }

    pub fn mode(&self) -> &LineMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Position in history while browsing; `None` means live input
    pub fn history_index(&self) -> Option<usize> {
        match self.mode {
            LineMode::BrowsingHistory { index } => Some(index),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match &self.mode {
            LineMode::Suggesting { suggestions, .. } => suggestions.as_slice(),
            _ => &[],
        }
    }

    pub fn selected_suggestion(&self) -> Option<usize> {
        match self.mode {
            LineMode::Suggesting { selected, .. } => selected,
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&SearchSession> {
        match &self.mode {
            LineMode::ReverseSearching(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, LineMode::ReverseSearching(_))
    }

    // ── operations ───────────────────────────────────────────────────────

    /// Seed history once at session start
    pub fn hydrate_history(&mut self, entries: Vec<String>) -> bool {
        self.history.hydrate(entries)
    }

    /// Replace the active text.
    ///
    /// While searching this replaces the search term and refilters results.
    /// Otherwise it replaces the buffer and recomputes suggestions; typing
    /// over a recalled history entry returns to live input.
    pub fn on_text_change(&mut self, new_text: impl Into<String>) -> bool {
        let new_text = new_text.into();

        if let LineMode::ReverseSearching(session) = &mut self.mode {
            session.update_term(new_text, &self.history);
            return true;
        }

        self.buffer = new_text;
        self.refresh_suggestions();
        true
    }

    /// Commit the buffer to history.
    ///
    /// Returns the committed command exactly as typed, or `None` when the
    /// buffer is empty or a search is in progress.
    pub fn on_submit(&mut self) -> Option<String> {
        if self.is_searching() || self.buffer.is_empty() {
            return None;
        }

        let command = std::mem::take(&mut self.buffer);
        self.history.push(command.clone());
        self.mode = LineMode::Editing;
        tracing::debug!("Submitted command: {}", command);
        Some(command)
    }

    /// Step back through history, starting from the newest entry
    pub fn on_history_up(&mut self) -> bool {
        if !self.can_browse_history() || self.history.is_empty() {
            return false;
        }

        let index = match self.mode {
            LineMode::BrowsingHistory { index } => index.saturating_sub(1),
            _ => self.history.len() - 1,
        };
        self.recall(index);
        true
    }

    /// Step forward through history; moving past the newest entry (or pressing
    /// down while not browsing) clears the buffer
    pub fn on_history_down(&mut self) -> bool {
        if !self.can_browse_history() {
            return false;
        }

        match self.mode {
            LineMode::BrowsingHistory { index } if index + 1 < self.history.len() => {
                self.recall(index + 1);
            }
            _ => {
                self.buffer.clear();
                self.mode = LineMode::Editing;
            }
        }
        true
    }

    /// Replace the buffer with the selected (or first) suggestion
    pub fn on_tab_complete(&mut self) -> bool {
        let LineMode::Suggesting {
            suggestions,
            selected,
        } = &self.mode
        else {
            return false;
        };

        let Some(choice) = suggestions.get(selected.unwrap_or(0)).cloned() else {
            return false;
        };

        self.buffer = choice;
        self.mode = LineMode::Editing;
        true
    }

    /// Move the suggestion selection, wrapping at both ends
    pub fn on_suggestion_nav(&mut self, direction: NavDirection) -> bool {
        let LineMode::Suggesting {
            suggestions,
            selected,
        } = &mut self.mode
        else {
            return false;
        };

        *selected = wrap_selection(*selected, suggestions.len(), direction);
        true
    }

    /// Hide the suggestion list without touching the buffer
    pub fn dismiss_suggestions(&mut self) -> bool {
        if !matches!(self.mode, LineMode::Suggesting { .. }) {
            return false;
        }
        self.mode = LineMode::Editing;
        true
    }

    /// Enter reverse search, or leave it as if cancelled
    pub fn toggle_reverse_search(&mut self) -> bool {
        if self.is_searching() {
            return self.on_search_cancel();
        }

        self.mode = LineMode::ReverseSearching(SearchSession::begin(&self.history));
        true
    }

    /// Move the search result cursor, clamped to the results
    pub fn on_search_nav(&mut self, direction: NavDirection) -> bool {
        match &mut self.mode {
            LineMode::ReverseSearching(session) => session.navigate(direction),
            _ => false,
        }
    }

    /// Load the current search result into the buffer and stop searching
    pub fn on_search_accept(&mut self) -> bool {
        let LineMode::ReverseSearching(session) = &self.mode else {
            return false;
        };

        if let Some(found) = session.current() {
            self.buffer = found.to_string();
        }
        self.mode = LineMode::Editing;
        true
    }

    /// Abandon the search; the buffer is exactly what it was before
    pub fn on_search_cancel(&mut self) -> bool {
        if !self.is_searching() {
            return false;
        }
        self.mode = LineMode::Editing;
        true
    }

    // ── helpers ──────────────────────────────────────────────────────────

    fn can_browse_history(&self) -> bool {
        matches!(
            self.mode,
            LineMode::Editing | LineMode::BrowsingHistory { .. }
        )
    }

    fn recall(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.buffer = entry.to_string();
            self.mode = LineMode::BrowsingHistory { index };
        }
    }

    fn refresh_suggestions(&mut self) {
        let suggestions = self.vocabulary.suggest(&self.buffer);

        self.mode = if suggestions.is_empty() || self.buffer.is_empty() {
            LineMode::Editing
        } else {
            LineMode::Suggesting {
                suggestions,
                selected: None,
            }
        };
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_history(entries: &[&str]) -> LineEditor {
        LineEditor::with_history(
            Vocabulary::default(),
            CommandHistory::with_entries(entries.iter().copied()),
        )
    }

    #[test]
    fn new_editor_should_start_editing_with_empty_buffer() {
        let editor = LineEditor::default();

        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
        assert_eq!(editor.history_index(), None);
    }

    #[test]
    fn text_change_should_enter_suggesting_on_prefix_match() {
        let mut editor = LineEditor::default();

        assert!(editor.on_text_change("evi"));

        assert_eq!(editor.mode_kind(), ModeKind::Suggesting);
        assert_eq!(editor.suggestions()[0], "evidence");
        assert_eq!(editor.selected_suggestion(), None);
    }

    #[test]
    fn text_change_should_return_to_editing_without_match() {
        let mut editor = LineEditor::default();
        editor.on_text_change("evi");

        editor.on_text_change("evix");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);

        editor.on_text_change("");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
        assert!(editor.suggestions().is_empty());
    }

    #[test]
    fn submit_should_append_history_and_reset() {
        let mut editor = LineEditor::default();
        editor.on_text_change("help");

        let committed = editor.on_submit();

        assert_eq!(committed.as_deref(), Some("help"));
        assert_eq!(editor.history().entries(), &["help".to_string()]);
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_index(), None);
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn submit_should_ignore_empty_buffer() {
        let mut editor = LineEditor::default();

        assert_eq!(editor.on_submit(), None);
        assert!(editor.history().is_empty());
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn submit_should_commit_buffer_unchanged() {
        let mut editor = LineEditor::default();
        editor.on_text_change("  help  ");

        assert_eq!(editor.on_submit().as_deref(), Some("  help  "));
        assert_eq!(editor.history().entries(), &["  help  ".to_string()]);
        assert_eq!(editor.buffer(), "");

        editor.on_text_change("   ");
        assert_eq!(editor.on_submit().as_deref(), Some("   "));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn submit_should_not_commit_search_term() {
        let mut editor = editor_with_history(&["cases list"]);
        editor.toggle_reverse_search();
        editor.on_text_change("cases");

        assert_eq!(editor.on_submit(), None);
        assert_eq!(editor.history().len(), 1);
        assert!(editor.is_searching());
    }

    #[test]
    fn history_up_should_walk_towards_oldest_and_stop() {
        let mut editor = editor_with_history(&["c0", "c1", "c2"]);

        editor.on_history_up();
        assert_eq!(editor.buffer(), "c2");
        editor.on_history_up();
        assert_eq!(editor.buffer(), "c1");
        editor.on_history_up();
        assert_eq!(editor.buffer(), "c0");
        editor.on_history_up();
        assert_eq!(editor.buffer(), "c0");
        assert_eq!(editor.history_index(), Some(0));
    }

    #[test]
    fn history_up_should_ignore_empty_history() {
        let mut editor = LineEditor::default();
        assert!(!editor.on_history_up());
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn history_down_past_newest_should_clear_buffer() {
        let mut editor = editor_with_history(&["c0", "c1"]);
        editor.on_history_up();

        editor.on_history_down();

        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_index(), None);

        editor.on_history_down();
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_index(), None);
    }

    #[test]
    fn history_navigation_should_yield_to_suggestions() {
        let mut editor = editor_with_history(&["c0"]);
        editor.on_text_change("ca");

        assert!(!editor.on_history_up());
        assert!(!editor.on_history_down());
        assert_eq!(editor.buffer(), "ca");
    }

    #[test]
    fn typing_over_recalled_entry_should_leave_browsing() {
        let mut editor = editor_with_history(&["zzz"]);
        editor.on_history_up();

        editor.on_text_change("zzz1");

        assert_eq!(editor.history_index(), None);
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn recalled_entry_should_be_submittable() {
        let mut editor = editor_with_history(&["cases list"]);
        editor.on_history_up();

        assert_eq!(editor.on_submit().as_deref(), Some("cases list"));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn tab_should_complete_first_suggestion_by_default() {
        let mut editor = LineEditor::default();
        editor.on_text_change("dis");

        assert!(editor.on_tab_complete());

        assert_eq!(editor.buffer(), "disputes");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn tab_should_complete_selected_suggestion() {
        let mut editor = LineEditor::default();
        editor.on_text_change("dis");
        editor.on_suggestion_nav(NavDirection::Down);
        editor.on_suggestion_nav(NavDirection::Down);

        editor.on_tab_complete();

        assert_eq!(editor.buffer(), "disputes list");
    }

    #[test]
    fn tab_should_do_nothing_without_suggestions() {
        let mut editor = LineEditor::default();
        editor.on_text_change("xyz");

        assert!(!editor.on_tab_complete());
        assert_eq!(editor.buffer(), "xyz");
    }

    #[test]
    fn suggestion_nav_should_wrap() {
        let mut editor = LineEditor::default();
        editor.on_text_change("disputes");
        let count = editor.suggestions().len();

        editor.on_suggestion_nav(NavDirection::Up);
        assert_eq!(editor.selected_suggestion(), Some(count - 1));

        editor.on_suggestion_nav(NavDirection::Down);
        assert_eq!(editor.selected_suggestion(), Some(0));
    }

    #[test]
    fn entering_search_should_clear_suggestions() {
        let mut editor = editor_with_history(&["cases list"]);
        editor.on_text_change("ca");
        assert_eq!(editor.mode_kind(), ModeKind::Suggesting);

        editor.toggle_reverse_search();

        assert!(editor.suggestions().is_empty());
        assert_eq!(editor.search().map(|s| s.results().len()), Some(1));
        assert_eq!(editor.active_text(), "");
    }

    #[test]
    fn search_cancel_should_restore_buffer() {
        let mut editor = editor_with_history(&["cases list", "help"]);
        editor.on_text_change("draft command");
        editor.toggle_reverse_search();
        editor.on_text_change("help");
        editor.on_search_nav(NavDirection::Down);

        assert!(editor.on_search_cancel());

        assert_eq!(editor.buffer(), "draft command");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn toggling_search_off_should_behave_like_cancel() {
        let mut editor = editor_with_history(&["help"]);
        editor.on_text_change("draft");
        editor.toggle_reverse_search();
        editor.on_text_change("he");

        editor.toggle_reverse_search();

        assert_eq!(editor.buffer(), "draft");
        assert!(!editor.is_searching());
    }

    #[test]
    fn search_accept_should_load_current_result() {
        let mut editor = editor_with_history(&["cases list", "evidence show 3", "cases show 7"]);
        editor.toggle_reverse_search();
        editor.on_text_change("cases");
        editor.on_search_nav(NavDirection::Down);

        assert!(editor.on_search_accept());

        assert_eq!(editor.buffer(), "cases show 7");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn search_accept_without_results_should_keep_buffer() {
        let mut editor = editor_with_history(&["help"]);
        editor.on_text_change("draft");
        editor.toggle_reverse_search();
        editor.on_text_change("nope");

        assert!(editor.on_search_accept());

        assert_eq!(editor.buffer(), "draft");
        assert_eq!(editor.mode_kind(), ModeKind::Editing);
    }

    #[test]
    fn search_operations_should_be_ignored_outside_search() {
        let mut editor = editor_with_history(&["help"]);

        assert!(!editor.on_search_nav(NavDirection::Down));
        assert!(!editor.on_search_accept());
        assert!(!editor.on_search_cancel());
    }

    #[test]
    fn history_navigation_should_be_ignored_while_searching() {
        let mut editor = editor_with_history(&["help"]);
        editor.toggle_reverse_search();

        assert!(!editor.on_history_up());
        assert!(!editor.on_history_down());
    }
}
