//! # Command Context
//!
//! Read-only view of the line editor handed to commands so that relevance
//! checks never need mutable access.

use crate::repl::models::{LineEditor, ModeKind};

/// Read-only snapshot of LineEditor state for commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub mode: ModeKind,
    /// Search term while searching, live buffer otherwise
    pub active_text: String,
    pub has_suggestions: bool,
    pub has_search_results: bool,
}

impl EditorSnapshot {
    /// Create snapshot from current LineEditor state
    pub fn from_editor(editor: &LineEditor) -> Self {
        Self {
            mode: editor.mode_kind(),
            active_text: editor.active_text().to_string(),
            has_suggestions: !editor.suggestions().is_empty(),
            has_search_results: editor
                .search()
                .is_some_and(|session| !session.results().is_empty()),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.mode == ModeKind::ReverseSearching
    }
}

/// Base context available to all commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub state: EditorSnapshot,
}

impl CommandContext {
    pub fn new(state: EditorSnapshot) -> Self {
        Self { state }
    }

    pub fn from_editor(editor: &LineEditor) -> Self {
        Self::new(EditorSnapshot::from_editor(editor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::{CommandHistory, Vocabulary};

    #[test]
    fn snapshot_should_capture_editing_state() {
        let editor = LineEditor::default();
        let snapshot = EditorSnapshot::from_editor(&editor);

        assert_eq!(snapshot.mode, ModeKind::Editing);
        assert_eq!(snapshot.active_text, "");
        assert!(!snapshot.has_suggestions);
        assert!(!snapshot.has_search_results);
    }

    #[test]
    fn snapshot_should_report_search_term_as_active_text() {
        let mut editor = LineEditor::with_history(
            Vocabulary::default(),
            CommandHistory::with_entries(["cases list"]),
        );
        editor.on_text_change("draft");
        editor.toggle_reverse_search();
        editor.on_text_change("cas");

        let context = CommandContext::from_editor(&editor);

        assert!(context.state.is_searching());
        assert_eq!(context.state.active_text, "cas");
        assert!(context.state.has_search_results);
    }
}
