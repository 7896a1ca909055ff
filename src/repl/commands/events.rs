//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the
//! LineEditor. Commands suggest, controller decides.

use crate::repl::models::NavDirection;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Replace the active text (buffer or search term)
    TextChangeRequested { text: String },

    /// Commit the buffer
    SubmitRequested,

    /// Step through command history
    HistoryNavigationRequested { direction: NavDirection },

    /// Move the suggestion selection
    SuggestionNavigationRequested { direction: NavDirection },

    /// Accept the selected suggestion
    TabCompleteRequested,

    /// Hide suggestions, keep the buffer
    DismissSuggestionsRequested,

    /// Enter or leave reverse-i-search
    ReverseSearchToggleRequested,

    /// Move the search result cursor
    SearchNavigationRequested { direction: NavDirection },

    /// Load the current search result into the buffer
    SearchAcceptRequested,

    /// Leave search restoring the buffer
    SearchCancelRequested,

    /// Drop all transcript records from the display
    ClearTranscriptRequested,

    /// Request to quit application
    QuitRequested,
}

impl CommandEvent {
    /// Create a text change event
    pub fn text_change(text: impl Into<String>) -> Self {
        Self::TextChangeRequested { text: text.into() }
    }

    pub fn history_nav(direction: NavDirection) -> Self {
        Self::HistoryNavigationRequested { direction }
    }

    pub fn suggestion_nav(direction: NavDirection) -> Self {
        Self::SuggestionNavigationRequested { direction }
    }

    pub fn search_nav(direction: NavDirection) -> Self {
        Self::SearchNavigationRequested { direction }
    }
}
