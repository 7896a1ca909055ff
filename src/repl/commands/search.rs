//! # Reverse Search Commands
//!
//! Ctrl+R toggles reverse-i-search, Enter accepts the highlighted result,
//! Esc cancels. Esc outside of search dismisses the suggestion list.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::models::ModeKind;

/// Enter or leave reverse search (Ctrl+R)
pub struct ToggleReverseSearchCommand;

impl Command for ToggleReverseSearchCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('r')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ReverseSearchToggleRequested])
    }

    fn name(&self) -> &'static str {
        "ToggleReverseSearch"
    }
}

/// Accept the current search result (Enter while searching)
pub struct SearchAcceptCommand;

impl Command for SearchAcceptCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter) && context.state.is_searching()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchAcceptRequested])
    }

    fn name(&self) -> &'static str {
        "SearchAccept"
    }
}

/// Esc: cancel search, or hide suggestions
pub struct EscapeCommand;

impl Command for EscapeCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc)
            && matches!(
                context.state.mode,
                ModeKind::ReverseSearching | ModeKind::Suggesting
            )
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let event = if context.state.is_searching() {
            CommandEvent::SearchCancelRequested
        } else {
            CommandEvent::DismissSuggestionsRequested
        };
        Ok(vec![event])
    }

    fn name(&self) -> &'static str {
        "Escape"
    }
}
