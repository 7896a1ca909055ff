//! # Navigation Commands
//!
//! Up and Down are shared by three lists: suggestions, search results and
//! command history. [`DirectionalCommand`] routes each key press to exactly
//! one of them, in that order of precedence.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::models::{ModeKind, NavDirection};

/// Map Up/Down (and Ctrl+P/Ctrl+N) to a direction
fn direction_of(event: &KeyEvent) -> Option<NavDirection> {
    match event.code {
        KeyCode::Up => Some(NavDirection::Up),
        KeyCode::Down => Some(NavDirection::Down),
        KeyCode::Char('p') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(NavDirection::Up)
        }
        KeyCode::Char('n') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(NavDirection::Down)
        }
        _ => None,
    }
}

/// Directional input, dispatched by mode
pub struct DirectionalCommand;

impl Command for DirectionalCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        direction_of(event).is_some()
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let Some(direction) = direction_of(&event) else {
            return Ok(vec![]);
        };

        let routed = match context.state.mode {
            ModeKind::Suggesting if context.state.has_suggestions => {
                CommandEvent::suggestion_nav(direction)
            }
            ModeKind::ReverseSearching => {
                if !context.state.has_search_results {
                    return Ok(vec![]);
                }
                CommandEvent::search_nav(direction)
            }
            _ => CommandEvent::history_nav(direction),
        };
        Ok(vec![routed])
    }

    fn name(&self) -> &'static str {
        "Directional"
    }
}

/// Accept the selected suggestion (Tab)
pub struct TabCompleteCommand;

impl Command for TabCompleteCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Tab)
            && context.state.mode == ModeKind::Suggesting
            && context.state.has_suggestions
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::TabCompleteRequested])
    }

    fn name(&self) -> &'static str {
        "TabComplete"
    }
}
