//! # Application Control Commands
//!
//! Commands for submitting the line and controlling the console lifecycle.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Submit the buffer (Enter outside of search)
pub struct SubmitCommand;

impl Command for SubmitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter) && !context.state.is_searching()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SubmitRequested])
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

/// Terminate application (Ctrl+C, or Ctrl+D on an empty line)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match event.code {
            KeyCode::Char('c') => true,
            KeyCode::Char('d') => {
                !context.state.is_searching() && context.state.active_text.is_empty()
            }
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Clear the transcript (Ctrl+L)
pub struct ClearTranscriptCommand;

impl Command for ClearTranscriptCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('l')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearTranscriptRequested])
    }

    fn name(&self) -> &'static str {
        "ClearTranscript"
    }
}
