//! # Command Trait
//!
//! Key-bound commands inspect a read-only snapshot of the line editor and
//! describe the change they want as [`CommandEvent`]s. The controller
//! decides how to apply them.

use anyhow::Result;
use crossterm::event::KeyEvent;

use super::{CommandContext, CommandEvent};

pub trait Command: Send + Sync {
    /// Check if this command should handle the given key in the current state.
    ///
    /// Guards are written so that at most one registered command is relevant
    /// for any key and mode.
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events describing what should happen
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}
