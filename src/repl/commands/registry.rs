//! # Command Registry
//!
//! Holds every key-bound command and runs the first one whose
//! `is_relevant()` accepts the key in the current state.

use anyhow::Result;
use crossterm::event::KeyEvent;

use super::{
    AppTerminateCommand, BackspaceCommand, ClearTranscriptCommand, Command, CommandContext,
    CommandEvent, DeleteWordCommand, DirectionalCommand, EscapeCommand, InsertCharCommand,
    KillLineCommand, SearchAcceptCommand, SubmitCommand, TabCompleteCommand,
    ToggleReverseSearchCommand,
};

/// Type alias for the command collection
type CommandCollection = Vec<Box<dyn Command>>;

pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create a new registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    /// Register all default commands
    fn register_default_commands(&mut self) {
        // Lifecycle commands
        self.add_command(Box::new(AppTerminateCommand));
        self.add_command(Box::new(ClearTranscriptCommand));

        // Search commands
        self.add_command(Box::new(ToggleReverseSearchCommand));
        self.add_command(Box::new(SearchAcceptCommand));
        self.add_command(Box::new(EscapeCommand));

        // Navigation and completion
        self.add_command(Box::new(DirectionalCommand));
        self.add_command(Box::new(TabCompleteCommand));

        // Submission
        self.add_command(Box::new(SubmitCommand));

        // Text editing commands
        self.add_command(Box::new(KillLineCommand));
        self.add_command(Box::new(DeleteWordCommand));
        self.add_command(Box::new(BackspaceCommand));
        self.add_command(Box::new(InsertCharCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event and return the events of the first relevant command
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!(
                    "Found relevant command: {} for key {:?} in mode {:?}",
                    command.name(),
                    event,
                    context.state.mode
                );
                return command.execute(event, context);
            }
        }

        tracing::debug!(
            "No relevant command found for key {:?} in mode {:?}",
            event,
            context.state.mode
        );
        Ok(vec![])
    }

    /// Get count of registered commands
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Names of registered commands, in dispatch order
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|command| command.name()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::{CommandHistory, LineEditor, NavDirection, Vocabulary};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn registry_should_create_with_default_commands() {
        let registry = CommandRegistry::new();

        assert!(registry.command_count() > 0);
        assert!(registry.command_names().contains(&"Directional"));
        assert!(registry.command_names().contains(&"ToggleReverseSearch"));
    }

    #[test]
    fn enter_should_submit_while_editing_and_accept_while_searching() {
        let registry = CommandRegistry::new();
        let mut editor =
            LineEditor::with_history(Vocabulary::default(), CommandHistory::with_entries(["help"]));

        let events = registry
            .process_event(key(KeyCode::Enter), &CommandContext::from_editor(&editor))
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SubmitRequested]);

        editor.toggle_reverse_search();
        let events = registry
            .process_event(key(KeyCode::Enter), &CommandContext::from_editor(&editor))
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SearchAcceptRequested]);
    }

    #[test]
    fn up_should_route_by_mode() {
        let registry = CommandRegistry::new();
        let mut editor =
            LineEditor::with_history(Vocabulary::default(), CommandHistory::with_entries(["help"]));

        let events = registry
            .process_event(key(KeyCode::Up), &CommandContext::from_editor(&editor))
            .unwrap();
        assert_eq!(events, vec![CommandEvent::history_nav(NavDirection::Up)]);

        editor.on_text_change("cas");
        let events = registry
            .process_event(key(KeyCode::Up), &CommandContext::from_editor(&editor))
            .unwrap();
        assert_eq!(events, vec![CommandEvent::suggestion_nav(NavDirection::Up)]);
    }

    #[test]
    fn typing_while_searching_should_extend_search_term() {
        let registry = CommandRegistry::new();
        let mut editor = LineEditor::default();
        editor.on_text_change("draft");
        editor.toggle_reverse_search();

        let events = registry
            .process_event(key(KeyCode::Char('x')), &CommandContext::from_editor(&editor))
            .unwrap();

        assert_eq!(events, vec![CommandEvent::text_change("x")]);
    }

    #[test]
    fn unbound_key_should_produce_no_events() {
        let registry = CommandRegistry::new();
        let editor = LineEditor::default();

        let events = registry
            .process_event(key(KeyCode::F(5)), &CommandContext::from_editor(&editor))
            .unwrap();

        assert!(events.is_empty());
    }
}
