//! # Text Editing Commands
//!
//! Commands that rewrite the active text: the live buffer, or the search
//! term while reverse-i-search is active. Each produces a single
//! `TextChangeRequested` carrying the full new text.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Append a typed character
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) => {
                !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT)
                    && !ch.is_control()
            }
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if let KeyCode::Char(ch) = event.code {
            let mut text = context.state.active_text.clone();
            text.push(ch);
            Ok(vec![CommandEvent::text_change(text)])
        } else {
            Ok(vec![])
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Remove the last character (Backspace)
pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Backspace) && !context.state.active_text.is_empty()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let mut text = context.state.active_text.clone();
        text.pop();
        Ok(vec![CommandEvent::text_change(text)])
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Clear the whole line (Ctrl+U)
pub struct KillLineCommand;

impl Command for KillLineCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('u'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && !context.state.active_text.is_empty()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::text_change(String::new())])
    }

    fn name(&self) -> &'static str {
        "KillLine"
    }
}

/// Delete the word before the end of the line (Ctrl+W)
pub struct DeleteWordCommand;

impl Command for DeleteWordCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('w'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && !context.state.active_text.is_empty()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::text_change(delete_last_word(
            &context.state.active_text,
        ))])
    }

    fn name(&self) -> &'static str {
        "DeleteWord"
    }
}

/// Drop trailing whitespace, then the word before it
fn delete_last_word(text: &str) -> String {
    text.trim_end()
        .trim_end_matches(|c: char| !c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::EditorSnapshot;
    use crate::repl::models::ModeKind;

    fn context_with_text(text: &str) -> CommandContext {
        CommandContext::new(EditorSnapshot {
            mode: ModeKind::Editing,
            active_text: text.to_string(),
            has_suggestions: false,
            has_search_results: false,
        })
    }

    #[test]
    fn insert_char_should_append_to_active_text() {
        let context = context_with_text("case");
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);

        assert!(InsertCharCommand.is_relevant(&context, &event));
        let events = InsertCharCommand.execute(event, &context).unwrap();

        assert_eq!(events, vec![CommandEvent::text_change("cases")]);
    }

    #[test]
    fn insert_char_should_accept_shifted_characters() {
        let context = context_with_text("");
        let event = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);

        assert!(InsertCharCommand.is_relevant(&context, &event));
    }

    #[test]
    fn insert_char_should_ignore_control_chords() {
        let context = context_with_text("");
        let event = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);

        assert!(!InsertCharCommand.is_relevant(&context, &event));
    }

    #[test]
    fn backspace_should_remove_last_character() {
        let context = context_with_text("help");
        let event = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);

        let events = BackspaceCommand.execute(event, &context).unwrap();

        assert_eq!(events, vec![CommandEvent::text_change("hel")]);
    }

    #[test]
    fn backspace_should_not_be_relevant_on_empty_text() {
        let context = context_with_text("");
        let event = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);

        assert!(!BackspaceCommand.is_relevant(&context, &event));
    }

    #[test]
    fn kill_line_should_clear_text() {
        let context = context_with_text("cases show 12");
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert!(KillLineCommand.is_relevant(&context, &event));
        let events = KillLineCommand.execute(event, &context).unwrap();

        assert_eq!(events, vec![CommandEvent::text_change("")]);
    }

    #[test]
    fn delete_word_should_remove_previous_word() {
        assert_eq!(delete_last_word("cases show 12"), "cases show ");
        assert_eq!(delete_last_word("cases show "), "cases ");
        assert_eq!(delete_last_word("help"), "");
    }

    #[test]
    fn delete_word_should_handle_multibyte_whitespace() {
        assert_eq!(delete_last_word("案件\u{3000}一覧"), "案件\u{3000}");
        assert_eq!(delete_last_word("cases\u{00A0}list"), "cases\u{00A0}");
        assert_eq!(delete_last_word("案件\u{3000}"), "");
    }

    #[test]
    fn delete_word_command_should_keep_wide_text_intact() {
        let context = context_with_text("証拠 一覧\u{3000}表示");
        let event = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);

        let events = DeleteWordCommand.execute(event, &context).unwrap();

        assert_eq!(events, vec![CommandEvent::text_change("証拠 一覧\u{3000}")]);
    }
}
