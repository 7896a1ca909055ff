//! # Command Vocabulary and Suggestions
//!
//! The vocabulary is the fixed list of command names the console knows
//! about. Suggestions are derived from it by case-insensitive prefix match,
//! keeping vocabulary order and capping the result.

/// Maximum number of suggestions offered at once
pub const MAX_SUGGESTIONS: usize = 5;

/// Commands known to the case-management console
const DEFAULT_COMMANDS: &[&str] = &[
    "help",
    "clear",
    "history",
    "cases",
    "cases list",
    "cases show",
    "cases create",
    "cases delete",
    "cases assign",
    "evidence",
    "evidence list",
    "evidence show",
    "evidence upload",
    "disputes",
    "disputes list",
    "disputes open",
    "disputes resolve",
    "workflows",
    "workflows list",
    "workflows run",
    "documents list",
    "deadlines",
    "status",
    "whoami",
    "version",
    "echo",
    "exit",
];

/// Static vocabulary of known command names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    commands: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    /// Vocabulary entries starting with `prefix` (case-insensitive), at most
    /// [`MAX_SUGGESTIONS`], in vocabulary order
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let needle = prefix.to_lowercase();
        self.commands
            .iter()
            .filter(|command| command.to_lowercase().starts_with(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_COMMANDS.iter().copied())
    }
}

/// Direction of a vertical navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Move a suggestion selection one step, wrapping at both ends.
///
/// `None` means nothing is selected yet: down selects the first entry, up
/// selects the last.
pub fn wrap_selection(selected: Option<usize>, len: usize, direction: NavDirection) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let next = match (selected, direction) {
        (None, NavDirection::Down) => 0,
        (None, NavDirection::Up) => len - 1,
        (Some(i), NavDirection::Down) => (i + 1) % len,
        (Some(0), NavDirection::Up) => len - 1,
        (Some(i), NavDirection::Up) => (i - 1).min(len - 1),
    };
    Some(next)
}
