//! # Command History Model
//!
//! Append-only log of submitted commands. Navigation state lives in the
//! line editor; this type only stores entries and answers queries.

/// Ordered, append-only sequence of previously submitted commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
    hydrated: bool,
}

impl CommandHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that already holds the given entries
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            hydrated: false,
        }
    }

    /// Seed history from an external source.
    ///
    /// Only the first call has an effect; later calls return `false`.
    /// Hydrated entries are placed before anything submitted so far.
    pub fn hydrate(&mut self, entries: Vec<String>) -> bool {
        if self.hydrated {
            tracing::debug!("History already hydrated, ignoring {} entries", entries.len());
            return false;
        }
        self.hydrated = true;

        let mut merged = entries;
        merged.append(&mut self.entries);
        self.entries = merged;
        true
    }

    /// Append a submitted command
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries containing `term`, compared case-insensitively, in history order
    pub fn matching(&self, term: &str) -> Vec<String> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
