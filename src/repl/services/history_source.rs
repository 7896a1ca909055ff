//! # History Sources
//!
//! Inbound collaborators that seed command history once when the console
//! starts.

use anyhow::Result;

use crate::repl::models::RecordKind;
use crate::repl::services::TranscriptLog;

/// Default number of commands restored from a transcript log
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

pub trait HistorySource: Send {
    /// Prior commands, oldest first
    fn load(&self) -> Result<Vec<String>>;
}

/// Fixed list of commands, mostly for tests and `--no-history`
#[derive(Debug, Clone, Default)]
pub struct StaticHistorySource {
    entries: Vec<String>,
}

impl StaticHistorySource {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl HistorySource for StaticHistorySource {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }
}

/// Restores the most recent `command` records of a transcript log
#[derive(Debug, Clone)]
pub struct TranscriptLogHistorySource {
    log: TranscriptLog,
    limit: usize,
}

impl TranscriptLogHistorySource {
    pub fn new(log: TranscriptLog, limit: usize) -> Self {
        Self { log, limit }
    }
}

impl HistorySource for TranscriptLogHistorySource {
    fn load(&self) -> Result<Vec<String>> {
        let commands: Vec<String> = self
            .log
            .read_all()?
            .into_iter()
            .filter(|record| record.kind == RecordKind::Command)
            .map(|record| record.text)
            .collect();

        let skip = commands.len().saturating_sub(self.limit);
        Ok(commands.into_iter().skip(skip).collect())
    }
}
