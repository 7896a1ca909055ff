//! # Transcript Model
//!
//! Display log of what happened in the console: echoed commands and the
//! output or error each execution produced.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Kind of transcript record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Command,
    Output,
    Error,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub kind: RecordKind,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl TranscriptRecord {
    pub fn new(kind: RecordKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            created_at: Local::now(),
        }
    }

    pub fn command(text: impl Into<String>) -> Self {
        Self::new(RecordKind::Command, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(RecordKind::Output, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(RecordKind::Error, text)
    }
}

/// Records kept in memory before the oldest are dropped; the JSONL log
/// keeps everything
pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct Transcript {
    records: Vec<TranscriptRecord>,
    limit: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_limit(DEFAULT_TRANSCRIPT_LIMIT)
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript retaining at most `limit` records (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn append(&mut self, record: TranscriptRecord) {
        self.records.push(record);
        if self.records.len() > self.limit {
            let excess = self.records.len() - self.limit;
            self.records.drain(..excess);
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[TranscriptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptRecord> {
        self.records.last()
    }

    /// The last `rows` display lines, oldest first. Only the records needed
    /// to fill `rows` are flattened; multi-line output spans several lines.
    pub fn display_tail(&self, rows: usize) -> Vec<(RecordKind, String)> {
        let mut newest_first = Vec::with_capacity(rows);
        for record in self.records.iter().rev() {
            if newest_first.len() >= rows {
                break;
            }
            newest_first.extend(display_lines_of(record).into_iter().rev());
        }
        newest_first.truncate(rows);
        newest_first.reverse();
        newest_first
    }
}

fn display_lines_of(record: &TranscriptRecord) -> Vec<(RecordKind, String)> {
    let prefix = match record.kind {
        RecordKind::Command => "> ",
        RecordKind::Output => "",
        RecordKind::Error => "! ",
    };
    record
        .text
        .lines()
        .map(|line| (record.kind, format!("{prefix}{line}")))
        .collect()
}
