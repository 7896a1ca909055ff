//! # Transcript Log
//!
//! Appends transcript records to a JSON Lines file, one record per line.
//! The file doubles as the source for history hydration on the next start.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::repl::models::TranscriptRecord;

#[derive(Debug, Clone)]
pub struct TranscriptLog {
    path: PathBuf,
}

impl TranscriptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a JSON line, creating the file (and its
    /// directory) on first use
    pub fn append(&self, record: &TranscriptRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open transcript log {}", self.path.display()))?;

        let line = serde_json::to_string(record)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Append, logging instead of failing; the session must not stop over a
    /// log write
    pub fn record(&self, record: &TranscriptRecord) {
        if let Err(e) = self.append(record) {
            tracing::warn!("Failed to write transcript log: {:#}", e);
        }
    }

    /// Read every parseable record in file order; a missing file is empty
    pub fn read_all(&self) -> Result<Vec<TranscriptRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read transcript log {}", self.path.display()))?;

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<TranscriptRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!("Skipping malformed transcript line: {}", e);
                    None
                }
            })
            .collect())
    }
}
