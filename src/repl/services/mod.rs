//! # Services Layer
//!
//! Collaborators the controller talks to outside of the line editor:
//!
//! - command execution (async, fire and forget)
//! - history hydration at start-up
//! - the JSON Lines transcript log
//!
//! Services exist only where they manage their own state or wrap an
//! external resource.

pub mod executor;
pub mod history_source;
pub mod transcript_log;

// Re-export service types
pub use executor::{
    BuiltinExecutor, CommandExecutor, ExecutionFuture, ExecutionOutcome, ExecutionService,
};
pub use history_source::{
    HistorySource, StaticHistorySource, TranscriptLogHistorySource, DEFAULT_HISTORY_LIMIT,
};
pub use transcript_log::TranscriptLog;
