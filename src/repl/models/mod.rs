//! # Models Module
//!
//! Re-exports all model implementations organized by category.
//! Models hold console state and know nothing about terminals or keys.

pub mod history;
pub mod line_editor;
pub mod search;
pub mod suggestions;
pub mod transcript;

pub use history::CommandHistory;
pub use line_editor::{LineEditor, LineMode, ModeKind};
pub use search::SearchSession;
pub use suggestions::{NavDirection, Vocabulary, MAX_SUGGESTIONS};
pub use transcript::{RecordKind, Transcript, TranscriptRecord, DEFAULT_TRANSCRIPT_LIMIT};
