//! # Console Implementation
//!
//! The line editor and everything around it: key commands, services,
//! terminal I/O, rendering and the controller that runs the loop.

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

// Re-export core types
pub use controllers::{AppController, ConsoleServices};
pub use io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
pub use views::{ConsoleRenderer, ViewRenderer};

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, EditorSnapshot};

pub use models::{
    CommandHistory, LineEditor, LineMode, ModeKind, NavDirection, RecordKind, SearchSession,
    Transcript, TranscriptRecord, Vocabulary,
};
pub use services::{
    BuiltinExecutor, CommandExecutor, ExecutionOutcome, ExecutionService, HistorySource,
    StaticHistorySource, TranscriptLog, TranscriptLogHistorySource,
};
