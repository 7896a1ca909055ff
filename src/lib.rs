//! # caseline - Terminal Console for Case Management
//!
//! An interactive command console with shell-style history navigation,
//! reverse-i-search and prefix completion over a fixed command vocabulary.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  KeyEvent   ┌─────────────────┐  CommandEvent  ┌────────────┐
//! │ EventStream  │────────────▶│ CommandRegistry │───────────────▶│ Controller │
//! └──────────────┘             └─────────────────┘                └─────┬──────┘
//!                                                                       │
//!         ┌──────────────────────┬──────────────────────┬───────────────┤
//!         ▼                      ▼                      ▼               ▼
//!   ┌────────────┐       ┌──────────────┐       ┌────────────┐   ┌──────────────┐
//!   │ LineEditor │       │ ExecutionSvc │──────▶│ Transcript │──▶│ConsoleRenderer│
//!   │ (history,  │       │ (tokio tasks,│ mpsc  │ + JSONL log│   │ RenderStream │
//!   │  search,   │       │  outcomes)   │       └────────────┘   └──────────────┘
//!   │ suggest)   │       └──────────────┘
//!   └────────────┘
//! ```
//!
//! The [`LineEditor`] is a pure state machine; everything that touches the
//! terminal or the runtime is injected into the [`AppController`].

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
