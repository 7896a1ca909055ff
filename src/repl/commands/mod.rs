//! # Command Implementations
//!
//! Key-bound commands organized by category, plus the registry that
//! dispatches key events to them.

pub mod app;
pub mod command;
pub mod context;
pub mod editing;
pub mod events;
pub mod navigation;
pub mod registry;
pub mod search;

pub use app::*;
pub use command::Command;
pub use context::{CommandContext, EditorSnapshot};
pub use editing::*;
pub use events::CommandEvent;
pub use navigation::*;
pub use registry::CommandRegistry;
pub use search::*;
