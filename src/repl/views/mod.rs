//! # Views Module
//!
//! Rendering of the console: transcript, overlay and prompt.

pub mod console_renderer;

pub use console_renderer::{ConsoleRenderer, ViewRenderer};
