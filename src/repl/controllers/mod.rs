//! # Controllers Module
//!
//! Contains the controller that ties input, the line editor, execution and
//! rendering together.

pub mod app_controller;

// Re-export main types for convenience
pub use app_controller::{AppController, ConsoleServices};
