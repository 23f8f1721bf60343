//! Command handlers - extracted from main.rs for testability
//!
//! Each handler takes its output writer as a parameter so tests can capture
//! what would go to stdout.

pub mod render;
pub mod replay;

pub use render::{execute_render, page_for_file};
pub use replay::{execute_replay, open_events, ReplayOutcome};
