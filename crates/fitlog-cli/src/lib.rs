//! Fitlog CLI Library
//!
//! Command-line interface for fitlog: replays recorded test runs into a
//! transcript on stdout and HTML reports on disk, or renders a single chunk
//! of markup.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, RenderArgs, ReplayArgs};
pub use config::{CliConfig, ColorChoice, Verbosity, DEFAULT_REPORT_DIR};
pub use error::{CliError, CliResult};
pub use output::{summary_line, StatusReporter};
