//! Diagnostic logging setup
//!
//! Diagnostics always go to stderr; stdout carries only the transcript.
//! `RUST_LOG` overrides the level derived from `-q`/`-v`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{CliConfig, Verbosity};
use crate::error::{CliError, CliResult};

/// Filter for `verbosity`, unless `RUST_LOG` is set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Install the global subscriber
pub fn init_logging(config: &CliConfig, json: bool) -> CliResult<()> {
    let filter = env_filter(config.verbosity);
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(config.color.should_color_stderr())
                    .without_time(),
            )
            .try_init()
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
