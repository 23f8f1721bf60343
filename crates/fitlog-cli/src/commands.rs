//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fitlog: terminal transcripts and self-contained HTML reports for wiki test runs
#[derive(Parser, Debug)]
#[command(name = "fitlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Render configuration file (YAML)
    #[arg(long, global = true, env = "FITLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded event stream: transcript to stdout, reports to disk
    Replay(ReplayArgs),

    /// Render one markup file and print the result
    Render(RenderArgs),
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Recorded events, one JSON object per line ("-" for stdin)
    pub events: PathBuf,

    /// Root that image paths are resolved against
    #[arg(long)]
    pub assets_root: Option<PathBuf>,

    /// Directory for the HTML reports
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Clear collapsed-section state at the start of every test
    #[arg(long)]
    pub reset_per_test: bool,

    /// Leave wiki tables unaligned
    #[arg(long)]
    pub plain_tables: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// File holding one chunk of rendered test markup
    pub chunk_file: PathBuf,

    /// Print a self-contained HTML report instead of transcript text
    #[arg(long)]
    pub report: bool,

    /// Root that image paths are resolved against (report mode)
    #[arg(long)]
    pub assets_root: Option<PathBuf>,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
