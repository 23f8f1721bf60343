//! Fitlog CLI: transcripts and reports for wiki acceptance test runs
//!
//! ## Usage
//!
//! ```bash
//! fitlog replay run.jsonl                          # transcript + reports in target/fitlog
//! fitlog replay run.jsonl --assets-root FitNesseRoot --reset-per-test
//! fitlog render chunk.html                         # one chunk as transcript text
//! fitlog render chunk.html --report > chunk.html   # one chunk as a report
//! ```

use clap::Parser;
use fitlog_cli::{
    handlers::{execute_render, execute_replay},
    logging::init_logging,
    Cli, CliConfig, CliResult, ColorChoice, Commands, StatusReporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(&config, cli.log_json)?;

    let reporter = StatusReporter::new(
        config.color.should_color_stderr(),
        config.verbosity.is_quiet(),
    );

    match cli.command {
        Commands::Replay(args) => {
            let stdout = std::io::stdout();
            let outcome = execute_replay(&config, &args, stdout.lock())?;
            if config.verbosity.is_verbose() {
                for path in &outcome.reports {
                    reporter.info(&format!("report {}", path.display()));
                }
            }
            if outcome.stats.tests_started == 0 {
                reporter.warning("recording contained no tests");
            }
            reporter.run_summary(&outcome.stats, outcome.reports.len());
            Ok(())
        }
        Commands::Render(args) => {
            let stdout = std::io::stdout();
            execute_render(&config, &args, stdout.lock())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .load_render(cli.config.as_deref())
}
