//! Replay command handler

use fitlog::{RenderConfig, RenderRun, ResetPolicy, RunStats};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::ReplayArgs;

/// What a replay produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Run counters
    pub stats: RunStats,
    /// Report files written
    pub reports: Vec<PathBuf>,
}

/// Open a recording; `-` reads stdin
pub fn open_events(path: &Path) -> CliResult<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|e| CliError::input(path, e))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Render settings for a replay: config file, then command-line overrides
#[must_use]
pub fn replay_config(config: &CliConfig, args: &ReplayArgs) -> RenderConfig {
    let mut render = config.effective_render();
    if let Some(root) = &args.assets_root {
        render = render.with_assets_root(root);
    }
    if args.reset_per_test {
        render = render.with_reset_policy(ResetPolicy::PerTest);
    }
    if args.plain_tables {
        render = render.with_align_tables(false);
    }
    render.with_report_dir(config.report_dir(args.report_dir.as_deref()))
}

/// Execute the replay command, writing the transcript to `out`
pub fn execute_replay<W: Write>(
    config: &CliConfig,
    args: &ReplayArgs,
    out: W,
) -> CliResult<ReplayOutcome> {
    let render = replay_config(config, args);
    let events = open_events(&args.events)?;
    let mut run = RenderRun::new(out, &render)?;
    info!(events = %args.events.display(), "replaying recorded run");

    let replayed = run.replay(events);
    let stats = run.stats();
    let reports = run
        .finish()
        .into_iter()
        .filter_map(|report| report.path)
        .collect();
    replayed?;

    Ok(ReplayOutcome { stats, reports })
}
