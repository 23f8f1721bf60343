//! Render command handler

use fitlog::{ReportSink, TestListener, TestPage, TestSummary, TranscriptPipeline};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::RenderArgs;

/// Page name used for a rendered file: its stem
#[must_use]
pub fn page_for_file(path: &Path) -> TestPage {
    let stem = path
        .file_stem()
        .map_or_else(|| "chunk".into(), |s| s.to_string_lossy());
    TestPage::new(stem)
}

/// Execute the render command, writing the result to `out`
pub fn execute_render<W: Write>(config: &CliConfig, args: &RenderArgs, mut out: W) -> CliResult<()> {
    let markup = std::fs::read_to_string(&args.chunk_file)
        .map_err(|e| CliError::input(&args.chunk_file, e))?;

    let mut render = config.effective_render();
    if let Some(root) = &args.assets_root {
        render = render.with_assets_root(root);
    }

    if args.report {
        render.report_dir = None;
        let mut sink = ReportSink::from_config(&render)?;
        let page = page_for_file(&args.chunk_file);
        sink.test_started(&page);
        sink.output_chunk(&markup);
        sink.test_complete(&page, &TestSummary::default());
        if let Some(report) = sink.take_report() {
            out.write_all(report.html.as_bytes())?;
        }
    } else {
        match TranscriptPipeline::from_config(&render).render(&markup) {
            Some(text) => {
                out.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
            }
            None => debug!("nothing visible in chunk"),
        }
    }
    out.flush()?;
    Ok(())
}
