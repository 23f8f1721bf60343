//! Console transcript sink
//!
//! Writes a banner when a test starts, every rendered chunk as it arrives,
//! and a ruled summary block when the test completes. Lines go straight to
//! the writer; if a write fails the line is sent to stdout instead so that
//! nothing is lost.

use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

use crate::config::{RenderConfig, ResetPolicy};
use crate::event::{TestListener, TestPage, TestSummary};
use crate::palette::{Palette, Tone};
use crate::pipeline::TranscriptPipeline;

/// Width of the rule above and below a summary
pub const SUMMARY_RULE_WIDTH: usize = 121;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Build the ruled summary block for a finished test
#[must_use]
pub fn print_summary(palette: Palette, test: &str, summary: &str) -> String {
    let rule = "-".repeat(SUMMARY_RULE_WIDTH);
    let line = palette.paint(Tone::Summary, &format!(" Summary of {test}: {summary}"));
    format!("\r\n{rule}\r\n{line}\r\n{rule}\r\n")
}

/// Renders the event stream as a terminal transcript
pub struct TranscriptSink<W: Write> {
    out: W,
    fallback: Box<dyn Write>,
    pipeline: TranscriptPipeline,
    palette: Palette,
    reset_policy: ResetPolicy,
    current: Option<TestPage>,
}

impl<W: Write> fmt::Debug for TranscriptSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptSink")
            .field("pipeline", &self.pipeline)
            .field("palette", &self.palette)
            .field("reset_policy", &self.reset_policy)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<W: Write> TranscriptSink<W> {
    /// Create a sink writing to `out`
    pub fn new(out: W, config: &RenderConfig) -> Self {
        Self::with_pipeline(
            out,
            TranscriptPipeline::from_config(config),
            Palette::with_color(config.color),
            config.reset_policy,
        )
    }

    /// Create a sink around an existing pipeline
    pub fn with_pipeline(
        out: W,
        pipeline: TranscriptPipeline,
        palette: Palette,
        reset_policy: ResetPolicy,
    ) -> Self {
        Self {
            out,
            fallback: Box::new(io::stdout()),
            pipeline,
            palette,
            reset_policy,
            current: None,
        }
    }

    /// Replace the stdout fallback used when `out` fails
    #[must_use]
    pub fn with_fallback(mut self, fallback: Box<dyn Write>) -> Self {
        self.fallback = fallback;
        self
    }

    /// The underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// The test currently in flight
    pub fn current(&self) -> Option<&TestPage> {
        self.current.as_ref()
    }

    /// The summary block for `test`, styled with this sink's palette
    #[must_use]
    pub fn print_summary(&self, test: &str, summary: &str) -> String {
        print_summary(self.palette, test, summary)
    }

    /// Flush the writer, logging rather than returning a failure
    pub fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!(error = %err, "transcript flush failed");
            if let Err(err) = self.fallback.flush() {
                warn!(error = %err, "stdout fallback flush failed");
            }
        }
    }

    fn write_line(&mut self, text: &str) {
        let mut line = text.to_string();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        let bytes = line.as_bytes();
        let (written, result) = write_counted(&mut self.out, bytes);
        if let Err(err) = result {
            warn!(error = %err, written, "transcript write failed, writing rest to stdout");
            if let Err(err) = self
                .fallback
                .write_all(&bytes[written..])
                .and_then(|()| self.fallback.flush())
            {
                warn!(error = %err, "stdout fallback failed");
            }
        }
    }

    fn close_current(&mut self, summary: &str) {
        if let Some(page) = self.current.take() {
            if self.pipeline.filter().is_hiding() {
                warn!(
                    test = %page,
                    "collapsed section still open at end of test; later output stays hidden"
                );
            }
            let block = self.print_summary(&page.full_path, summary);
            self.write_line(&block);
        }
        self.flush();
    }
}

impl<W: Write> TestListener for TranscriptSink<W> {
    fn test_started(&mut self, page: &TestPage) {
        if let Some(previous) = self.current.clone() {
            warn!(previous = %previous, next = %page, "test started before the previous one completed");
            self.close_current("incomplete");
        }
        if self.reset_policy == ResetPolicy::PerTest {
            self.pipeline.reset();
        }
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        self.write_line(&format!("\r\n{timestamp} - Test Started: {page}"));
        self.current = Some(page.clone());
    }

    fn output_chunk(&mut self, chunk: &str) {
        match self.pipeline.render(chunk) {
            Some(text) => self.write_line(&text),
            None => debug!(len = chunk.len(), "chunk hidden from transcript"),
        }
    }

    fn test_complete(&mut self, page: &TestPage, summary: &TestSummary) {
        if let Some(running) = self.current.as_ref().filter(|running| *running != page) {
            debug!(running = %running, completed = %page, "summary follows the completed page");
        }
        self.current = Some(page.clone());
        self.close_current(&summary.to_string());
    }

    fn run_aborted(&mut self, reason: &str) {
        self.close_current(&format!("aborted: {reason}"));
    }
}

impl<W: Write> Drop for TranscriptSink<W> {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

/// Like `write_all`, but reports how many bytes reached `out` before a failure
fn write_counted<W: Write>(out: &mut W, bytes: &[u8]) -> (usize, io::Result<()>) {
    let mut written = 0;
    while written < bytes.len() {
        match out.write(&bytes[written..]) {
            Ok(0) => {
                return (
                    written,
                    Err(io::Error::new(io::ErrorKind::WriteZero, "writer accepted no bytes")),
                )
            }
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return (written, Err(err)),
        }
    }
    (written, Ok(()))
}
