//! A single render run.
//!
//! [`RenderRun`] owns both sinks and every piece of state for one run. Events
//! come either from the engine through [`TestListener`] or from a recorded
//! JSON-lines stream via [`RenderRun::replay`].

use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::event::{TestEvent, TestListener, TestPage, TestSummary};
use crate::result::{FitlogError, FitlogResult};
use crate::sink::{CompletedReport, ReportSink, TranscriptSink};

/// Counters for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Tests started
    pub tests_started: usize,
    /// Tests completed
    pub tests_completed: usize,
    /// Output chunks received
    pub chunks: usize,
    /// Whether the run was aborted
    pub aborted: bool,
}

/// Routes events to the transcript and report sinks
#[derive(Debug)]
pub struct RenderRun<W: Write> {
    transcript: TranscriptSink<W>,
    report: ReportSink,
    running: Option<TestPage>,
    reports: Vec<CompletedReport>,
    stats: RunStats,
}

impl<W: Write> RenderRun<W> {
    /// Set up a run writing its transcript to `out`
    pub fn new(out: W, config: &RenderConfig) -> FitlogResult<Self> {
        config.validate()?;
        let report = ReportSink::from_config(config)?;
        Ok(Self::with_sinks(TranscriptSink::new(out, config), report))
    }

    /// Set up a run around existing sinks
    pub fn with_sinks(transcript: TranscriptSink<W>, report: ReportSink) -> Self {
        Self {
            transcript,
            report,
            running: None,
            reports: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// The transcript sink
    pub fn transcript(&self) -> &TranscriptSink<W> {
        &self.transcript
    }

    /// Reports finished so far
    pub fn reports(&self) -> &[CompletedReport] {
        &self.reports
    }

    /// Counters so far
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Replay a recorded JSON-lines event stream.
    ///
    /// Blank lines are skipped. On a malformed line, or if the stream ends
    /// while a test is running, the run is aborted so the in-flight output
    /// is closed.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> FitlogResult<RunStats> {
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    self.abort(&format!("cannot read event line {line_no}: {err}"));
                    return Err(err.into());
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let event: TestEvent = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(err) => {
                    self.abort(&format!("invalid event on line {line_no}"));
                    return Err(FitlogError::EventParse {
                        line: line_no,
                        message: err.to_string(),
                    });
                }
            };
            self.dispatch(&event);
        }
        if let Some(page) = self.running.clone() {
            warn!(test = %page, "event stream ended while a test was running");
            self.abort("event stream ended before the test completed");
        }
        Ok(self.stats)
    }

    /// Abort the run, closing any in-flight output in both sinks
    pub fn abort(&mut self, reason: &str) {
        self.run_aborted(reason);
    }

    /// End the run and hand back every finished report
    pub fn finish(mut self) -> Vec<CompletedReport> {
        if self.running.is_some() || self.report.current().is_some() {
            self.abort("run finished while a test was running");
        }
        self.transcript.flush();
        std::mem::take(&mut self.reports)
    }

    fn collect_report(&mut self) {
        if let Some(report) = self.report.take_report() {
            self.reports.push(report);
        }
    }
}

impl<W: Write> TestListener for RenderRun<W> {
    fn test_started(&mut self, page: &TestPage) {
        debug!(test = %page, "test started");
        self.stats.tests_started += 1;
        self.transcript.test_started(page);
        self.report.test_started(page);
        self.collect_report();
        self.running = Some(page.clone());
    }

    fn output_chunk(&mut self, chunk: &str) {
        if self.running.is_none() {
            warn!(len = chunk.len(), "output chunk outside of a test");
        }
        self.stats.chunks += 1;
        self.transcript.output_chunk(chunk);
        self.report.output_chunk(chunk);
    }

    fn test_complete(&mut self, page: &TestPage, summary: &TestSummary) {
        match &self.running {
            Some(running) if running != page => {
                warn!(running = %running, completed = %page, "completion for a different test");
            }
            None => warn!(test = %page, "completion without a start"),
            Some(_) => {}
        }
        debug!(test = %page, %summary, "test complete");
        self.stats.tests_completed += 1;
        self.transcript.test_complete(page, summary);
        self.report.test_complete(page, summary);
        self.collect_report();
        self.running = None;
    }

    fn run_aborted(&mut self, reason: &str) {
        warn!(reason, "run aborted");
        self.stats.aborted = true;
        self.transcript.run_aborted(reason);
        self.report.run_aborted(reason);
        self.collect_report();
        self.running = None;
    }
}
