//! Output sinks.
//!
//! Both sinks listen to the same event stream and produce independent
//! renderings of it:
//!
//! ```text
//!                    ┌─► TranscriptSink ─► ANSI text on a writer
//! TestEvent stream ──┤
//!                    └─► ReportSink ─────► one HTML document per test
//! ```

pub mod report;
pub mod transcript;

pub use report::{CompletedReport, ReportDocument, ReportSink};
pub use transcript::{print_summary, TranscriptSink, SUMMARY_RULE_WIDTH};
