//! Fitlog: console transcripts and self-contained HTML reports for wiki-style
//! acceptance test runs.
//!
//! A test engine renders each test page as HTML and pushes it out in chunks.
//! Fitlog listens to that stream and renders it twice: as a colored,
//! line-oriented transcript for a terminal or CI log, and as one standalone
//! HTML document per test with stylesheet, script and screenshots inlined.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          FITLOG Pipeline                             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                        ┌──────────────────────────────────────────┐  │
//! │  TestEvent ──┬────────►│ TranscriptSink                           │  │
//! │  (listener   │         │  filter ─► hash tables ─► console format │  │
//! │   or JSONL   │         │  ─► sanitize ─► wiki format + colorize   │  │
//! │   replay)    │         └──────────────────────────────────────────┘  │
//! │              │         ┌──────────────────────────────────────────┐  │
//! │              └────────►│ ReportSink                               │  │
//! │                        │  shell ─► embed images ─► close          │  │
//! │                        └──────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use fitlog::{RenderConfig, RenderRun, TestListener, TestPage, TestSummary};
//!
//! let config = RenderConfig::new().with_color(false);
//! let mut run = RenderRun::new(Vec::new(), &config).unwrap();
//! let page = TestPage::new("MyTest.Suite.CaseA");
//! run.test_started(&page);
//! run.output_chunk("<h1>Step 1</h1>");
//! run.test_complete(&page, &TestSummary::new(1, 0, 0, 0));
//!
//! let transcript = String::from_utf8_lossy(run.transcript().get_ref()).into_owned();
//! assert!(transcript.contains("Step 1"));
//! let reports = run.finish();
//! assert!(reports[0].html.ends_with("</body></html>"));
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assets;
mod colorize;
mod config;
mod console_format;
mod embed;
mod event;
mod filter;
mod hash_table;
mod palette;
mod pipeline;
mod result;
mod rewrite;
#[allow(clippy::missing_errors_doc)]
mod run;
mod sanitize;
mod sentinel;
mod wikitext;

/// Output sinks: the console transcript and the HTML report
#[allow(clippy::must_use_candidate)]
pub mod sink;

pub use assets::ReportAssets;
pub use colorize::WikiTextColorizer;
pub use config::{RenderConfig, ResetPolicy};
pub use console_format::ConsoleFormatter;
pub use embed::{encode_file, ImageEmbedder, DEFAULT_IMAGE_WIDTH};
pub use event::{TestEvent, TestListener, TestPage, TestSummary};
pub use filter::{CollapsedKind, CollapsedSectionFilter, FilterState};
pub use hash_table::HashTableRewriter;
pub use palette::{Palette, Tone};
pub use pipeline::TranscriptPipeline;
pub use result::{FitlogError, FitlogResult};
pub use rewrite::{Replacement, RewriteChain, RewriteRule};
pub use run::{RenderRun, RunStats};
pub use sanitize::Sanitizer;
pub use sentinel::{Verdict, END_SCENARIO};
pub use sink::{print_summary, CompletedReport, ReportDocument, ReportSink, TranscriptSink};
pub use wikitext::{PassThrough, TableAligner, WikiFormatter};
