//! Self-contained HTML report sink
//!
//! ```text
//! test_started  ─► shell: <html><head><style/></head><body><script/><h1>path</h1>
//! output_chunk  ─► images inlined, markup appended verbatim
//! test_complete ─► </body></html>, document handed out
//! ```
//!
//! Unlike the transcript, the report keeps collapsed sections; the inlined
//! script toggles them in the browser.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::assets::ReportAssets;
use crate::config::RenderConfig;
use crate::embed::ImageEmbedder;
use crate::event::{TestListener, TestPage, TestSummary};
use crate::result::FitlogResult;

/// Page used when output arrives with no test started
const UNKNOWN_PAGE: &str = "UnknownTest";

/// One test's report while it is being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    page: TestPage,
    html: String,
    closed: bool,
}

impl ReportDocument {
    /// Open a document: head, inlined assets and the page heading
    #[must_use]
    pub fn open(page: TestPage, assets: &ReportAssets) -> Self {
        let html = format!(
            "<html>\r\n<head>\r\n<style>\r\n{css}\r\n</style>\r\n</head>\r\n\
             <body onload=\"enableClickHandlers()\">\r\n<script>\r\n{js}\r\n</script>\r\n\
             <h1>{page}</h1>\r\n",
            css = assets.stylesheet(),
            js = assets.script(),
        );
        Self {
            page,
            html,
            closed: false,
        }
    }

    /// Append markup to the body
    pub fn append(&mut self, markup: &str) {
        if self.closed {
            warn!(test = %self.page, "output after report was closed");
            return;
        }
        self.html.push_str(markup);
    }

    /// Close the body and document
    pub fn close(&mut self) {
        if !self.closed {
            self.html.push_str("</body></html>");
            self.closed = true;
        }
    }

    /// Note the abort reason, then close
    pub fn close_aborted(&mut self, reason: &str) {
        self.append(&format!(
            "<p class=\"aborted\">Run aborted: {}</p>\r\n",
            escape_text(reason)
        ));
        self.close();
    }

    /// The test this document belongs to
    #[must_use]
    pub fn page(&self) -> &TestPage {
        &self.page
    }

    /// Markup so far
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the closing tags have been written
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// A finished report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedReport {
    /// The test the report belongs to
    pub page: TestPage,
    /// The complete document
    pub html: String,
    /// Where the document was written, if a report directory is configured
    pub path: Option<PathBuf>,
}

impl CompletedReport {
    /// File name used for `page` inside a report directory
    ///
    /// The test path becomes a single dotted component: separators turn into
    /// dots and empty or `..` segments are dropped, so the file always lands
    /// directly inside the directory.
    #[must_use]
    pub fn file_name(page: &TestPage) -> String {
        let dotted: String = page
            .full_path
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '.',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = dotted
            .split('.')
            .filter(|segment| !segment.trim().is_empty())
            .collect::<Vec<_>>()
            .join(".");
        if stem.is_empty() {
            format!("{UNKNOWN_PAGE}.html")
        } else {
            format!("{stem}.html")
        }
    }
}

/// Builds one self-contained HTML document per test
#[derive(Debug, Clone)]
pub struct ReportSink {
    assets: ReportAssets,
    embedder: ImageEmbedder,
    report_dir: Option<PathBuf>,
    current: Option<ReportDocument>,
    finished: Option<CompletedReport>,
}

impl ReportSink {
    /// Create a sink with explicit assets
    #[must_use]
    pub fn new(assets: ReportAssets, embedder: ImageEmbedder) -> Self {
        Self {
            assets,
            embedder,
            report_dir: None,
            current: None,
            finished: None,
        }
    }

    /// Create a sink from configuration, loading asset overrides
    pub fn from_config(config: &RenderConfig) -> FitlogResult<Self> {
        let assets = ReportAssets::from_config(config)?;
        let embedder =
            ImageEmbedder::new(&config.assets_root).with_width(config.image_width);
        let mut sink = Self::new(assets, embedder);
        sink.report_dir.clone_from(&config.report_dir);
        Ok(sink)
    }

    /// Write finished documents into `dir`
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(dir.into());
        self
    }

    /// The document being built, if a test is running
    #[must_use]
    pub fn current(&self) -> Option<&ReportDocument> {
        self.current.as_ref()
    }

    /// The most recently finished report
    #[must_use]
    pub fn report(&self) -> Option<&CompletedReport> {
        self.finished.as_ref()
    }

    /// Take the most recently finished report
    pub fn take_report(&mut self) -> Option<CompletedReport> {
        self.finished.take()
    }

    fn document_for_output(&mut self) -> &mut ReportDocument {
        let assets = &self.assets;
        self.current.get_or_insert_with(|| {
            warn!("output arrived before any test started; opening placeholder report");
            ReportDocument::open(TestPage::new(UNKNOWN_PAGE), assets)
        })
    }

    fn finish_current(&mut self, document: ReportDocument) {
        let path = self
            .report_dir
            .as_deref()
            .and_then(|dir| match write_report(dir, &document) {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!(test = %document.page, error = %err, "report not written");
                    None
                }
            });
        if self.finished.is_some() {
            debug!("replacing report that was never taken");
        }
        self.finished = Some(CompletedReport {
            page: document.page,
            html: document.html,
            path,
        });
    }
}

impl TestListener for ReportSink {
    fn test_started(&mut self, page: &TestPage) {
        if let Some(mut previous) = self.current.take() {
            warn!(previous = %previous.page, next = %page, "report still open at next test start");
            previous.close();
            self.finish_current(previous);
        }
        self.current = Some(ReportDocument::open(page.clone(), &self.assets));
    }

    fn output_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        let markup = self.embedder.embed(chunk);
        self.document_for_output().append(&markup);
    }

    fn test_complete(&mut self, page: &TestPage, _summary: &TestSummary) {
        let mut document = self.current.take().unwrap_or_else(|| {
            warn!(test = %page, "test completed without a start; report has no output");
            ReportDocument::open(page.clone(), &self.assets)
        });
        document.close();
        self.finish_current(document);
    }

    fn run_aborted(&mut self, reason: &str) {
        if let Some(mut document) = self.current.take() {
            document.close_aborted(reason);
            self.finish_current(document);
        }
    }
}

fn write_report(dir: &Path, document: &ReportDocument) -> FitlogResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(CompletedReport::file_name(&document.page));
    std::fs::write(&path, &document.html)?;
    info!(path = %path.display(), "report written");
    Ok(path)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
