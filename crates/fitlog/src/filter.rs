//! Collapsed Section Filter
//!
//! Removes expandable regions (setup/teardown detail, collapsed scenario
//! rows) from the chunk stream before it reaches the terminal.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  chunk ─► split </tr><tr ─► lines ─► per line:               │
//! │                                                              │
//! │   visible ──marker──► hiding(kind, depth = 1)                │
//! │      ▲                    │  open tag of kind: depth += 1    │
//! │      │                    │  close tag of kind: depth -= 1   │
//! │      └────depth == 0──────┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state is carried from chunk to chunk: a region opened in one chunk
//! stays hidden until its matching close arrives in a later one. Unbalanced
//! markup therefore keeps hiding output until [`CollapsedSectionFilter::reset`]
//! is called; the filter does not guess where a broken region ends.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::rewrite::compile;

static ROW_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"</tr>\s*<tr"));
static COLLAPSED_DIV: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"<div\b[^>]*?\bclass="[^"]*closed[^"]*"[^>]*>?"#));
static COLLAPSED_ROW: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"<tr\b[^>]*?\bclass="[^"]*closed-detail[^"]*"[^>]*>?"#));
static DIV_TAGS: LazyLock<Regex> = LazyLock::new(|| compile(r"<div\b[^>]*>|</div\s*>"));
static ROW_TAGS: LazyLock<Regex> = LazyLock::new(|| compile(r"<tr\b[^>]*>|</tr\s*>"));

/// Kind of region currently being hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapsedKind {
    /// Nothing is hidden
    #[default]
    None,
    /// A `<div class="... closed ...">` region
    Div,
    /// A `<tr class="... closed-detail ...">` scenario detail row
    Row,
}

impl CollapsedKind {
    fn tags(self) -> Option<&'static Regex> {
        match self {
            Self::None => None,
            Self::Div => Some(&*DIV_TAGS),
            Self::Row => Some(&*ROW_TAGS),
        }
    }
}

/// Nesting state of the filter
///
/// `hiding == false` implies `depth == 0` and `kind == CollapsedKind::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Open tags of `kind` seen since the region started, minus closes
    pub depth: usize,
    /// Whether output is currently suppressed
    pub hiding: bool,
    /// Tag kind that opened the hidden region
    pub kind: CollapsedKind,
}

impl FilterState {
    fn begin(&mut self, kind: CollapsedKind) {
        self.hiding = true;
        self.kind = kind;
        self.depth = 1;
    }

    fn end(&mut self) {
        *self = Self::default();
    }
}

/// Stateful filter eliding collapsed regions from a chunk stream
///
/// One filter belongs to one run.
///
/// # Example
///
/// ```
/// use fitlog::CollapsedSectionFilter;
///
/// let mut filter = CollapsedSectionFilter::new();
/// let out = filter.filter(r#"A<div class="closed">B<div>C</div>D</div>E"#);
/// assert_eq!(out, "AE");
/// ```
#[derive(Debug, Default)]
pub struct CollapsedSectionFilter {
    state: FilterState,
}

impl CollapsedSectionFilter {
    /// Create a filter with nothing hidden
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Whether a region is still open
    #[must_use]
    pub fn is_hiding(&self) -> bool {
        self.state.hiding
    }

    /// Forget any open region
    pub fn reset(&mut self) {
        self.state.end();
    }

    /// Filter one chunk.
    ///
    /// Visible lines are trimmed, empty ones dropped, and the rest
    /// concatenated without a separator.
    pub fn filter(&mut self, chunk: &str) -> String {
        let split = ROW_BOUNDARY.replace_all(chunk, "</tr>\n<tr");
        let mut out = String::with_capacity(split.len());
        for line in split.lines() {
            self.filter_line(line, &mut out);
        }
        out
    }

    fn filter_line(&mut self, line: &str, out: &mut String) {
        let mut rest = line;
        loop {
            if self.state.hiding {
                match self.consume_hidden(rest) {
                    Some(end) => rest = &rest[end..],
                    None => return,
                }
            }

            match find_marker(rest) {
                Some((start, end, kind)) => {
                    out.push_str(rest[..start].trim_start());
                    trace!(?kind, "collapsed region opened");
                    self.state.begin(kind);
                    rest = &rest[end..];
                }
                None => {
                    out.push_str(rest.trim());
                    return;
                }
            }
        }
    }

    /// Walk the open/close tags of the hidden kind in order. Returns the
    /// byte offset just past the close that ends the region.
    fn consume_hidden(&mut self, text: &str) -> Option<usize> {
        let tags = self.state.kind.tags()?;
        for tag in tags.find_iter(text) {
            if tag.as_str().starts_with("</") {
                self.state.depth = self.state.depth.saturating_sub(1);
                if self.state.depth == 0 {
                    trace!(kind = ?self.state.kind, "collapsed region closed");
                    self.state.end();
                    return Some(tag.end());
                }
            } else {
                self.state.depth += 1;
            }
        }
        None
    }
}

fn find_marker(text: &str) -> Option<(usize, usize, CollapsedKind)> {
    COLLAPSED_DIV
        .find(text)
        .map(|m| (m.start(), m.end(), CollapsedKind::Div))
        .or_else(|| {
            COLLAPSED_ROW
                .find(text)
                .map(|m| (m.start(), m.end(), CollapsedKind::Row))
        })
}
