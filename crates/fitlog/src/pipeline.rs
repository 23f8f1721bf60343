//! The transcript pipeline.
//!
//! ```text
//! chunk ─► CollapsedSectionFilter ─► HashTableRewriter ─► ConsoleFormatter
//!       ─► Sanitizer ─► WikiTextColorizer ─► transcript text
//! ```
//!
//! The filter is the only stateful stage; the pipeline owns it for the life
//! of a run.

use tracing::trace;

use crate::colorize::WikiTextColorizer;
use crate::config::RenderConfig;
use crate::console_format::ConsoleFormatter;
use crate::filter::CollapsedSectionFilter;
use crate::hash_table::HashTableRewriter;
use crate::palette::Palette;
use crate::sanitize::Sanitizer;
use crate::wikitext::{PassThrough, TableAligner, WikiFormatter};

/// Every transcript stage, in order
#[derive(Debug)]
pub struct TranscriptPipeline {
    filter: CollapsedSectionFilter,
    hash_tables: HashTableRewriter,
    formatter: ConsoleFormatter,
    sanitizer: Sanitizer,
    colorizer: WikiTextColorizer,
}

impl Default for TranscriptPipeline {
    fn default() -> Self {
        Self::new(Palette::default(), Box::new(TableAligner))
    }
}

impl TranscriptPipeline {
    /// Build a pipeline with the given palette and wiki formatter
    #[must_use]
    pub fn new(palette: Palette, wiki_formatter: Box<dyn WikiFormatter>) -> Self {
        Self {
            filter: CollapsedSectionFilter::new(),
            hash_tables: HashTableRewriter::new(),
            formatter: ConsoleFormatter::new(palette),
            sanitizer: Sanitizer::new(),
            colorizer: WikiTextColorizer::new(wiki_formatter, palette),
        }
    }

    /// Build a pipeline from configuration
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        let wiki_formatter: Box<dyn WikiFormatter> = if config.align_tables {
            Box::new(TableAligner)
        } else {
            Box::new(PassThrough)
        };
        Self::new(Palette::with_color(config.color), wiki_formatter)
    }

    /// The collapsed-section filter
    #[must_use]
    pub fn filter(&self) -> &CollapsedSectionFilter {
        &self.filter
    }

    /// Clear the collapsed-section state
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    /// Render one chunk. `None` when nothing is left after filtering.
    pub fn render(&mut self, chunk: &str) -> Option<String> {
        let visible = self.filter.filter(chunk);
        if visible.is_empty() {
            trace!(hiding = self.filter.is_hiding(), "chunk fully filtered");
            return None;
        }
        let text = self.hash_tables.rewrite(&visible);
        let text = self.formatter.format(&text);
        let text = self.sanitizer.sanitize(&text);
        Some(self.colorizer.colorize(&text))
    }
}
