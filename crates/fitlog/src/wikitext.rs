//! Wiki-text formatting capability
//!
//! After sanitizing, the transcript is plain wiki pipe-table text. A
//! [`WikiFormatter`] tidies that text (column alignment, mostly) before the
//! colorizer resolves sentinels. It is a narrow `text -> text` seam so the
//! native aligner can be swapped for another implementation, e.g. one that
//! calls out to the wiki's own script-based formatter.

use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::result::FitlogResult;

/// Formats wiki text; failures are recovered by the caller
pub trait WikiFormatter {
    /// Format `text`
    fn format(&self, text: &str) -> FitlogResult<String>;

    /// Short name for diagnostics
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> WikiFormatter for F
where
    F: Fn(&str) -> FitlogResult<String>,
{
    fn format(&self, text: &str) -> FitlogResult<String> {
        self(text)
    }
}

impl fmt::Debug for dyn WikiFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WikiFormatter({})", self.name())
    }
}

/// Returns the text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl WikiFormatter for PassThrough {
    fn format(&self, text: &str) -> FitlogResult<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "pass-through"
    }
}

/// Pads the cells of each pipe table so its columns line up
///
/// A table is a run of consecutive lines of the form `[!-]|a|b|`. Rows with a
/// single cell (scenario markers, colspans) do not contribute to the column
/// widths and are only trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAligner;

impl WikiFormatter for TableAligner {
    fn format(&self, text: &str) -> FitlogResult<String> {
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut table: Vec<Row<'_>> = Vec::new();

        for segment in text.split_inclusive('\n') {
            match Row::parse(segment) {
                Some(row) => table.push(row),
                None => {
                    write_table(&mut out, &table);
                    table.clear();
                    out.push_str(segment);
                }
            }
        }
        write_table(&mut out, &table);
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "table-aligner"
    }
}

#[derive(Debug)]
struct Row<'a> {
    prefix: &'a str,
    cells: Vec<&'a str>,
    ending: &'a str,
}

impl<'a> Row<'a> {
    fn parse(segment: &'a str) -> Option<Self> {
        let body = segment.trim_end_matches(['\r', '\n']);
        let ending = &segment[body.len()..];
        let body = body.trim_end();

        let first = body.find('|')?;
        let prefix = &body[..first];
        if !prefix.chars().all(|c| matches!(c, '!' | '-' | '^')) {
            return None;
        }
        let inner = body[first + 1..].strip_suffix('|')?;
        Some(Self {
            prefix,
            cells: inner.split('|').map(str::trim).collect(),
            ending,
        })
    }
}

fn write_table(out: &mut String, rows: &[Row<'_>]) {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows.iter().filter(|r| r.cells.len() > 1) {
        for (i, cell) in row.cells.iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    for row in rows {
        out.push_str(row.prefix);
        out.push('|');
        for (i, cell) in row.cells.iter().enumerate() {
            out.push_str(cell);
            if row.cells.len() > 1 {
                let pad = widths[i].saturating_sub(cell.width());
                out.extend(std::iter::repeat(' ').take(pad));
            }
            out.push('|');
        }
        out.push_str(row.ending);
    }
}
