//! Hash table compaction.
//!
//! The engine renders hash-valued symbols as two-column key/value tables.
//! On a terminal they read better in the wiki's own literal form,
//! `!{ key : value, other : value }`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::rewrite::compile;

// Innermost only: the body may not open another `<table`.
static HASH_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"<table class="hash_table">((?:[^<]|<[^t<]|<t[^a<])+?)</table>"#)
});
static KEY_VALUE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"<tr\b[^>]*>\s*<td\b[^>]*>(.+?)</td>\s*<td\b[^>]*>(.+?)</td>\s*</tr>")
});

/// Rewrites `hash_table` blocks into `!{ K : V, ... }` literals
#[derive(Debug, Clone, Copy, Default)]
pub struct HashTableRewriter;

impl HashTableRewriter {
    /// Create a rewriter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rewrite every hash table in `html`; other tables are left alone
    ///
    /// Nested hashes are compacted from the inside out, one level per pass.
    #[must_use]
    pub fn rewrite(&self, html: &str) -> String {
        let mut current = html.to_string();
        loop {
            let next = HASH_TABLE
                .replace_all(&current, |caps: &Captures<'_>| compact(&caps[1]))
                .into_owned();
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

fn compact(content: &str) -> String {
    let content = content.replace('\t', "");
    let pairs = KEY_VALUE_ROW.replace_all(&content, "${1} : ${2}, ");
    let body = pairs.trim_end();
    let body = body.strip_suffix(',').unwrap_or(body);
    format!("!{{ {body} }}")
}
