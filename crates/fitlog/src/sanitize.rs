//! Strips the markup left after console formatting.
//!
//! Rows become pipe-table lines, links become their visible target, every
//! other tag disappears and the three entities the engine escapes are
//! restored. A row that empties out entirely marks the end of a scenario.

use crate::rewrite::{RewriteChain, RewriteRule};
use crate::sentinel::END_SCENARIO;

/// Reduces formatted markup to pipe-table text
#[derive(Debug)]
pub struct Sanitizer {
    chain: RewriteChain,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Build the sanitizer's rule chain
    #[must_use]
    pub fn new() -> Self {
        let chain = RewriteChain::new()
            .rule(RewriteRule::template("row-open", r"<tr\b[^>]*>", ""))
            .rule(RewriteRule::template("row-close", r"</tr>", "|\r\n"))
            .rule(RewriteRule::template("cell-open", r"<td\b[^>]*>", "|"))
            .rule(RewriteRule::template("cell-close", r"</td>", ""))
            .rule(RewriteRule::template("table", r"</?table\b[^>]*>", ""))
            .rule(RewriteRule::template("div", r"</?div\b[^>]*>", ""))
            .rule(RewriteRule::template(
                "link",
                r#"<[^>]*?\shref="([^"]+)"[^>]*>"#,
                " ${1} ",
            ))
            .rule(RewriteRule::template("any-tag", r"<[^>]*>", ""))
            .rule(RewriteRule::template("lt", "&lt;", "<"))
            .rule(RewriteRule::template("gt", "&gt;", ">"))
            .rule(RewriteRule::template("quot", "&quot;", "\""))
            .rule(RewriteRule::template(
                "scenario-keyword",
                r"(?i)\|\|(scenario|table template)",
                "|${1}",
            ))
            .rule(RewriteRule::template(
                "end-scenario",
                r"(?m)^\|[ \t\r]*$",
                format!("|{END_SCENARIO}|"),
            ));
        Self { chain }
    }

    /// Sanitize a formatted chunk
    #[must_use]
    pub fn sanitize(&self, text: &str) -> String {
        self.chain.apply(text)
    }
}
