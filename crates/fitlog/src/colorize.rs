//! Wiki-text formatting and final color resolution
//!
//! Runs the pluggable [`WikiFormatter`] over the sanitized chunk and then
//! replaces every sentinel with its ANSI rendering. The formatter is allowed
//! to fail in any way, including a panic: the colorizer logs it and carries
//! on with the unformatted text.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

use crate::palette::{Palette, Tone};
use crate::rewrite::{RewriteChain, RewriteRule};
use crate::sentinel::{Verdict, END_SCENARIO};
use crate::wikitext::{TableAligner, WikiFormatter};

/// Trailing padding after a resolved sentinel pair, same width as the pair
const VERDICT_PADDING: &str = "     ";

/// Formats wiki text and resolves color sentinels
pub struct WikiTextColorizer {
    formatter: Box<dyn WikiFormatter>,
    chain: RewriteChain,
}

impl fmt::Debug for WikiTextColorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiTextColorizer")
            .field("formatter", &self.formatter)
            .field("rules", &self.chain.len())
            .finish()
    }
}

impl Default for WikiTextColorizer {
    fn default() -> Self {
        Self::new(Box::new(TableAligner), Palette::default())
    }
}

impl WikiTextColorizer {
    /// Create a colorizer around `formatter`
    #[must_use]
    pub fn new(formatter: Box<dyn WikiFormatter>, palette: Palette) -> Self {
        let mut chain = RewriteChain::new()
            .rule(RewriteRule::computed(
                "scenario-keyword",
                r"(?i)(\|scenario|\|table template)",
                move |caps| palette.paint(Tone::Scenario, &caps[1]),
            ))
            .rule(RewriteRule::computed(
                "end-scenario",
                &regex::escape(END_SCENARIO),
                move |_| format!("{} ", palette.paint(Tone::Scenario, "end scenario")),
            ));

        for verdict in [Verdict::Ignore, Verdict::Pass, Verdict::Fail, Verdict::Error] {
            chain = chain.rule(RewriteRule::computed(
                "verdict",
                &format!(
                    "{}(.+?){}",
                    regex::escape(verdict.open()),
                    regex::escape(verdict.close())
                ),
                move |caps| {
                    format!(
                        "{}{VERDICT_PADDING}",
                        palette.paint(Tone::from(verdict), &caps[1])
                    )
                },
            ));
        }

        let fail = Verdict::Fail;
        chain = chain
            .rule(RewriteRule::template("stray-fail-open", fail.open(), "  "))
            .rule(RewriteRule::template("stray-fail-close", fail.close(), "   "));

        Self { formatter, chain }
    }

    /// Name of the wiki formatter in use
    #[must_use]
    pub fn formatter_name(&self) -> &'static str {
        self.formatter.name()
    }

    /// Run the formatter, falling back to `text` on any failure
    #[must_use]
    pub fn format_wiki_text(&self, text: &str) -> String {
        let formatter = &self.formatter;
        match panic::catch_unwind(AssertUnwindSafe(|| formatter.format(text))) {
            Ok(Ok(formatted)) => formatted,
            Ok(Err(err)) => {
                warn!(formatter = formatter.name(), error = %err, "wiki formatting failed, using unformatted text");
                text.to_string()
            }
            Err(_) => {
                warn!(formatter = formatter.name(), "wiki formatter panicked, using unformatted text");
                text.to_string()
            }
        }
    }

    /// Format `text` and resolve every sentinel in it
    #[must_use]
    pub fn colorize(&self, text: &str) -> String {
        self.chain.apply(&self.format_wiki_text(text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::result::{FitlogError, FitlogResult};
    use crate::wikitext::PassThrough;

    fn plain() -> WikiTextColorizer {
        WikiTextColorizer::new(Box::new(PassThrough), Palette::plain())
    }

    mod sentinel_tests {
        use super::*;

        #[test]
        fn test_verdicts_resolved_with_padding() {
            assert_eq!(plain().colorize("|#pok#/p|"), "|ok     |");
            assert_eq!(plain().colorize("#fno#/f #eboom#/e #i?#/i"), "no      boom      ?     ");
        }

        #[test]
        fn test_colored_pass() {
            let colorizer = WikiTextColorizer::new(Box::new(PassThrough), Palette::colored());
            let out = colorizer.colorize("#pok#/p");
            assert!(out.starts_with("\u{1b}[32mok\u{1b}[0m"));
            assert!(out.ends_with(VERDICT_PADDING));
        }

        #[test]
        fn test_end_scenario_keeps_width() {
            let out = plain().colorize(&format!("|{END_SCENARIO}|"));
            assert_eq!(out, "|end scenario |");
        }

        #[test]
        fn test_scenario_keyword_colored() {
            let colorizer = WikiTextColorizer::new(Box::new(PassThrough), Palette::colored());
            let out = colorizer.colorize("|Scenario|login|");
            assert!(out.contains("\u{1b}["));
            assert!(out.contains("|Scenario"));
        }

        #[test]
        fn test_stray_fail_fragments_blanked() {
            assert_eq!(plain().colorize("a#fb"), "a  b");
            assert_eq!(plain().colorize("a#/fb"), "a   b");
        }
    }

    mod fail_open_tests {
        use super::*;

        #[test]
        fn test_formatter_error_falls_back() {
            let failing = |_: &str| -> FitlogResult<String> { Err(FitlogError::formatter("down")) };
            let colorizer = WikiTextColorizer::new(Box::new(failing), Palette::plain());
            assert_eq!(colorizer.colorize("|a|#pok#/p|"), plain().colorize("|a|#pok#/p|"));
        }

        #[test]
        fn test_formatter_panic_falls_back() {
            let panicking = |_: &str| -> FitlogResult<String> { panic!("formatter exploded") };
            let colorizer = WikiTextColorizer::new(Box::new(panicking), Palette::plain());
            assert_eq!(colorizer.colorize("|a|b|"), "|a|b|");
        }

        #[test]
        fn test_default_uses_table_aligner() {
            let colorizer = WikiTextColorizer::default();
            assert_eq!(colorizer.formatter_name(), "table-aligner");
        }

        #[test]
        fn test_aligned_before_resolution() {
            let colorizer = WikiTextColorizer::new(Box::new(TableAligner), Palette::plain());
            assert_eq!(
                colorizer.colorize("|check|#pok#/p|\n|script|login|\n"),
                "|check |ok     |\n|script|login  |\n"
            );
        }
    }
}
