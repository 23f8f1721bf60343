//! Console formatting of structural markup
//!
//! Headings, lists, emphasis and notes become styled terminal text; cells
//! and spans carrying a verdict class become sentinel-wrapped text whose
//! color is resolved later by the colorizer. Table structure is left in
//! place for the sanitizer, which turns it into pipe-table syntax.

use crate::palette::{Palette, Tone};
use crate::rewrite::{RewriteChain, RewriteRule};
use crate::sentinel::Verdict;

/// Maps headings, lists, emphasis and verdict classes to console text
#[derive(Debug)]
pub struct ConsoleFormatter {
    chain: RewriteChain,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl ConsoleFormatter {
    /// Build the formatter's rule chain for `palette`
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        let mut chain = RewriteChain::new()
            .rule(RewriteRule::template("tabs", "\t", ""))
            .rule(RewriteRule::computed(
                "heading",
                r"<h[0-9][^>]*>(.+?)</h[0-9]>",
                move |caps| palette.paint(Tone::Heading, &format!("{}\r\n", &caps[1])),
            ))
            .rule(RewriteRule::computed(
                "meta",
                r#"<span class="meta">(.+?)</span>"#,
                move |caps| palette.paint(Tone::Meta, &caps[1]),
            ))
            .rule(RewriteRule::template("line-break", r"<br\s*/?>", "\r\n"))
            .rule(RewriteRule::template(
                "list-item",
                r"\s*<li>(.+?)</li>",
                "* ${1} \r\n",
            ))
            .rule(RewriteRule::template("list", r"</?ul>\s*", "\r\n"))
            .rule(RewriteRule::computed("italic", r"<i>(.+?)</i>", move |caps| {
                palette.paint(Tone::Emphasis, &caps[1])
            }))
            .rule(RewriteRule::computed("bold", r"<b>(.+?)</b>", move |caps| {
                palette.paint(Tone::Emphasis, &caps[1])
            }))
            .rule(RewriteRule::computed(
                "note",
                r#"<p class="note">(.+?)</p>"#,
                move |caps| palette.paint(Tone::Note, &caps[1]),
            ));

        for verdict in Verdict::ALL {
            chain = chain.rule(RewriteRule::template(
                "verdict-cell",
                &format!(
                    r#"<td([^>]*?)\s*class="{}[^"]*"([^>]*)>(.+?)</td>"#,
                    verdict.css_class()
                ),
                format!("<td${{1}}${{2}}>{}</td>", verdict.wrap("${3}")),
            ));
        }

        chain = chain.rule(RewriteRule::template(
            "diff",
            r#"<span class="diff">(.+?)</span>"#,
            "${1}",
        ));

        for verdict in Verdict::ALL {
            chain = chain.rule(RewriteRule::template(
                "verdict-span",
                &format!(r#"<span class="{}">(.+?)</span>"#, verdict.css_class()),
                verdict.wrap("${1}"),
            ));
        }

        let fail = Verdict::Fail;
        chain = chain.rule(RewriteRule::template(
            "merge-fail-runs",
            &format!("{}{}", fail.close(), fail.open()),
            "",
        ));

        Self { chain }
    }

    /// Format a filtered chunk
    #[must_use]
    pub fn format(&self, html: &str) -> String {
        self.chain.apply(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ConsoleFormatter {
        ConsoleFormatter::new(Palette::plain())
    }

    mod structure_tests {
        use super::*;

        #[test]
        fn test_heading_gets_line_break() {
            assert_eq!(plain().format("<h2 id=\"x\">Step 1</h2>rest"), "Step 1\r\nrest");
        }

        #[test]
        fn test_colored_heading() {
            let out = ConsoleFormatter::new(Palette::colored()).format("<h1>Step 1</h1>");
            assert!(out.contains("Step 1"));
            assert!(out.starts_with('\u{1b}'));
        }

        #[test]
        fn test_line_break() {
            assert_eq!(plain().format("a<br/>b"), "a\r\nb");
        }

        #[test]
        fn test_list() {
            assert_eq!(
                plain().format("<ul><li>one</li><li>two</li></ul>"),
                "\r\n* one \r\n* two \r\n\r\n"
            );
        }

        #[test]
        fn test_emphasis_and_note() {
            assert_eq!(
                plain().format(r#"<i>a</i> <b>b</b> <p class="note">n</p>"#),
                "a b n"
            );
        }

        #[test]
        fn test_meta_span() {
            let out = ConsoleFormatter::new(Palette::colored())
                .format(r#"<span class="meta">(12ms)</span>"#);
            assert!(out.contains("(12ms)"));
            assert!(!out.contains("span"));
        }

        #[test]
        fn test_tabs_removed() {
            assert_eq!(plain().format("\ta\t"), "a");
        }
    }

    mod verdict_tests {
        use super::*;

        #[test]
        fn test_pass_cell() {
            assert_eq!(
                plain().format(r#"<td class="pass">ok</td>"#),
                "<td>#pok#/p</td>"
            );
        }

        #[test]
        fn test_cell_keeps_other_attributes() {
            assert_eq!(
                plain().format(r#"<td colspan="2" class="error">boom</td>"#),
                r#"<td colspan="2">#eboom#/e</td>"#
            );
        }

        #[test]
        fn test_ignore_cell_with_suffix_class() {
            assert_eq!(
                plain().format(r#"<td class="ignore wide">?</td>"#),
                "<td>#i?#/i</td>"
            );
        }

        #[test]
        fn test_spans() {
            assert_eq!(
                plain().format(r#"<span class="pass">ok</span><span class="ignore">skip</span>"#),
                "#pok#/p#iskip#/i"
            );
        }

        #[test]
        fn test_diff_inside_fail_cell() {
            assert_eq!(
                plain().format(
                    r#"<td class="fail">[<span class="diff">12</span>] expected [13]</td>"#
                ),
                "<td>#f[12] expected [13]#/f</td>"
            );
        }

        #[test]
        fn test_adjacent_fail_runs_merge() {
            assert_eq!(
                plain().format(r#"<span class="fail">a</span><span class="fail">b</span>"#),
                "#fab#/f"
            );
        }
    }
}
