//! Status lines on stderr

use console::{style, Color, Term};
use fitlog::RunStats;

/// Writes short status messages next to the transcript
#[derive(Debug)]
pub struct StatusReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl StatusReporter {
    /// Create a reporter writing to stderr
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("{} {message}", self.prefix("✓", "OK", Color::Green)));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("{} {message}", self.prefix("⚠", "WARN", Color::Yellow)));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("{} {message}", self.prefix("ℹ", "INFO", Color::Blue)));
    }

    /// Print the run summary
    pub fn run_summary(&self, stats: &RunStats, reports: usize) {
        let line = summary_line(stats, reports);
        if stats.aborted {
            let _ = self
                .term
                .write_line(&format!("{} {line}", self.prefix("✗", "ABORTED", Color::Red)));
        } else {
            self.success(&line);
        }
    }

    fn prefix(&self, symbol: &str, plain: &str, color: Color) -> String {
        if self.use_color {
            style(symbol).fg(color).bold().to_string()
        } else {
            plain.to_string()
        }
    }
}

/// One-line description of a finished run
#[must_use]
pub fn summary_line(stats: &RunStats, reports: usize) -> String {
    format!(
        "{} started, {} completed, {} chunks, {reports} report(s)",
        stats.tests_started, stats.tests_completed, stats.chunks
    )
}
