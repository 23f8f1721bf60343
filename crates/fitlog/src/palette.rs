//! Terminal palette for the transcript.

use crate::sentinel::Verdict;
use console::Style;

/// Semantic color roles used by the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Page and section headings
    Heading,
    /// Meta information (timings, page paths)
    Meta,
    /// Italic and bold text
    Emphasis,
    /// Note paragraphs
    Note,
    /// Scenario and table template keywords, end-of-scenario markers
    Scenario,
    /// Passing cell
    Pass,
    /// Failing cell
    Fail,
    /// Cell that raised an exception
    Error,
    /// Ignored cell
    Ignore,
    /// Per-test summary line
    Summary,
}

impl From<Verdict> for Tone {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => Self::Pass,
            Verdict::Fail => Self::Fail,
            Verdict::Error => Self::Error,
            Verdict::Ignore => Self::Ignore,
        }
    }
}

/// Maps tones to ANSI styles, or to nothing when color is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

impl Palette {
    /// Palette that always emits ANSI sequences
    #[must_use]
    pub const fn colored() -> Self {
        Self { enabled: true }
    }

    /// Palette that emits plain text
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Palette enabled or disabled by flag
    #[must_use]
    pub const fn with_color(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether styling is emitted
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Style for a tone
    #[must_use]
    pub fn style(self, tone: Tone) -> Style {
        let style = Style::new().force_styling(true);
        match tone {
            Tone::Heading => style.blue().bright().bold(),
            Tone::Meta | Tone::Pass => style.green(),
            Tone::Emphasis => style.white().bold(),
            Tone::Note => style.black().bright(),
            Tone::Scenario => style.blue().bright(),
            Tone::Fail => style.red(),
            Tone::Error => style.black().bright().on_yellow().on_bright(),
            Tone::Ignore => style.black().on_blue(),
            Tone::Summary => style.yellow(),
        }
    }

    /// Render `text` in `tone`
    #[must_use]
    pub fn paint(self, tone: Tone, text: &str) -> String {
        if self.enabled {
            self.style(tone).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
