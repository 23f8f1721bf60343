//! Verdict sentinels
//!
//! Cells and spans that carry a pass/fail/error/ignore class are marked with
//! short placeholder tokens while the chunk is still being rewritten. The
//! colorizer swaps them for ANSI sequences at the very end. Each pair is
//! exactly five characters wide, which is the padding the colorizer puts back
//! so that aligned wiki tables stay aligned.

use serde::{Deserialize, Serialize};

/// Marks a scenario boundary after table structure is stripped
pub const END_SCENARIO: &str = "#endscenario#";

/// Classification of an assertion cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Assertion passed
    Pass,
    /// Assertion failed
    Fail,
    /// Assertion raised an exception
    Error,
    /// Assertion was not evaluated
    Ignore,
}

impl Verdict {
    /// Every verdict, in the order the console rules are applied
    pub const ALL: [Self; 4] = [Self::Pass, Self::Fail, Self::Error, Self::Ignore];

    /// CSS class prefix the engine uses for this verdict
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
            Self::Ignore => "ignore",
        }
    }

    /// Opening sentinel token
    #[must_use]
    pub const fn open(self) -> &'static str {
        match self {
            Self::Pass => "#p",
            Self::Fail => "#f",
            Self::Error => "#e",
            Self::Ignore => "#i",
        }
    }

    /// Closing sentinel token
    #[must_use]
    pub const fn close(self) -> &'static str {
        match self {
            Self::Pass => "#/p",
            Self::Fail => "#/f",
            Self::Error => "#/e",
            Self::Ignore => "#/i",
        }
    }

    /// Wrap `text` in this verdict's sentinel pair
    #[must_use]
    pub fn wrap(self, text: &str) -> String {
        format!("{}{}{}", self.open(), text, self.close())
    }
}
