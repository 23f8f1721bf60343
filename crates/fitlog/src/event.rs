//! Test engine events
//!
//! The engine reports each test page as an ordered stream:
//!
//! ```text
//! TestStarted ─► OutputChunk* ─► TestComplete
//! ```
//!
//! Chunks of one test arrive in emission order and all of them precede the
//! test's completion. The filter state in the transcript depends on that.
//! A run may be cut short at any point by `RunAborted`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A test page, identified by its dotted wiki path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestPage {
    /// Full path, e.g. `MyTest.Suite.CaseA`
    pub full_path: String,
}

impl TestPage {
    /// Create a page
    #[must_use]
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
        }
    }
}

impl fmt::Display for TestPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path)
    }
}

/// Assertion counts of a finished test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestSummary {
    /// Passing assertions
    pub right: u32,
    /// Failing assertions
    pub wrong: u32,
    /// Ignored assertions
    pub ignores: u32,
    /// Assertions that raised an exception
    pub exceptions: u32,
}

impl TestSummary {
    /// Create a summary
    #[must_use]
    pub const fn new(right: u32, wrong: u32, ignores: u32, exceptions: u32) -> Self {
        Self {
            right,
            wrong,
            ignores,
            exceptions,
        }
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} right, {} wrong, {} ignored, {} exceptions",
            self.right, self.wrong, self.ignores, self.exceptions
        )
    }
}

/// One event from the test engine
///
/// Recorded streams store one JSON object per line, tagged by `event`:
///
/// ```json
/// {"event":"test_started","page":{"full_path":"Suite.CaseA"}}
/// {"event":"output_chunk","chunk":"<h1>Step 1</h1>"}
/// {"event":"test_complete","page":{"full_path":"Suite.CaseA"},"summary":{"right":1,"wrong":0,"ignores":0,"exceptions":0}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TestEvent {
    /// A test page started
    TestStarted {
        /// The page
        page: TestPage,
    },
    /// Rendered markup produced by the running test
    OutputChunk {
        /// The markup
        chunk: String,
    },
    /// A test page finished
    TestComplete {
        /// The page
        page: TestPage,
        /// Assertion counts
        summary: TestSummary,
    },
    /// The run stopped before completing
    RunAborted {
        /// Why the run stopped
        reason: String,
    },
}

/// Receives test engine events in order
///
/// Implementations handle their own failures: a listener never stops the
/// event stream.
pub trait TestListener {
    /// A test page started
    fn test_started(&mut self, page: &TestPage);

    /// A chunk of output for the running test
    fn output_chunk(&mut self, chunk: &str);

    /// A test page finished
    fn test_complete(&mut self, page: &TestPage, summary: &TestSummary);

    /// The run was cut short; close whatever is in flight
    fn run_aborted(&mut self, reason: &str);

    /// Route one event to the matching callback
    fn dispatch(&mut self, event: &TestEvent) {
        match event {
            TestEvent::TestStarted { page } => self.test_started(page),
            TestEvent::OutputChunk { chunk } => self.output_chunk(chunk),
            TestEvent::TestComplete { page, summary } => self.test_complete(page, summary),
            TestEvent::RunAborted { reason } => self.run_aborted(reason),
        }
    }
}
