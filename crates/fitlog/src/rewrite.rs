//! Ordered text rewrite chains
//!
//! The console stages never parse markup. Each stage is a fixed, ordered
//! list of pattern → replacement rules applied to the whole chunk, so that
//! output from an engine that emits broken or partial HTML still renders.
//!
//! ```text
//! chunk ──► rule 1 ──► rule 2 ──► ... ──► rule N ──► rendered text
//! ```
//!
//! Rule order is part of the contract: later rules see the output of
//! earlier ones.

use regex::{Captures, Regex};
use std::fmt;

/// Compile a pattern that is a literal in this crate.
#[allow(clippy::expect_used)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in rewrite pattern must compile")
}

/// What a matched pattern is replaced with
pub enum Replacement {
    /// Regex replacement template (`${1}` style group references)
    Template(String),
    /// Replacement computed from the captures
    Computed(Box<dyn Fn(&Captures<'_>) -> String + Send + Sync>),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A single named pattern → replacement rule
#[derive(Debug)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RewriteRule {
    /// Rule replacing every match with a template
    #[must_use]
    pub fn template(name: &'static str, pattern: &str, template: impl Into<String>) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            replacement: Replacement::Template(template.into()),
        }
    }

    /// Rule replacing every match with the result of `f`
    #[must_use]
    pub fn computed<F>(name: &'static str, pattern: &str, f: F) -> Self
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            pattern: compile(pattern),
            replacement: Replacement::Computed(Box::new(f)),
        }
    }

    /// Rule name, used in traces
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to `input`
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        match &self.replacement {
            Replacement::Template(t) => self.pattern.replace_all(input, t.as_str()).into_owned(),
            Replacement::Computed(f) => self
                .pattern
                .replace_all(input, |caps: &Captures<'_>| f(caps))
                .into_owned(),
        }
    }
}

/// An ordered list of rewrite rules
#[derive(Debug, Default)]
pub struct RewriteChain {
    rules: Vec<RewriteRule>,
}

impl RewriteChain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    #[must_use]
    pub fn rule(mut self, rule: RewriteRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in application order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(RewriteRule::name)
    }

    /// Run every rule, in order, over `input`
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |text, rule| rule.apply(&text))
    }
}
