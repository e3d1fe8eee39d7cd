//! engine::matcher
//!
//! Strategies deciding whether a command applies to an input line.
//!
//! # Strategies
//!
//! - [`Exact`] - input equals a string
//! - [`Prefix`] - input starts with a string
//! - [`OneOf`] - input equals any string in a set
//! - [`Pattern`] - input matches a regular expression
//! - [`Always`] / [`Never`] - unconditional
//!
//! Any `Fn(&str) -> Result<bool, MatchError>` is a matcher too.
//!
//! # Invariants
//!
//! - `Ok(true)` is a match, `Ok(false)` a no-match
//! - `Err` is always fatal to the run
//! - A pattern that fails to compile fails on every call, not just the first

use std::cell::OnceCell;

use regex::Regex;
use thiserror::Error;

/// Matcher failures. All of them abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Classifies an input line for one command.
pub trait Matcher {
    /// Check the (already trimmed) input line.
    fn matches(&self, input: &str) -> Result<bool, MatchError>;
}

impl<F> Matcher for F
where
    F: Fn(&str) -> Result<bool, MatchError>,
{
    fn matches(&self, input: &str) -> Result<bool, MatchError> {
        self(input)
    }
}

/// Matches input equal to the target.
#[derive(Debug, Clone)]
pub struct Exact(pub String);

impl Matcher for Exact {
    fn matches(&self, input: &str) -> Result<bool, MatchError> {
        Ok(input == self.0)
    }
}

/// Matches input starting with the target.
#[derive(Debug, Clone)]
pub struct Prefix(pub String);

impl Matcher for Prefix {
    fn matches(&self, input: &str) -> Result<bool, MatchError> {
        Ok(input.starts_with(self.0.as_str()))
    }
}

/// Matches input equal to any of the targets.
#[derive(Debug, Clone)]
pub struct OneOf(pub Vec<String>);

impl Matcher for OneOf {
    fn matches(&self, input: &str) -> Result<bool, MatchError> {
        Ok(self.0.iter().any(|s| s == input))
    }
}

/// Matches input against a regular expression.
///
/// The expression is compiled on first use. The compiled form, or the
/// compile error, is kept for every later call.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    compiled: OnceCell<Result<Regex, String>>,
}

impl Pattern {
    /// Create a matcher for `source`. Nothing is compiled yet.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceCell::new(),
        }
    }

    /// The uncompiled expression.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Matcher for Pattern {
    fn matches(&self, input: &str) -> Result<bool, MatchError> {
        let compiled = self
            .compiled
            .get_or_init(|| Regex::new(&self.source).map_err(|e| e.to_string()));

        match compiled {
            Ok(regex) => Ok(regex.is_match(input)),
            Err(message) => Err(MatchError::InvalidPattern {
                pattern: self.source.clone(),
                message: message.clone(),
            }),
        }
    }
}

/// Matches everything. Useful as a trailing catch-all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl Matcher for Always {
    fn matches(&self, _input: &str) -> Result<bool, MatchError> {
        Ok(true)
    }
}

/// Matches nothing. Useful to disable a command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Matcher for Never {
    fn matches(&self, _input: &str) -> Result<bool, MatchError> {
        Ok(false)
    }
}

/// Shorthand for [`Exact`].
pub fn exact(target: impl Into<String>) -> Exact {
    Exact(target.into())
}

/// Shorthand for [`Prefix`].
pub fn prefix(target: impl Into<String>) -> Prefix {
    Prefix(target.into())
}

/// Shorthand for [`OneOf`].
pub fn one_of<I, S>(targets: I) -> OneOf
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OneOf(targets.into_iter().map(Into::into).collect())
}

/// Shorthand for [`Pattern::new`].
pub fn pattern(source: impl Into<String>) -> Pattern {
    Pattern::new(source)
}

/// Shorthand for [`Always`].
pub fn always() -> Always {
    Always
}

/// Shorthand for [`Never`].
pub fn never() -> Never {
    Never
}
