//! engine::error
//!
//! Error classification for handlers, hooks and prompters, and the errors
//! surfaced by [`Repl::run`](super::Repl::run).
//!
//! # Classification
//!
//! | Variant | Effect on the loop |
//! |---------|--------------------|
//! | `NoMatch` | command declined; see [`Command`](super::Command) |
//! | `Exit` | clean shutdown, post-run hook still runs |
//! | `Recoverable` | message printed, loop continues |
//! | `Fatal` / `Io` | run aborts, error returned to the caller |
//!
//! The classification is decided once, where the error is created. The
//! engine never retries or downgrades.

use thiserror::Error;

use super::matcher::MatchError;

/// Result type for handlers, hooks and prompters.
pub type HandlerResult = Result<String, ReplError>;

/// Classified outcome of a handler, hook or prompter.
#[derive(Debug, Error)]
pub enum ReplError {
    /// The command does not apply to this input.
    #[error("no match")]
    NoMatch,

    /// Request a clean shutdown.
    #[error("exit")]
    Exit,

    /// Print the message and keep looping.
    #[error("{0}")]
    Recoverable(String),

    /// Abort the run with this message.
    #[error("{0}")]
    Fatal(String),

    /// I/O failure inside a handler; always fatal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplError {
    /// Create a recoverable error.
    pub fn recoverable(message: impl Into<String>) -> Self {
        ReplError::Recoverable(message.into())
    }

    /// Create a fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        ReplError::Fatal(message.into())
    }

    /// Check if this error keeps the loop alive.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReplError::Recoverable(_))
    }

    /// Escalate to a run error, keeping the message.
    ///
    /// Used where no soft failure is possible (prompters, non-exit hook
    /// errors, and handler failures that are already fatal).
    pub fn into_fatal(self) -> RunError {
        match self {
            ReplError::Io(err) => RunError::Io(err),
            ReplError::Fatal(message) | ReplError::Recoverable(message) => {
                RunError::Fatal(message)
            }
            other => RunError::Fatal(other.to_string()),
        }
    }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A handler, hook or prompter failed fatally.
    #[error("{0}")]
    Fatal(String),

    /// A matcher could not classify the input.
    #[error(transparent)]
    Match(#[from] MatchError),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input source has no more lines.
    #[error("end of input")]
    EndOfInput,
}

impl RunError {
    /// Check if the run ended because input ran out.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, RunError::EndOfInput)
    }
}
