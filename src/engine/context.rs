//! engine::context
//!
//! Per-run state shared with hooks, prompters and handlers.
//!
//! # Lifecycle
//!
//! A fresh [`Context`] is created at the start of every
//! [`Repl::run`](super::Repl::run) and dropped when it returns. Callbacks
//! receive it by reference for the duration of their own call only.
//!
//! # Cancellation
//!
//! [`CancelHandle`] is advisory. The engine never polls it; handlers and
//! hooks may check it and return `Exit` or `Fatal` themselves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::history::History;

/// Cloneable cancellation flag.
///
/// All clones observe the same flag. A new handle is never cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a handle that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Execution context for one run.
#[derive(Debug, Default)]
pub struct Context {
    input: String,
    cancel: CancelHandle,
    history: Option<History>,
}

impl Context {
    pub(crate) fn new(cancel: CancelHandle, history: Option<History>) -> Self {
        Self {
            input: String::new(),
            cancel,
            history,
        }
    }

    /// The most recently read line, trimmed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The cancellation handle for this run.
    pub fn cancellation(&self) -> &CancelHandle {
        &self.cancel
    }

    /// Shorthand for `cancellation().is_cancelled()`.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Input history, if the engine keeps one.
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Recall a line by backward offset. Offset 0 is the current input.
    ///
    /// Returns `None` when the engine keeps no history.
    pub fn recall(&self, offset: usize) -> Option<&str> {
        self.history.as_ref().map(|h| h.get(offset))
    }

    /// Record a freshly read line as the current input.
    pub(crate) fn set_input(&mut self, line: String) {
        if let Some(history) = self.history.as_mut() {
            history.append(line.as_str());
        }
        self.input = line;
    }

    /// Hand the history back to the engine at the end of a run.
    pub(crate) fn into_history(self) -> Option<History> {
        self.history
    }
}
