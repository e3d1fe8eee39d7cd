//! core::history
//!
//! Fixed-capacity ring buffer of previously submitted input lines.
//!
//! # Addressing
//!
//! Entries are addressed by backward offset from the most recent append:
//! offset 0 is the newest line, offset 1 the one before it, and so on.
//! Offsets never fail. Anything past the effective capacity wraps around
//! and yields older entries cyclically.
//!
//! # Capacity
//!
//! A history built with `size` keeps `size - 1` distinct recallable lines
//! (one slot of the backing storage is never addressed). A size of 1 is
//! clamped so the single slot is still usable.
//!
//! # Invariants
//!
//! - Capacity is fixed at construction
//! - Appends never fail; once full, the oldest entry is overwritten
//! - Reading a slot that was never written yields an empty string

use thiserror::Error;

/// Errors from history construction.
///
/// These describe misuse by the caller, not runtime conditions: a history
/// that cannot hold a single line is never useful.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history cannot have negative size (got {0})")]
    NegativeSize(i64),

    #[error("history must hold at least one line")]
    ZeroSize,
}

/// Ring buffer of input lines.
///
/// # Example
///
/// ```
/// use replwork::core::history::History;
///
/// let mut history = History::new(4).unwrap();
/// history.append("one");
/// history.append("two");
///
/// assert_eq!(history.get(0), "two");
/// assert_eq!(history.get(1), "one");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    values: Vec<String>,
    head: usize,
    cap: usize,
}

impl History {
    /// Create a history from a requested size.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NegativeSize` for a negative size and
    /// `HistoryError::ZeroSize` for zero. Both are programming errors and
    /// should not be retried.
    pub fn new(size: i64) -> Result<Self, HistoryError> {
        if size < 0 {
            return Err(HistoryError::NegativeSize(size));
        }
        if size == 0 {
            return Err(HistoryError::ZeroSize);
        }

        let size = usize::try_from(size).map_err(|_| HistoryError::NegativeSize(size))?;
        Ok(Self {
            values: vec![String::new(); size],
            // Out of range on purpose: the first append lands on slot 0.
            head: size,
            cap: (size - 1).max(1),
        })
    }

    /// Number of distinct lines this history can recall.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Append a line, overwriting the oldest entry once full.
    pub fn append(&mut self, line: impl Into<String>) {
        self.head = (self.head + 1) % self.cap;
        self.values[self.head] = line.into();
    }

    /// Get the line `offset` entries back from the most recent one.
    ///
    /// Offsets wrap modulo [`capacity`](Self::capacity).
    pub fn get(&self, offset: usize) -> &str {
        let back = offset % self.cap;
        let index = (self.head % self.cap + self.cap - back) % self.cap;
        &self.values[index]
    }

    /// Iterate over every recallable slot, newest first.
    ///
    /// Slots that were never written show up as empty strings.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.cap).map(move |offset| self.get(offset))
    }

    #[cfg(test)]
    fn from_parts(values: &[&str], head: usize, cap: usize) -> Self {
        Self {
            values: values.iter().map(|s| s.to_string()).collect(),
            head,
            cap,
        }
    }
}
