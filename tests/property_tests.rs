//! Property-based tests for the history ring buffer.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use replwork::core::history::{History, HistoryError};

/// Strategy for generating input lines.
fn line() -> impl Strategy<Value = String> {
    "[a-z0-9 +*/-]{0,12}"
}

proptest! {
    /// Offset 0 is always the line appended last.
    #[test]
    fn latest_append_is_offset_zero(
        size in 1i64..32,
        lines in prop::collection::vec(line(), 1..64),
    ) {
        let mut history = History::new(size).unwrap();
        for l in &lines {
            history.append(l.as_str());
            prop_assert_eq!(history.get(0), l.as_str());
        }
    }

    /// Offsets wrap modulo the effective capacity.
    #[test]
    fn offsets_wrap_modulo_capacity(
        size in 1i64..32,
        lines in prop::collection::vec(line(), 0..64),
        offset in 0usize..1000,
    ) {
        let mut history = History::new(size).unwrap();
        for l in &lines {
            history.append(l.as_str());
        }
        let cap = history.capacity();
        prop_assert_eq!(history.get(offset), history.get(offset % cap));
    }

    /// The last `capacity` lines are recalled in reverse order.
    #[test]
    fn recent_lines_are_recalled_in_order(
        size in 2i64..16,
        lines in prop::collection::vec(line(), 0..48),
    ) {
        let mut history = History::new(size).unwrap();
        for l in &lines {
            history.append(l.as_str());
        }

        let kept = lines.len().min(history.capacity());
        for offset in 0..kept {
            prop_assert_eq!(history.get(offset), lines[lines.len() - 1 - offset].as_str());
        }
    }

    /// Capacity is fixed by construction.
    #[test]
    fn capacity_never_changes(
        size in 1i64..32,
        lines in prop::collection::vec(line(), 0..64),
    ) {
        let mut history = History::new(size).unwrap();
        let cap = history.capacity();
        for l in &lines {
            history.append(l.as_str());
            prop_assert_eq!(history.capacity(), cap);
        }
    }

    /// Negative sizes are always rejected.
    #[test]
    fn negative_size_is_rejected(size in i64::MIN..0) {
        prop_assert_eq!(History::new(size), Err(HistoryError::NegativeSize(size)));
    }
}
