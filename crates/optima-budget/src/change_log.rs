//! Bounded retention of change-log lines.

use crate::reconciler::CapChange;
use std::collections::VecDeque;

/// Number of entries retained by default.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Ring buffer of the most recent change entries, newest first.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    entries: VecDeque<CapChange>,
    capacity: usize,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl ChangeLog {
    /// Create an empty log keeping at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record the changes of one pass.
    ///
    /// The batch keeps its own order and sits in front of older entries.
    pub fn record<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = CapChange>,
        I::IntoIter: DoubleEndedIterator,
    {
        for change in batch.into_iter().rev() {
            self.entries.push_front(change);
        }
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &CapChange> {
        self.entries.iter()
    }

    /// Rendered lines, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
