//! Recently selected positions.

use std::collections::VecDeque;

/// Default number of remembered positions.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// A bounded list of recently added selection positions, most recent first.
///
/// Cell-mode shift navigation compares the second most recent entry with the
/// cell it is about to move to in order to detect backtracking.
#[derive(Debug, Clone)]
pub struct SelectionHistory<P> {
    entries: VecDeque<P>,
    limit: usize,
}

impl<P: Copy + PartialEq> SelectionHistory<P> {
    /// Creates an empty history keeping at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record `position` as the most recent entry, evicting the oldest beyond the limit.
    pub fn push(&mut self, position: P) {
        if self.limit == 0 {
            return;
        }
        self.entries.push_front(position);
        self.entries.truncate(self.limit);
    }

    /// The entry `age` steps back (0 is the most recent).
    pub fn get(&self, age: usize) -> Option<P> {
        self.entries.get(age).copied()
    }

    /// Whether `position` is remembered.
    pub fn contains(&self, position: &P) -> bool {
        self.entries.contains(position)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<P: Copy + PartialEq> Default for SelectionHistory<P> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
