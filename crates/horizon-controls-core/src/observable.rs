//! Observable item lists.
//!
//! [`ObservableList`] is a `Vec` that reports every structural mutation as a
//! [`ListChange`] through its [`changed`](ObservableList::changed) signal.
//! Index-keyed state that lives beside the list (selection, focus, a range
//! anchor) uses [`ListChange::map_index`] to follow the items it refers to.

use crate::error::{CoreError, CoreResult};
use crate::logging::targets;
use crate::signal::Signal;

/// One structural mutation of an item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// `count` items were inserted starting at `from`.
    Added { from: usize, count: usize },
    /// `count` items were removed starting at `from`.
    Removed { from: usize, count: usize },
    /// The items were reordered; `old_to_new[i]` is the new position of old item `i`.
    Permuted { old_to_new: Vec<usize> },
    /// The whole list was replaced. `old_to_new[i]` is the position of old item `i`
    /// in the new list when an equal item survived.
    Replaced {
        old_to_new: Vec<Option<usize>>,
        new_len: usize,
    },
}

impl ListChange {
    /// Where the item previously at `index` lives after this change, if it survived.
    pub fn map_index(&self, index: usize) -> Option<usize> {
        match self {
            Self::Added { from, count } => {
                if index >= *from {
                    Some(index + count)
                } else {
                    Some(index)
                }
            }
            Self::Removed { from, count } => {
                if index < *from {
                    Some(index)
                } else if index < from + count {
                    None
                } else {
                    Some(index - count)
                }
            }
            Self::Permuted { old_to_new } => old_to_new.get(index).copied(),
            Self::Replaced { old_to_new, .. } => old_to_new.get(index).copied().flatten(),
        }
    }

    /// Length of the list after this change, given its length before.
    pub fn len_after(&self, len_before: usize) -> usize {
        match self {
            Self::Added { count, .. } => len_before + count,
            Self::Removed { count, .. } => len_before.saturating_sub(*count),
            Self::Permuted { .. } => len_before,
            Self::Replaced { new_len, .. } => *new_len,
        }
    }

    /// Whether this change swapped out the whole list.
    pub fn is_replacement(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// A vector of items that announces its mutations.
#[derive(Debug, Default)]
pub struct ObservableList<T> {
    items: Vec<T>,
    changed: Signal<ListChange>,
}

impl<T> ObservableList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            changed: Signal::new(),
        }
    }

    /// Create a list holding `items`. No change is emitted.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            changed: Signal::new(),
        }
    }

    /// Signal emitted after every structural mutation.
    pub fn changed(&self) -> &Signal<ListChange> {
        &self.changed
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append one item.
    pub fn push(&mut self, item: T) -> ListChange {
        let from = self.items.len();
        self.items.push(item);
        self.announce(ListChange::Added { from, count: 1 })
    }

    /// Insert `item` at `index` (which may equal `len()`).
    pub fn insert(&mut self, index: usize, item: T) -> CoreResult<ListChange> {
        self.insert_all(index, vec![item])
    }

    /// Insert `items` at `index`, preserving their order.
    pub fn insert_all(&mut self, index: usize, items: Vec<T>) -> CoreResult<ListChange> {
        if index > self.items.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let count = items.len();
        self.items.splice(index..index, items);
        Ok(self.announce(ListChange::Added { from: index, count }))
    }

    /// Remove the item at `index`.
    pub fn remove(&mut self, index: usize) -> CoreResult<T> {
        if index >= self.items.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        self.announce(ListChange::Removed {
            from: index,
            count: 1,
        });
        Ok(item)
    }

    /// Remove the items in `start..end`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> CoreResult<Vec<T>> {
        if start > end || end > self.items.len() {
            return Err(CoreError::InvalidRange {
                start,
                end,
                len: self.items.len(),
            });
        }
        let removed: Vec<T> = self.items.drain(start..end).collect();
        if !removed.is_empty() {
            self.announce(ListChange::Removed {
                from: start,
                count: removed.len(),
            });
        }
        Ok(removed)
    }

    /// Remove every item.
    pub fn clear(&mut self) -> ListChange {
        let count = self.items.len();
        self.items.clear();
        self.announce(ListChange::Removed { from: 0, count })
    }

    /// Stable-sort the items, announcing the resulting permutation.
    pub fn sort_by<F>(&mut self, mut compare: F) -> ListChange
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&a, &b| compare(&self.items[a], &self.items[b]));

        let mut old_to_new = vec![0; order.len()];
        for (new_index, &old_index) in order.iter().enumerate() {
            old_to_new[old_index] = new_index;
        }

        let mut slots: Vec<Option<T>> = self.items.drain(..).map(Some).collect();
        self.items = order.iter().filter_map(|&old| slots[old].take()).collect();

        self.announce(ListChange::Permuted { old_to_new })
    }

    fn announce(&self, change: ListChange) -> ListChange {
        tracing::trace!(target: targets::LIST, ?change, len = self.items.len(), "list changed");
        self.changed.emit(change.clone());
        change
    }
}

impl<T: PartialEq> ObservableList<T> {
    /// Replace the whole content. Old items that have an equal counterpart in
    /// `items` are reported as surviving at that counterpart's position (each
    /// new item is claimed at most once).
    pub fn set_all(&mut self, items: Vec<T>) -> ListChange {
        let mut claimed = vec![false; items.len()];
        let old_to_new = self
            .items
            .iter()
            .map(|old| {
                let found = items
                    .iter()
                    .enumerate()
                    .position(|(i, new)| !claimed[i] && new == old);
                if let Some(i) = found {
                    claimed[i] = true;
                }
                found
            })
            .collect();

        let new_len = items.len();
        self.items = items;
        self.announce(ListChange::Replaced { old_to_new, new_len })
    }
}

impl<T> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(list: &ObservableList<&'static str>) -> Arc<Mutex<Vec<ListChange>>> {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        list.changed().connect(move |change| sink.lock().push(change.clone()));
        changes
    }

    #[test]
    fn test_insert_and_remove_emit_changes() {
        let mut list = ObservableList::from_vec(vec!["a", "b", "c"]);
        let changes = recorder(&list);

        list.insert(1, "x").unwrap();
        assert_eq!(list.as_slice(), &["a", "x", "b", "c"]);
        assert_eq!(list.remove(0).unwrap(), "a");

        assert_eq!(
            *changes.lock(),
            vec![
                ListChange::Added { from: 1, count: 1 },
                ListChange::Removed { from: 0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut list = ObservableList::from_vec(vec!["a"]);
        assert_eq!(
            list.insert(3, "z"),
            Err(CoreError::IndexOutOfBounds { index: 3, len: 1 })
        );
        assert!(list.remove_range(1, 0).is_err());
    }

    #[test]
    fn test_map_index_through_removal() {
        let change = ListChange::Removed { from: 2, count: 3 };
        assert_eq!(change.map_index(1), Some(1));
        assert_eq!(change.map_index(3), None);
        assert_eq!(change.map_index(6), Some(3));
    }

    #[test]
    fn test_sort_reports_permutation() {
        let mut list = ObservableList::from_vec(vec!["c", "a", "b"]);
        let change = list.sort_by(|a, b| a.cmp(b));
        assert_eq!(list.as_slice(), &["a", "b", "c"]);
        assert_eq!(change.map_index(0), Some(2));
        assert_eq!(change.map_index(1), Some(0));
    }

    #[test]
    fn test_set_all_tracks_surviving_items() {
        let mut list = ObservableList::from_vec(vec!["a", "b", "c"]);
        let change = list.set_all(vec!["c", "d", "a"]);
        assert!(change.is_replacement());
        assert_eq!(change.map_index(0), Some(2));
        assert_eq!(change.map_index(1), None);
        assert_eq!(change.map_index(2), Some(0));
        assert_eq!(change.len_after(3), 3);
    }
}
