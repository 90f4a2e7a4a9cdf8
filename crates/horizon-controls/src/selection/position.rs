//! Positions selection and focus state is keyed on.

use std::fmt;
use std::hash::Hash;

use horizon_controls_core::ListChange;

/// A selectable position in a row-oriented control.
///
/// Lists and trees select plain row indices (`usize`); tables select
/// [`TablePosition`]s. Both follow their row through item mutations.
pub trait GridPosition: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// The row this position refers to.
    fn row(&self) -> usize;

    /// The column, for positions that have one.
    fn column(&self) -> Option<usize> {
        None
    }

    /// The same position moved to `row`.
    fn with_row(self, row: usize) -> Self;
}

impl GridPosition for usize {
    #[inline]
    fn row(&self) -> usize {
        *self
    }

    #[inline]
    fn with_row(self, row: usize) -> Self {
        row
    }
}

/// A table row, or a single cell when `column` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TablePosition {
    /// Row index.
    pub row: usize,
    /// Column index, `None` for a whole row.
    pub column: Option<usize>,
}

impl TablePosition {
    /// A whole-row position.
    pub const fn whole_row(row: usize) -> Self {
        Self { row, column: None }
    }

    /// A single-cell position.
    pub const fn cell(row: usize, column: usize) -> Self {
        Self {
            row,
            column: Some(column),
        }
    }
}

impl GridPosition for TablePosition {
    #[inline]
    fn row(&self) -> usize {
        self.row
    }

    #[inline]
    fn column(&self) -> Option<usize> {
        self.column
    }

    #[inline]
    fn with_row(self, row: usize) -> Self {
        Self { row, ..self }
    }
}

/// Where `position` lives after `change`, given the row count after it.
///
/// A position whose row was removed moves to the first row after the
/// removed block, clamped to the last row. Positions dropped by a wholesale
/// replacement, or left in an empty list, yield `None`.
pub fn relocate<P: GridPosition>(position: P, change: &ListChange, len_after: usize) -> Option<P> {
    if let Some(row) = change.map_index(position.row()) {
        return Some(position.with_row(row));
    }
    match change {
        ListChange::Removed { from, .. } if len_after > 0 => {
            Some(position.with_row((*from).min(len_after - 1)))
        }
        _ => None,
    }
}

/// Step `row` by `delta`, returning `None` when the result leaves `0..row_count`.
pub fn offset_row(row: usize, delta: isize, row_count: usize) -> Option<usize> {
    row.checked_add_signed(delta).filter(|&r| r < row_count)
}
