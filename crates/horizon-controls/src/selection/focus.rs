//! Focus models: the row (or cell) keyboard navigation moves from.
//!
//! Focus is independent of selection. Focus-only navigation moves it without
//! touching the selection, which is how discontinuous selections are built.

use horizon_controls_core::logging::targets;
use horizon_controls_core::{ListChange, Signal};

use super::position::{GridPosition, TablePosition, offset_row, relocate};

/// The focused position over a domain of `row_count` rows.
pub struct FocusModel<P> {
    row_count: usize,
    focused: Option<P>,

    /// Emitted when the focused position changes.
    pub focus_changed: Signal<Option<P>>,
}

/// Row focus used by lists and trees.
pub type ListFocusModel = FocusModel<usize>;

/// Cell focus used by tables.
pub type TableFocusModel = FocusModel<TablePosition>;

impl<P: GridPosition> FocusModel<P> {
    /// Creates an unfocused model over `row_count` rows.
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            focused: None,
            focus_changed: Signal::new(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// The focused position.
    pub fn focused(&self) -> Option<P> {
        self.focused
    }

    /// Row of the focused position.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused.map(|p| p.row())
    }

    /// Whether `position` has focus.
    pub fn is_focused(&self, position: &P) -> bool {
        self.focused.as_ref() == Some(position)
    }

    /// Focus `position`. A row outside the domain clears focus.
    pub fn focus(&mut self, position: P) {
        let next = (position.row() < self.row_count).then_some(position);
        self.set_focused(next);
    }

    /// Remove focus.
    pub fn clear_focus(&mut self) {
        self.set_focused(None);
    }

    /// Focus `position` only when nothing has focus yet and the domain is not empty.
    pub fn ensure_focus(&mut self, position: P) {
        if self.focused.is_none() && self.row_count > 0 {
            self.focus(position);
        }
    }

    /// Move focus up one row, keeping the column. Unfocused moves to row 0.
    pub fn focus_previous(&mut self, first: P) {
        match self.focused {
            None => self.focus(first),
            Some(p) => {
                if let Some(row) = offset_row(p.row(), -1, self.row_count) {
                    self.focus(p.with_row(row));
                }
            }
        }
    }

    /// Move focus down one row, keeping the column. Unfocused moves to row 0.
    pub fn focus_next(&mut self, first: P) {
        match self.focused {
            None => self.focus(first),
            Some(p) => {
                if let Some(row) = offset_row(p.row(), 1, self.row_count) {
                    self.focus(p.with_row(row));
                }
            }
        }
    }

    /// Follow an item mutation. A focused row that was removed hands focus to
    /// the row now at its place; a replacement that drops it focuses row 0.
    pub fn handle_items_change(&mut self, change: &ListChange) {
        self.row_count = change.len_after(self.row_count);
        let next = self.focused.and_then(|p| {
            relocate(p, change, self.row_count)
                .or_else(|| (self.row_count > 0).then(|| p.with_row(0)))
        });
        self.set_focused(next);
    }

    fn set_focused(&mut self, next: Option<P>) {
        if self.focused != next {
            tracing::trace!(target: targets::SELECTION, from = ?self.focused, to = ?next, "focus moved");
            self.focused = next;
            self.focus_changed.emit(next);
        }
    }
}

impl FocusModel<TablePosition> {
    /// Focus the cell above the focused one.
    pub fn focus_above_cell(&mut self) {
        self.focus_previous(TablePosition::cell(0, 0));
    }

    /// Focus the cell below the focused one.
    pub fn focus_below_cell(&mut self) {
        self.focus_next(TablePosition::cell(0, 0));
    }

    /// Focus the cell left of the focused one.
    pub fn focus_left_cell(&mut self) {
        if let Some(TablePosition { row, column: Some(col) }) = self.focused {
            if col > 0 {
                self.focus(TablePosition::cell(row, col - 1));
            }
        }
    }

    /// Focus the cell right of the focused one, within `column_count` columns.
    pub fn focus_right_cell(&mut self, column_count: usize) {
        if let Some(TablePosition { row, column: Some(col) }) = self.focused {
            if col + 1 < column_count {
                self.focus(TablePosition::cell(row, col + 1));
            }
        }
    }
}

impl<P: GridPosition> Default for FocusModel<P> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<P: GridPosition> std::fmt::Debug for FocusModel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusModel")
            .field("row_count", &self.row_count)
            .field("focused", &self.focused)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_focus_out_of_range_clears() {
        let mut fm = ListFocusModel::new(3);
        fm.focus(2);
        fm.focus(3);
        assert_eq!(fm.focused(), None);
    }

    #[test]
    fn test_previous_and_next_stop_at_edges() {
        let mut fm = ListFocusModel::new(3);
        fm.focus_previous(0);
        assert_eq!(fm.focused_index(), Some(0));
        fm.focus_previous(0);
        assert_eq!(fm.focused_index(), Some(0));
        fm.focus(2);
        fm.focus_next(0);
        assert_eq!(fm.focused_index(), Some(2));
    }

    #[test]
    fn test_focus_changed_emits_once_per_move() {
        let mut fm = ListFocusModel::new(5);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        fm.focus_changed.connect(move |f| sink.lock().push(*f));
        fm.focus(1);
        fm.focus(1);
        fm.clear_focus();
        assert_eq!(*seen.lock(), vec![Some(1), None]);
    }

    #[test]
    fn test_removed_focus_moves_to_removal_point() {
        let mut fm = ListFocusModel::new(5);
        fm.focus(4);
        fm.handle_items_change(&ListChange::Removed { from: 3, count: 2 });
        assert_eq!(fm.focused_index(), Some(2));
        fm.handle_items_change(&ListChange::Removed { from: 0, count: 3 });
        assert_eq!(fm.focused_index(), None);
    }

    #[test]
    fn test_cell_moves_keep_row() {
        let mut fm = TableFocusModel::new(3);
        fm.focus(TablePosition::cell(1, 0));
        fm.focus_left_cell();
        assert_eq!(fm.focused(), Some(TablePosition::cell(1, 0)));
        fm.focus_right_cell(2);
        fm.focus_right_cell(2);
        assert_eq!(fm.focused(), Some(TablePosition::cell(1, 1)));
        fm.focus_below_cell();
        assert_eq!(fm.focused(), Some(TablePosition::cell(2, 1)));
    }
}
