//! Selection models for row-oriented controls.
//!
//! [`SelectionModel`] keeps the set of selected positions plus the *last
//! selected* position, the one single-value consumers read as "the selected
//! item". Range selection is directional: selecting from 5 down to 2 leaves 2
//! as the last selected position.
//!
//! # Example
//!
//! ```
//! use horizon_controls::selection::{MultipleSelectionModel, SelectionMode};
//!
//! let mut selection = MultipleSelectionModel::new(10).with_mode(SelectionMode::Multiple);
//! selection.select_range(5, 2);
//! assert_eq!(selection.selected_indices(), vec![2, 3, 4, 5]);
//! assert_eq!(selection.selected_index(), Some(2));
//! ```

use std::collections::BTreeSet;

use horizon_controls_core::logging::targets;
use horizon_controls_core::{ListChange, Signal};

use super::position::GridPosition;

/// How many positions may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// At most one position (default).
    #[default]
    Single,
    /// Any number of positions.
    Multiple,
}

/// One mutation of a selection, as delivered to `selection_changed` observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange<P> {
    /// Positions that became selected, in selection order.
    pub added: Vec<P>,
    /// Positions that stopped being selected.
    pub removed: Vec<P>,
    /// Whether the change swapped the selection (something removed and
    /// something added in one operation).
    pub replaced: bool,
    /// Whether nothing is selected after the change.
    pub empty_after: bool,
}

/// Selected positions over a domain of `row_count` rows.
pub struct SelectionModel<P> {
    mode: SelectionMode,
    row_count: usize,
    selected: BTreeSet<P>,
    /// Currently selected positions, oldest first.
    order: Vec<P>,
    last: Option<P>,

    /// Emitted after every change of the selected set.
    pub selection_changed: Signal<SelectionChange<P>>,
}

/// Row-index selection used by lists and trees.
pub type MultipleSelectionModel = SelectionModel<usize>;

impl<P: GridPosition> SelectionModel<P> {
    /// Creates an empty single-selection model over `row_count` rows.
    pub fn new(row_count: usize) -> Self {
        Self {
            mode: SelectionMode::default(),
            row_count,
            selected: BTreeSet::new(),
            order: Vec::new(),
            last: None,
            selection_changed: Signal::new(),
        }
    }

    /// Builder-style mode setter.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    // =========================================================================
    // Mode and domain
    // =========================================================================

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode. Switching to single keeps only the last
    /// selected position.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            if let Some(keep) = self.last.or_else(|| self.selected.last().copied()) {
                let removed: Vec<P> = self.selected.iter().copied().filter(|p| *p != keep).collect();
                self.selected.retain(|p| *p == keep);
                self.order.retain(|p| *p == keep);
                self.announce(Vec::new(), removed);
            }
        }
    }

    /// Number of rows in the selectable domain.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    fn in_bounds(&self, position: &P) -> bool {
        position.row() < self.row_count
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether `position` is selected.
    pub fn is_selected(&self, position: &P) -> bool {
        self.selected.contains(position)
    }

    /// Whether any position in `row` is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selected.iter().any(|p| p.row() == row)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected positions.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected positions in ascending order.
    pub fn selected_positions(&self) -> Vec<P> {
        self.selected.iter().copied().collect()
    }

    /// Distinct selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.selected.iter().map(|p| p.row()).collect();
        rows.dedup();
        rows
    }

    /// The last selected position.
    pub fn last_selected(&self) -> Option<P> {
        self.last
    }

    /// Selected positions in the order they were added, oldest first.
    pub fn positions_in_selection_order(&self) -> &[P] {
        &self.order
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add `position` to the selection and make it the last selected one.
    /// In single mode this replaces the selection.
    pub fn select(&mut self, position: P) {
        if !self.in_bounds(&position) {
            tracing::trace!(target: targets::SELECTION, ?position, "select out of bounds ignored");
            return;
        }
        if self.mode == SelectionMode::Single {
            self.clear_and_select(position);
            return;
        }
        self.last = Some(position);
        if self.selected.insert(position) {
            self.order.push(position);
            self.announce(vec![position], Vec::new());
        }
    }

    /// Replace the selection with `position`.
    pub fn clear_and_select(&mut self, position: P) {
        if !self.in_bounds(&position) {
            return;
        }
        let removed: Vec<P> = self.selected.iter().copied().filter(|p| *p != position).collect();
        let added = if self.selected.contains(&position) {
            Vec::new()
        } else {
            vec![position]
        };
        self.selected.clear();
        self.selected.insert(position);
        self.order = vec![position];
        self.last = Some(position);
        self.announce(added, removed);
    }

    /// Deselect `position`.
    pub fn clear_selection_at(&mut self, position: P) {
        if !self.selected.remove(&position) {
            return;
        }
        self.order.retain(|p| *p != position);
        if self.last == Some(position) {
            self.last = self.selected.last().copied();
        }
        self.announce(Vec::new(), vec![position]);
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            self.last = None;
            return;
        }
        let removed = std::mem::take(&mut self.selected).into_iter().collect();
        self.order.clear();
        self.last = None;
        self.announce(Vec::new(), removed);
    }

    /// Select `positions` in order; the final one becomes the last selected.
    /// In single mode only the final position is selected.
    pub fn select_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = P>,
    {
        let positions: Vec<P> = positions.into_iter().filter(|p| self.in_bounds(p)).collect();
        let Some(&final_position) = positions.last() else {
            return;
        };
        if self.mode == SelectionMode::Single {
            self.select(final_position);
            return;
        }
        let added: Vec<P> = positions
            .into_iter()
            .filter(|p| self.selected.insert(*p))
            .collect();
        self.order.extend(added.iter().copied());
        self.last = Some(final_position);
        if !added.is_empty() {
            self.announce(added, Vec::new());
        }
    }

    /// Follow an item mutation: shift surviving positions, drop removed ones.
    ///
    /// Remapping is silent; observers already saw the item change itself.
    pub fn handle_items_change(&mut self, change: &ListChange) {
        self.row_count = change.len_after(self.row_count);
        let remap = |p: &P| change.map_index(p.row()).map(|row| p.with_row(row));
        self.selected = self.selected.iter().filter_map(remap).collect();
        self.order = self.order.iter().filter_map(remap).collect();
        self.last = self
            .last
            .as_ref()
            .and_then(remap)
            .or_else(|| self.selected.last().copied());
    }

    fn announce(&self, added: Vec<P>, removed: Vec<P>) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        let change = SelectionChange {
            replaced: !added.is_empty() && !removed.is_empty(),
            empty_after: self.selected.is_empty(),
            added,
            removed,
        };
        tracing::trace!(
            target: targets::SELECTION,
            added = change.added.len(),
            removed = change.removed.len(),
            replaced = change.replaced,
            "selection changed"
        );
        self.selection_changed.emit(change);
    }
}

impl SelectionModel<usize> {
    /// Select the inclusive range between `from` and `to`, in that direction,
    /// so `to` ends up as the last selected index.
    pub fn select_range(&mut self, from: usize, to: usize) {
        if from <= to {
            self.select_positions(from..=to);
        } else {
            self.select_positions((to..=from).rev());
        }
    }

    /// Select `indices` in order.
    pub fn select_indices(&mut self, indices: &[usize]) {
        self.select_positions(indices.iter().copied());
    }

    /// Select every row. No effect in single mode.
    pub fn select_all(&mut self) {
        if self.mode == SelectionMode::Single || self.row_count == 0 {
            return;
        }
        self.select_positions(0..self.row_count);
    }

    /// Selected indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected_positions()
    }

    /// The last selected index.
    pub fn selected_index(&self) -> Option<usize> {
        self.last
    }
}

impl<P: GridPosition> Default for SelectionModel<P> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<P: GridPosition> std::fmt::Debug for SelectionModel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("mode", &self.mode)
            .field("row_count", &self.row_count)
            .field("selected", &self.selected)
            .field("order", &self.order)
            .field("last", &self.last)
            .finish()
    }
}
