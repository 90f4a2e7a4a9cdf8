//! Row or cell selection for tables.

use horizon_controls_core::{ListChange, Signal};

use super::model::{SelectionChange, SelectionMode, SelectionModel};
use super::position::TablePosition;

/// Table selection in either row mode or cell mode.
///
/// In row mode every stored position has `column == None` and column
/// arguments are ignored. In cell mode positions name single cells; a
/// `None` column selects every cell of the row.
#[derive(Debug)]
pub struct TableSelectionModel {
    cells: SelectionModel<TablePosition>,
    cell_selection_enabled: bool,
    column_count: usize,
}

impl TableSelectionModel {
    /// Creates an empty single-selection, row-mode model.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            cells: SelectionModel::new(row_count),
            cell_selection_enabled: false,
            column_count,
        }
    }

    /// Builder-style mode setter.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.cells.set_selection_mode(mode);
        self
    }

    /// Builder-style cell mode setter.
    pub fn with_cell_selection(mut self, enabled: bool) -> Self {
        self.cell_selection_enabled = enabled;
        self
    }

    /// Emitted after every change of the selected set.
    pub fn selection_changed(&self) -> &Signal<SelectionChange<TablePosition>> {
        &self.cells.selection_changed
    }

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.cells.selection_mode()
    }

    /// Change the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.cells.set_selection_mode(mode);
    }

    /// Whether single cells (rather than rows) are selected.
    pub fn is_cell_selection_enabled(&self) -> bool {
        self.cell_selection_enabled
    }

    /// Switch between row and cell mode. Clears the selection when the mode changes.
    pub fn set_cell_selection_enabled(&mut self, enabled: bool) {
        if self.cell_selection_enabled != enabled {
            self.cells.clear_selection();
            self.cell_selection_enabled = enabled;
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.cells.row_count()
    }

    /// Number of visible leaf columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Change the column count, dropping cells in removed columns.
    pub fn set_column_count(&mut self, column_count: usize) {
        self.column_count = column_count;
        let stale: Vec<TablePosition> = self
            .cells
            .selected_positions()
            .into_iter()
            .filter(|p| p.column.is_some_and(|c| c >= column_count))
            .collect();
        for position in stale {
            self.cells.clear_selection_at(position);
        }
    }

    /// The stored position for `(row, column)` in the current mode.
    pub fn position(&self, row: usize, column: Option<usize>) -> TablePosition {
        if self.cell_selection_enabled {
            TablePosition { row, column }
        } else {
            TablePosition::whole_row(row)
        }
    }

    fn column_valid(&self, column: Option<usize>) -> bool {
        !self.cell_selection_enabled || column.is_none_or(|c| c < self.column_count)
    }

    fn row_cells(&self, row: usize) -> impl Iterator<Item = TablePosition> + use<> {
        (0..self.column_count).map(move |c| TablePosition::cell(row, c))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether `(row, column)` is selected. In row mode only the row matters.
    pub fn is_selected(&self, row: usize, column: Option<usize>) -> bool {
        match (self.cell_selection_enabled, column) {
            (true, Some(_)) => self.cells.is_selected(&TablePosition { row, column }),
            _ => self.cells.is_row_selected(row),
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of selected rows (row mode) or cells (cell mode).
    pub fn selected_count(&self) -> usize {
        self.cells.selected_count()
    }

    /// Selected positions in ascending order.
    pub fn selected_cells(&self) -> Vec<TablePosition> {
        self.cells.selected_positions()
    }

    /// Distinct rows with any selection, ascending.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.cells.selected_rows()
    }

    /// Selected positions in the order they were added, oldest first.
    pub fn cells_in_selection_order(&self) -> &[TablePosition] {
        self.cells.positions_in_selection_order()
    }

    /// The last selected position.
    pub fn selected_cell(&self) -> Option<TablePosition> {
        self.cells.last_selected()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Select `(row, column)`. In cell mode a `None` column selects the whole row.
    pub fn select(&mut self, row: usize, column: Option<usize>) {
        if !self.column_valid(column) {
            return;
        }
        if self.cell_selection_enabled && column.is_none() {
            let cells = self.row_cells(row);
            self.cells.select_positions(cells);
        } else {
            let position = self.position(row, column);
            self.cells.select(position);
        }
    }

    /// Replace the selection with `(row, column)`.
    pub fn clear_and_select(&mut self, row: usize, column: Option<usize>) {
        if !self.column_valid(column) {
            return;
        }
        if self.cell_selection_enabled && column.is_none() {
            self.cells.clear_selection();
            let cells = self.row_cells(row);
            self.cells.select_positions(cells);
        } else {
            let position = self.position(row, column);
            self.cells.clear_and_select(position);
        }
    }

    /// Deselect `(row, column)`; a `None` column deselects the whole row.
    pub fn clear_selection_at(&mut self, row: usize, column: Option<usize>) {
        let targets: Vec<TablePosition> = match (self.cell_selection_enabled, column) {
            (true, Some(_)) => vec![TablePosition { row, column }],
            _ => self
                .cells
                .selected_positions()
                .into_iter()
                .filter(|p| p.row == row)
                .collect(),
        };
        for position in targets {
            self.cells.clear_selection_at(position);
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.cells.clear_selection();
    }

    /// Select rows `from..=to` in that direction, in `column` when in cell mode.
    pub fn select_range(&mut self, from: usize, to: usize, column: Option<usize>) {
        let rows: Vec<usize> = if from <= to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        };
        if self.cell_selection_enabled && column.is_none() {
            let cells: Vec<TablePosition> = rows.into_iter().flat_map(|r| self.row_cells(r)).collect();
            self.cells.select_positions(cells);
        } else {
            let cells: Vec<TablePosition> = rows.into_iter().map(|r| self.position(r, column)).collect();
            self.cells.select_positions(cells);
        }
    }

    /// Select the rectangle spanned by `from` and `to`; `to` ends up last.
    /// In row mode this selects the rows between them.
    pub fn select_cell_range(&mut self, from: TablePosition, to: TablePosition) {
        let (Some(from_col), Some(to_col), true) = (from.column, to.column, self.cell_selection_enabled) else {
            self.select_range(from.row, to.row, None);
            return;
        };
        let rows = ordered(from.row, to.row);
        let cols = ordered(from_col, to_col);
        let cells: Vec<TablePosition> = rows
            .iter()
            .flat_map(|&r| cols.iter().map(move |&c| TablePosition::cell(r, c)))
            .collect();
        self.cells.select_positions(cells);
    }

    /// Select every row (row mode) or every cell (cell mode).
    pub fn select_all(&mut self) {
        if self.selection_mode() == SelectionMode::Single {
            return;
        }
        let rows = self.row_count();
        if self.cell_selection_enabled {
            let cells: Vec<TablePosition> = (0..rows).flat_map(|r| self.row_cells(r)).collect();
            self.cells.select_positions(cells);
        } else {
            self.cells.select_positions((0..rows).map(TablePosition::whole_row));
        }
    }

    /// Follow an item mutation.
    pub fn handle_items_change(&mut self, change: &ListChange) {
        self.cells.handle_items_change(change);
    }
}

/// `from..=to` stepping toward `to`.
fn ordered(from: usize, to: usize) -> Vec<usize> {
    if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: usize, cols: usize) -> TableSelectionModel {
        TableSelectionModel::new(rows, cols)
            .with_mode(SelectionMode::Multiple)
            .with_cell_selection(true)
    }

    #[test]
    fn test_row_mode_ignores_column() {
        let mut model = TableSelectionModel::new(5, 3).with_mode(SelectionMode::Multiple);
        model.select(2, Some(1));
        assert!(model.is_selected(2, Some(0)));
        assert_eq!(model.selected_cells(), vec![TablePosition::whole_row(2)]);
    }

    #[test]
    fn test_cell_mode_whole_row_selects_every_column() {
        let mut model = cells(3, 3);
        model.select(1, None);
        assert_eq!(model.selected_count(), 3);
        assert!(model.is_selected(1, Some(2)));
        model.clear_selection_at(1, Some(2));
        assert!(!model.is_selected(1, Some(2)));
        assert!(model.is_selected(1, None));
    }

    #[test]
    fn test_cell_range_ends_on_target() {
        let mut model = cells(5, 5);
        model.select_cell_range(TablePosition::cell(3, 3), TablePosition::cell(1, 2));
        assert_eq!(model.selected_count(), 6);
        assert_eq!(model.selected_cell(), Some(TablePosition::cell(1, 2)));
    }

    #[test]
    fn test_invalid_column_is_ignored() {
        let mut model = cells(3, 2);
        model.select(0, Some(5));
        assert!(model.is_empty());
    }

    #[test]
    fn test_switching_mode_clears() {
        let mut model = cells(3, 2);
        model.select(0, Some(1));
        model.set_cell_selection_enabled(false);
        assert!(model.is_empty());
        model.select(0, Some(1));
        assert_eq!(model.selected_rows(), vec![0]);
    }

    #[test]
    fn test_column_count_shrink_drops_cells() {
        let mut model = cells(2, 4);
        model.select(0, Some(3));
        model.select(1, Some(0));
        model.set_column_count(2);
        assert_eq!(model.selected_cells(), vec![TablePosition::cell(1, 0)]);
    }
}
