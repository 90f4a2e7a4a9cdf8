//! Keyboard and pointer selection algorithms for tables.
//!
//! [`CellSelection`] is the table counterpart of
//! [`RowSelection`](super::RowSelection). In row mode it behaves like the
//! row algorithms with [`TablePosition::whole_row`] positions; in cell mode
//! shift extension runs along the focused column (vertical) or row
//! (horizontal). A backtracking move is told from a forward one by the
//! coordinator's selection history when moving vertically and by the
//! current selection order when moving horizontally.

use horizon_controls_core::logging::targets;

use super::coordinator::SelectionCoordinator;
use super::focus::TableFocusModel;
use super::model::SelectionMode;
use super::position::{TablePosition, offset_row};
use super::table_model::TableSelectionModel;
use super::viewport::Viewport;

/// Selection gestures over one table's state.
pub struct CellSelection<'a> {
    selection: &'a mut TableSelectionModel,
    focus: &'a mut TableFocusModel,
    coordinator: &'a SelectionCoordinator<TablePosition>,
    viewport: &'a mut Viewport,
}

impl<'a> CellSelection<'a> {
    /// Borrow a table's selection state.
    pub fn new(
        selection: &'a mut TableSelectionModel,
        focus: &'a mut TableFocusModel,
        coordinator: &'a SelectionCoordinator<TablePosition>,
        viewport: &'a mut Viewport,
    ) -> Self {
        Self {
            selection,
            focus,
            coordinator,
            viewport,
        }
    }

    fn row_count(&self) -> usize {
        self.selection.row_count()
    }

    fn column_count(&self) -> usize {
        self.selection.column_count()
    }

    fn is_single(&self) -> bool {
        self.selection.selection_mode() == SelectionMode::Single
    }

    fn cell_mode(&self) -> bool {
        self.selection.is_cell_selection_enabled()
    }

    /// The focused column, defaulting to the first column in cell mode.
    fn focused_column(&self) -> Option<usize> {
        match self.focus.focused().and_then(|p| p.column) {
            Some(column) => Some(column),
            None if self.cell_mode() && self.column_count() > 0 => Some(0),
            None => None,
        }
    }

    fn focused_row_or_first(&self) -> usize {
        self.focus.focused_index().unwrap_or(0)
    }

    fn position(&self, row: usize, column: Option<usize>) -> TablePosition {
        self.selection.position(row, column)
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Replace the selection with `(row, column)`, focus it and anchor there.
    pub fn clear_and_select(&mut self, row: usize, column: Option<usize>) {
        if row >= self.row_count() {
            return;
        }
        self.selection.clear_and_select(row, column);
        let position = self.position(row, column);
        self.focus.focus(position);
        self.coordinator.set_anchor(position);
        self.viewport.reveal(row);
    }

    fn focus_cell(&mut self, row: usize, column: Option<usize>) {
        let position = self.position(row, column);
        self.focus.focus(position);
        self.viewport.reveal(row);
    }

    fn select(&mut self, row: usize, column: Option<usize>) {
        self.selection.select(row, column);
        self.focus_cell(row, column);
    }

    fn select_range(&mut self, from: usize, to: usize, column: Option<usize>) {
        self.selection.select_range(from, to, column);
        self.focus_cell(to, column);
    }

    /// Deselect rows outside `start..=end` in `column` (whole rows in row mode).
    pub fn clear_selection_outside_range(&mut self, start: usize, end: usize, column: Option<usize>) {
        let (min, max) = (start.min(end), start.max(end));
        let _guard = self.coordinator.begin_selection_change();
        for row in self.selection.selected_rows() {
            if row < min || row > max {
                self.selection.clear_selection_at(row, column);
            }
        }
    }

    // =========================================================================
    // Navigate and select
    // =========================================================================

    /// Select the first row, keeping the focused column.
    pub fn select_first_row(&mut self) {
        let column = self.focused_column();
        self.clear_and_select(0, column);
    }

    /// Select the last row, keeping the focused column.
    pub fn select_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            let column = self.focused_column();
            self.clear_and_select(last, column);
        }
    }

    /// Select the cell (or row) above the focus.
    pub fn select_previous_row(&mut self) -> bool {
        self.select_cell(-1, 0)
    }

    /// Select the cell (or row) below the focus.
    pub fn select_next_row(&mut self) -> bool {
        self.select_cell(1, 0)
    }

    /// Select the cell left of the focus. Returns false when nothing moved,
    /// so the caller can fall back to focus traversal.
    pub fn select_left_cell(&mut self) -> bool {
        self.select_cell(0, -1)
    }

    /// Select the cell right of the focus.
    pub fn select_right_cell(&mut self) -> bool {
        self.select_cell(0, 1)
    }

    fn select_cell(&mut self, row_delta: isize, column_delta: isize) -> bool {
        if self.row_count() == 0 {
            return false;
        }
        let current_row = self.focus.focused_index();
        let current_column = self.focused_column();

        if row_delta > 0 && current_row.is_some_and(|r| r + 1 >= self.row_count()) {
            return false;
        }
        let column = if column_delta == 0 {
            current_column
        } else {
            if !self.cell_mode() {
                return false;
            }
            let Some(column) = current_column.and_then(|c| offset_row(c, column_delta, self.column_count())) else {
                return false;
            };
            Some(column)
        };

        let row = match current_row {
            Some(r) if !(r == 0 && row_delta <= 0) => r.saturating_add_signed(row_delta),
            _ => 0,
        };
        self.clear_and_select(row, column);
        true
    }

    /// Select the page target above.
    pub fn scroll_page_up(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let column = self.focused_column();
        let lead = self.focused_row_or_first();
        if let Some(target) = self.viewport.page_up(lead, self.row_count()) {
            self.clear_and_select(target, column);
        }
    }

    /// Select the page target below.
    pub fn scroll_page_down(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let column = self.focused_column();
        let lead = self.focused_row_or_first();
        if let Some(target) = self.viewport.page_down(lead, self.row_count()) {
            self.clear_and_select(target, column);
        }
    }

    // =========================================================================
    // Shift extension
    // =========================================================================

    /// Shift+Up.
    pub fn also_select_previous(&mut self) {
        self.also_select_vertical(-1);
    }

    /// Shift+Down.
    pub fn also_select_next(&mut self) {
        self.also_select_vertical(1);
    }

    fn also_select_vertical(&mut self, delta: isize) {
        if self.is_single() {
            self.select_cell(delta, 0);
            return;
        }
        if self.cell_mode() {
            self.update_cell_vertical_selection(delta);
        } else if self.coordinator.is_shift_down() {
            self.update_row_selection(delta);
        } else if let Some(row) = offset_row(self.focused_row_or_first(), delta, self.row_count()) {
            self.select(row, None);
        }
    }

    /// Shift+Left (cell mode only).
    pub fn also_select_left_cell(&mut self) {
        if self.cell_mode() {
            self.update_cell_horizontal_selection(-1);
        }
    }

    /// Shift+Right (cell mode only).
    pub fn also_select_right_cell(&mut self) {
        if self.cell_mode() {
            self.update_cell_horizontal_selection(1);
        }
    }

    fn update_row_selection(&mut self, delta: isize) {
        let Some(focus) = self.focus.focused() else {
            self.select_first_row();
            return;
        };
        let Some(new_row) = offset_row(focus.row, delta, self.row_count()) else {
            return;
        };
        let anchor = match self.coordinator.anchor() {
            Some(anchor) => anchor,
            None => {
                self.coordinator.set_anchor(focus);
                focus
            }
        };
        if self.selection.selected_count() > 1 {
            self.clear_selection_outside_range(anchor.row, new_row, None);
        }
        self.select_range(anchor.row, new_row, None);
    }

    fn update_cell_vertical_selection(&mut self, delta: isize) {
        let Some(focused) = self.focus.focused() else {
            return;
        };
        let (row, column) = (focused.row, focused.column);
        let shift = self.coordinator.is_shift_down();
        let deviated = self.coordinator.is_path_deviated();
        let target = offset_row(row, delta, self.row_count());

        if shift && let Some(target) = target.filter(|&t| self.selection.is_selected(t, column)) {
            let backtracking = self
                .coordinator
                .history_entry(1)
                .is_some_and(|p| p.row == target && p.column == column);
            let row_to_clear = match (deviated, backtracking) {
                (true, true) => row,
                (true, false) => target,
                (false, _) => row,
            };
            tracing::trace!(target: targets::SELECTION, row_to_clear, backtracking, deviated, "vertical cell retreat");
            self.selection.clear_selection_at(row_to_clear, column);
            self.focus_cell(target, column);
        } else if shift && !deviated && let Some(anchor) = self.coordinator.anchor() {
            let new_row = row
                .saturating_add_signed(delta)
                .min(self.row_count().saturating_sub(1));
            let (start, end) = (anchor.row.min(new_row), anchor.row.max(new_row));
            if self.selection.selected_count() > 1 {
                self.clear_selection_outside_range(start, end, column);
            }
            for r in start..=end {
                if !self.selection.is_selected(r, column) {
                    self.selection.select(r, column);
                }
            }
            self.focus_cell(new_row, column);
        } else {
            if !self.selection.is_selected(row, column) {
                self.selection.select(row, column);
            }
            if let Some(target) = target {
                self.select(target, column);
            }
        }
    }

    fn update_cell_horizontal_selection(&mut self, delta: isize) {
        let Some(TablePosition { row, column: Some(column) }) = self.focus.focused() else {
            return;
        };
        let (adjacent, at_end) = match offset_row(column, delta, self.column_count()) {
            Some(adjacent) => (adjacent, false),
            None => (column, true),
        };
        let shift = self.coordinator.is_shift_down();
        let deviated = self.coordinator.is_path_deviated();

        if shift && self.selection.is_selected(row, Some(adjacent)) {
            if at_end {
                return;
            }
            let backtracking = self
                .selection
                .cells_in_selection_order()
                .iter()
                .rev()
                .nth(1)
                .is_some_and(|p| p.row == row && p.column == Some(adjacent));
            let column_to_clear = if deviated && !backtracking { adjacent } else { column };
            self.selection.clear_selection_at(row, Some(column_to_clear));
            self.focus_cell(row, Some(adjacent));
        } else if shift && !deviated && let Some(anchor) = self.coordinator.anchor() {
            let anchor_column = anchor.column.unwrap_or(column);
            let new_column = column
                .saturating_add_signed(delta)
                .min(self.column_count().saturating_sub(1));
            let (start, end) = (anchor_column.min(new_column), anchor_column.max(new_column));
            for c in start..=end {
                self.selection.select(row, Some(c));
            }
            self.focus_cell(row, Some(new_column));
        } else if !at_end {
            self.select(row, Some(adjacent));
        }
    }

    /// Shift+Home.
    pub fn select_all_to_first_row(&mut self) {
        self.select_all_to_edge(0);
    }

    /// Shift+End.
    pub fn select_all_to_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            self.select_all_to_edge(last);
        }
    }

    fn select_all_to_edge(&mut self, edge: usize) {
        if self.row_count() == 0 {
            return;
        }
        let shift = self.coordinator.is_shift_down();
        let column = self.focused_column();
        let focus = self.focused_row_or_first();
        let lead = if shift {
            self.coordinator.anchor().map_or(focus, |a| a.row)
        } else {
            focus
        };
        {
            let _guard = self.coordinator.begin_selection_change();
            if self.is_single() {
                self.selection.select(edge, column);
            } else {
                self.selection.clear_selection();
                self.selection.select_range(lead, edge, column);
            }
        }
        self.focus_cell(edge, column);
        if shift {
            let anchor = self.position(lead, column);
            self.coordinator.set_anchor(anchor);
        }
    }

    /// Shift+PageUp.
    pub fn select_all_page_up(&mut self) {
        let focus = self.focused_row_or_first();
        let target = self.viewport.page_up(focus, self.row_count());
        self.select_all_to_page_target(focus, target);
    }

    /// Shift+PageDown.
    pub fn select_all_page_down(&mut self) {
        let focus = self.focused_row_or_first();
        let target = self.viewport.page_down(focus, self.row_count());
        self.select_all_to_page_target(focus, target);
    }

    fn select_all_to_page_target(&mut self, focus: usize, target: Option<usize>) {
        let Some(target) = target else {
            return;
        };
        let column = if self.cell_mode() { self.focused_column() } else { None };
        let mut lead = focus;
        if self.coordinator.is_shift_down() {
            lead = self.coordinator.anchor().map_or(focus, |a| a.row);
            let anchor = self.position(lead, column);
            self.coordinator.set_anchor(anchor);
        }
        {
            let _guard = self.coordinator.begin_selection_change();
            if self.is_single() {
                self.selection.select(target, column);
            } else {
                self.selection.clear_selection();
                self.selection.select_range(lead, target, column);
            }
        }
        self.focus_cell(target, column);
    }

    /// Select every row or cell. The anchor is kept.
    pub fn select_all(&mut self) {
        let _guard = self.coordinator.begin_selection_change();
        self.selection.select_all();
    }

    /// Replace the selection with the anchor-to-focus range (a rectangle in
    /// cell mode). With `move_anchor` the focus becomes the anchor.
    pub fn select_all_to_focus(&mut self, move_anchor: bool) {
        let Some(focus) = self.focus.focused() else {
            return;
        };
        let anchor = self.coordinator.anchor_or(focus);
        {
            let _guard = self.coordinator.begin_selection_change();
            self.selection.clear_selection();
            if self.cell_mode() {
                self.selection.select_cell_range(anchor, focus);
            } else {
                self.selection.select_range(anchor.row, focus.row, None);
            }
        }
        self.coordinator.set_anchor(if move_anchor { focus } else { anchor });
    }

    // =========================================================================
    // Focus only
    // =========================================================================

    /// Focus the first row, keeping the column.
    pub fn focus_first_row(&mut self) {
        if self.row_count() > 0 {
            let column = self.focused_column();
            self.focus_cell(0, column);
        }
    }

    /// Focus the last row, keeping the column.
    pub fn focus_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            let column = self.focused_column();
            self.focus_cell(last, column);
        }
    }

    /// Focus the row above. The anchor follows only when the shortcut
    /// modifier is up or no anchor exists.
    pub fn focus_previous_row(&mut self) {
        let first = self.position(0, self.focused_column());
        self.focus.focus_previous(first);
        self.anchor_to_moved_focus();
    }

    /// Focus the row below.
    pub fn focus_next_row(&mut self) {
        let first = self.position(0, self.focused_column());
        self.focus.focus_next(first);
        self.anchor_to_moved_focus();
    }

    fn anchor_to_moved_focus(&mut self) {
        let Some(focus) = self.focus.focused() else {
            return;
        };
        self.viewport.reveal(focus.row);
        if !self.coordinator.is_shortcut_down() || !self.coordinator.has_anchor() {
            self.coordinator.set_anchor(focus);
        }
    }

    /// Focus the cell to the left.
    pub fn focus_left_cell(&mut self) {
        self.focus.focus_left_cell();
    }

    /// Focus the cell to the right.
    pub fn focus_right_cell(&mut self) {
        let columns = self.column_count();
        self.focus.focus_right_cell(columns);
    }

    /// Focus the page target above.
    pub fn focus_page_up(&mut self) {
        let focus = self.focused_row_or_first();
        if let Some(target) = self.viewport.page_up(focus, self.row_count()) {
            let column = self.focused_column();
            self.focus.focus(self.position(target, column));
        }
    }

    /// Focus the page target below.
    pub fn focus_page_down(&mut self) {
        let focus = self.focused_row_or_first();
        if let Some(target) = self.viewport.page_down(focus, self.row_count()) {
            let column = self.focused_column();
            self.focus.focus(self.position(target, column));
        }
    }

    // =========================================================================
    // Discontinuous (ctrl+shift) selection
    // =========================================================================

    /// Add the row (or cell) above without clearing anything.
    pub fn discontinuous_select_previous_row(&mut self) {
        self.discontinuous_select(-1);
    }

    /// Add the row (or cell) below without clearing anything.
    pub fn discontinuous_select_next_row(&mut self) {
        self.discontinuous_select(1);
    }

    fn discontinuous_select(&mut self, delta: isize) {
        if self.is_single() {
            self.select_cell(delta, 0);
            return;
        }
        let Some(focus) = self.focus.focused() else {
            return;
        };
        let Some(new_row) = offset_row(focus.row, delta, self.row_count()) else {
            return;
        };
        let start = if self.coordinator.is_shift_down() {
            self.coordinator.anchor().map_or(focus.row, |a| a.row)
        } else {
            focus.row
        };
        let column = if self.cell_mode() { self.focused_column() } else { None };
        self.select_range(start, new_row, column);
    }

    /// Add the cell left of the focus (cell mode only).
    pub fn discontinuous_select_previous_column(&mut self) {
        self.discontinuous_select_column(-1);
    }

    /// Add the cell right of the focus (cell mode only).
    pub fn discontinuous_select_next_column(&mut self) {
        self.discontinuous_select_column(1);
    }

    fn discontinuous_select_column(&mut self, delta: isize) {
        if !self.cell_mode() {
            return;
        }
        let Some(TablePosition { row, column: Some(column) }) = self.focus.focused() else {
            return;
        };
        if let Some(column) = offset_row(column, delta, self.column_count()) {
            self.select(row, Some(column));
        }
    }

    /// Add the anchor-to-page-target rows above (row mode only).
    pub fn discontinuous_select_page_up(&mut self) {
        if self.cell_mode() {
            return;
        }
        let focus = self.focused_row_or_first();
        let anchor = self.coordinator.anchor().map_or(focus, |a| a.row);
        if let Some(target) = self.viewport.page_up(focus, self.row_count()) {
            self.select_range(anchor, target, None);
        }
    }

    /// Add the anchor-to-page-target rows below (row mode only).
    pub fn discontinuous_select_page_down(&mut self) {
        if self.cell_mode() {
            return;
        }
        let focus = self.focused_row_or_first();
        let anchor = self.coordinator.anchor().map_or(focus, |a| a.row);
        if let Some(target) = self.viewport.page_down(focus, self.row_count()) {
            self.select_range(anchor, target, None);
        }
    }

    /// Add everything from the focus up to the first row.
    pub fn discontinuous_select_all_to_first_row(&mut self) {
        if self.row_count() > 0 {
            let focus = self.focused_row_or_first();
            let column = if self.cell_mode() { self.focused_column() } else { None };
            self.select_range(focus, 0, column);
        }
    }

    /// Add everything from the focus down to the last row.
    pub fn discontinuous_select_all_to_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            let focus = self.focused_row_or_first();
            let column = if self.cell_mode() { self.focused_column() } else { None };
            self.select_range(focus, last, column);
        }
    }

    /// Toggle the focused row or cell and anchor there.
    pub fn toggle_focus_owner_selection(&mut self) {
        let Some(focus) = self.focus.focused() else {
            return;
        };
        self.toggle(focus.row, focus.column);
    }

    fn toggle(&mut self, row: usize, column: Option<usize>) {
        if self.selection.is_selected(row, column) {
            self.selection.clear_selection_at(row, column);
            self.focus_cell(row, column);
        } else {
            self.select(row, column);
        }
        let anchor = self.position(row, column);
        self.coordinator.set_anchor(anchor);
    }

    /// Select and anchor the focused row or cell, returning it.
    pub fn select_focused(&mut self) -> Option<TablePosition> {
        let focus = self.focus.focused()?;
        self.selection.select(focus.row, focus.column);
        self.coordinator.set_anchor(focus);
        Some(focus)
    }

    /// Whether the row or cell is selected.
    pub fn is_selected(&self, row: usize, column: Option<usize>) -> bool {
        self.selection.is_selected(row, column)
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// A primary press on `(row, column)`.
    pub fn press_cell(&mut self, row: usize, column: Option<usize>, shift: bool, shortcut: bool) {
        if row >= self.row_count() {
            return;
        }
        tracing::trace!(target: targets::SELECTION, row, ?column, shift, shortcut, "cell pressed");
        let target = self.position(row, column);
        if shift && !self.is_single() {
            let anchor = match self.coordinator.anchor() {
                Some(anchor) => anchor,
                None => {
                    let anchor = self.focus.focused().unwrap_or(target);
                    self.coordinator.set_anchor(anchor);
                    anchor
                }
            };
            if self.cell_mode() && target.column.is_some() {
                let _guard = self.coordinator.begin_selection_change();
                self.selection.clear_selection();
                self.selection.select_cell_range(anchor, target);
            } else {
                if self.selection.selected_count() > 1 {
                    self.clear_selection_outside_range(anchor.row, row, None);
                }
                self.selection.select_range(anchor.row, row, None);
            }
            self.focus_cell(row, column);
        } else if shortcut {
            self.toggle(row, column);
        } else {
            self.clear_and_select(row, column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AnchorState;

    struct Fixture {
        selection: TableSelectionModel,
        focus: TableFocusModel,
        coordinator: SelectionCoordinator<TablePosition>,
        viewport: Viewport,
    }

    impl Fixture {
        fn new(rows: usize, columns: usize, cell_mode: bool) -> Self {
            let selection = TableSelectionModel::new(rows, columns)
                .with_mode(SelectionMode::Multiple)
                .with_cell_selection(cell_mode);
            let coordinator = SelectionCoordinator::new(10);
            coordinator.set_cell_selection(cell_mode);
            let listener = coordinator.clone();
            selection
                .selection_changed()
                .connect(move |change| listener.on_selection_changed(change));
            Self {
                selection,
                focus: TableFocusModel::new(rows),
                coordinator,
                viewport: Viewport::new(5),
            }
        }

        fn cells(&mut self) -> CellSelection<'_> {
            CellSelection::new(&mut self.selection, &mut self.focus, &self.coordinator, &mut self.viewport)
        }
    }

    #[test]
    fn test_row_mode_ignores_horizontal_moves() {
        let mut fx = Fixture::new(5, 3, false);
        fx.cells().clear_and_select(1, None);
        assert!(!fx.cells().select_left_cell());
        assert!(!fx.cells().select_right_cell());
        assert!(fx.cells().select_next_row());
        assert_eq!(fx.selection.selected_rows(), vec![2]);
        assert_eq!(fx.coordinator.anchor_state(), AnchorState::Explicit(TablePosition::whole_row(2)));
    }

    #[test]
    fn test_cell_moves_stop_at_edges() {
        let mut fx = Fixture::new(3, 3, true);
        fx.cells().clear_and_select(0, Some(0));
        assert!(!fx.cells().select_left_cell());
        assert!(fx.cells().select_previous_row());
        assert_eq!(fx.selection.selected_cell(), Some(TablePosition::cell(0, 0)));
        assert!(fx.cells().select_right_cell());
        assert!(fx.cells().select_right_cell());
        assert!(!fx.cells().select_right_cell());
        assert_eq!(fx.selection.selected_cells(), vec![TablePosition::cell(0, 2)]);
    }

    #[test]
    fn test_row_mode_shift_extension() {
        let mut fx = Fixture::new(10, 2, false);
        fx.cells().clear_and_select(2, None);
        fx.coordinator.set_modifiers(true, false);
        fx.cells().also_select_next();
        fx.cells().also_select_next();
        assert_eq!(fx.selection.selected_rows(), vec![2, 3, 4]);
        fx.cells().also_select_previous();
        assert_eq!(fx.selection.selected_rows(), vec![2, 3]);
    }

    #[test]
    fn test_vertical_cell_extension_and_retreat() {
        let mut fx = Fixture::new(10, 3, true);
        fx.cells().clear_and_select(2, Some(1));
        fx.coordinator.set_modifiers(true, false);
        fx.cells().also_select_next();
        fx.cells().also_select_next();
        assert_eq!(
            fx.selection.selected_cells(),
            vec![TablePosition::cell(2, 1), TablePosition::cell(3, 1), TablePosition::cell(4, 1)]
        );
        assert_eq!(fx.focus.focused(), Some(TablePosition::cell(4, 1)));

        fx.cells().also_select_previous();
        assert_eq!(
            fx.selection.selected_cells(),
            vec![TablePosition::cell(2, 1), TablePosition::cell(3, 1)]
        );
        assert_eq!(fx.focus.focused(), Some(TablePosition::cell(3, 1)));
    }

    #[test]
    fn test_horizontal_cell_extension() {
        let mut fx = Fixture::new(4, 4, true);
        fx.cells().clear_and_select(1, Some(0));
        fx.coordinator.set_modifiers(true, false);
        fx.cells().also_select_right_cell();
        fx.cells().also_select_right_cell();
        assert_eq!(fx.selection.selected_count(), 3);
        assert_eq!(fx.focus.focused(), Some(TablePosition::cell(1, 2)));
        fx.cells().also_select_left_cell();
        assert_eq!(fx.selection.selected_count(), 2);
        assert!(!fx.selection.is_selected(1, Some(2)));
    }

    #[test]
    fn test_horizontal_backtrack_after_vertical_retreat() {
        let mut fx = Fixture::new(3, 3, true);
        fx.cells().clear_and_select(0, Some(0));
        fx.coordinator.set_modifiers(true, false);

        fx.cells().also_select_right_cell();
        fx.cells().also_select_next();
        assert!(fx.coordinator.is_path_deviated());
        fx.cells().also_select_previous();
        assert_eq!(
            fx.selection.selected_cells(),
            vec![TablePosition::cell(0, 0), TablePosition::cell(0, 1)]
        );

        fx.cells().also_select_left_cell();
        assert_eq!(fx.selection.selected_cells(), vec![TablePosition::cell(0, 0)]);
        assert_eq!(fx.focus.focused(), Some(TablePosition::cell(0, 0)));
        assert_eq!(fx.coordinator.anchor(), Some(TablePosition::cell(0, 0)));
    }

    #[test]
    fn test_select_all_to_focus_is_rectangular_in_cell_mode() {
        let mut fx = Fixture::new(5, 5, true);
        fx.cells().clear_and_select(1, Some(1));
        fx.focus.focus(TablePosition::cell(2, 3));
        fx.cells().select_all_to_focus(false);
        assert_eq!(fx.selection.selected_count(), 6);
        assert_eq!(fx.coordinator.anchor(), Some(TablePosition::cell(1, 1)));
    }

    #[test]
    fn test_toggle_keeps_anchor_on_deselected_cell() {
        let mut fx = Fixture::new(5, 2, true);
        fx.cells().clear_and_select(0, Some(0));
        fx.cells().press_cell(0, Some(1), false, true);
        fx.cells().press_cell(0, Some(0), false, true);
        assert_eq!(fx.selection.selected_cells(), vec![TablePosition::cell(0, 1)]);
        assert_eq!(fx.coordinator.anchor(), Some(TablePosition::cell(0, 0)));
    }

    #[test]
    fn test_shift_press_in_cell_mode_selects_rectangle() {
        let mut fx = Fixture::new(5, 5, true);
        fx.cells().press_cell(1, Some(1), false, false);
        fx.cells().press_cell(3, Some(2), true, false);
        assert_eq!(fx.selection.selected_count(), 6);
        assert_eq!(fx.selection.selected_cell(), Some(TablePosition::cell(3, 2)));
        assert_eq!(fx.coordinator.anchor(), Some(TablePosition::cell(1, 1)));
    }
}
