//! Table control state: rows of items shown across columns, selected by row
//! or, in cell selection mode, by cell.

use horizon_controls_core::logging::targets;
use horizon_controls_core::{ListChange, ObservableList, Signal};

use super::{Control, ControlBase, CoordinatorLinks};
use crate::config::BehaviorConfig;
use crate::selection::{
    CellSelection, SelectionCoordinator, SelectionMode, TableFocusModel, TablePosition, TableSelectionModel,
    Viewport,
};

/// A table column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    title: String,
    editable: bool,
}

impl TableColumn {
    /// An editable column titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            editable: true,
        }
    }

    /// Builder-style editability setter.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// The column title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether cells of this column may be edited (when the table allows it).
    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

/// A table of items with row or cell selection.
pub struct TableView<T> {
    base: ControlBase,
    items: ObservableList<T>,
    columns: Vec<TableColumn>,
    selection: Option<TableSelectionModel>,
    focus: Option<TableFocusModel>,
    coordinator: SelectionCoordinator<TablePosition>,
    viewport: Viewport,
    editable: bool,
    editing: Option<TablePosition>,
    links: CoordinatorLinks,

    /// Emitted with the cell when an edit starts.
    pub edit_started: Signal<TablePosition>,
    /// Emitted with the cell when an edit is cancelled.
    pub edit_cancelled: Signal<TablePosition>,
}

impl<T> TableView<T> {
    /// A table over `items` with `columns` and default configuration.
    pub fn new(items: Vec<T>, columns: Vec<TableColumn>) -> Self {
        Self::with_config(items, columns, &BehaviorConfig::default())
    }

    /// A table configured by `config`.
    pub fn with_config(items: Vec<T>, columns: Vec<TableColumn>, config: &BehaviorConfig) -> Self {
        let rows = items.len();
        let mut base = ControlBase::new();
        base.set_node_orientation(config.node_orientation());
        Self {
            base,
            items: ObservableList::from_vec(items),
            selection: Some(TableSelectionModel::new(rows, columns.len())),
            focus: Some(TableFocusModel::new(rows)),
            columns,
            coordinator: SelectionCoordinator::new(config.history_limit),
            viewport: Viewport::new(config.page_size),
            editable: false,
            editing: None,
            links: CoordinatorLinks::default(),
            edit_started: Signal::new(),
            edit_cancelled: Signal::new(),
        }
    }

    /// Builder-style selection mode setter.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        if let Some(selection) = self.selection.as_mut() {
            selection.set_selection_mode(mode);
        }
        self
    }

    /// Builder-style cell selection setter.
    pub fn with_cell_selection(mut self, enabled: bool) -> Self {
        self.set_cell_selection_enabled(enabled);
        self
    }

    // =========================================================================
    // Items and columns
    // =========================================================================

    /// The items.
    pub fn items(&self) -> &ObservableList<T> {
        &self.items
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a row.
    pub fn push_item(&mut self, item: T) {
        let change = self.items.push(item);
        self.follow(&change);
    }

    /// Insert a row; an index past the end appends.
    pub fn insert_item(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        if let Ok(change) = self.items.insert(index, item) {
            self.follow(&change);
        }
    }

    /// Remove and return the row at `index`.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        let item = self.items.remove(index).ok()?;
        self.follow(&ListChange::Removed { from: index, count: 1 });
        Some(item)
    }

    /// Stable-sort the rows; selection and focus stay with their items.
    pub fn sort_items_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let change = self.items.sort_by(compare);
        self.follow(&change);
    }

    /// The columns.
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Append a column.
    pub fn push_column(&mut self, column: TableColumn) {
        self.columns.push(column);
        if let Some(selection) = self.selection.as_mut() {
            selection.set_column_count(self.columns.len());
        }
    }

    /// Remove and return the column at `index`. Cells in dropped columns
    /// are deselected.
    pub fn remove_column(&mut self, index: usize) -> Option<TableColumn> {
        if index >= self.columns.len() {
            return None;
        }
        let column = self.columns.remove(index);
        if let Some(selection) = self.selection.as_mut() {
            selection.set_column_count(self.columns.len());
        }
        if self.editing.is_some_and(|p| p.column.is_some_and(|c| c >= self.columns.len())) {
            self.edit(None);
        }
        Some(column)
    }

    fn follow(&mut self, change: &ListChange) {
        if let Some(selection) = self.selection.as_mut() {
            selection.handle_items_change(change);
        }
        if let Some(focus) = self.focus.as_mut() {
            focus.handle_items_change(change);
        }
        if let Some(cell) = self.editing {
            match change.map_index(cell.row) {
                Some(row) => self.editing = Some(TablePosition { row, ..cell }),
                None => {
                    self.edit(None);
                }
            }
        }
    }

    // =========================================================================
    // Models
    // =========================================================================

    /// The selection model, if any.
    pub fn selection_model(&self) -> Option<&TableSelectionModel> {
        self.selection.as_ref()
    }

    /// The selection model, mutably.
    pub fn selection_model_mut(&mut self) -> Option<&mut TableSelectionModel> {
        self.selection.as_mut()
    }

    /// Replace the selection model. Listeners move to the new model.
    pub fn set_selection_model(&mut self, selection: Option<TableSelectionModel>) {
        let listening = self.links.is_connected();
        if listening {
            self.disconnect_coordinator();
        }
        self.selection = selection;
        if let Some(selection) = self.selection.as_ref() {
            self.coordinator
                .set_cell_selection(selection.is_cell_selection_enabled());
        }
        if listening {
            self.connect_coordinator();
        }
    }

    /// Whether cells rather than rows are selected.
    pub fn is_cell_selection_enabled(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|s| s.is_cell_selection_enabled())
    }

    /// Switch between row and cell selection.
    pub fn set_cell_selection_enabled(&mut self, enabled: bool) {
        if let Some(selection) = self.selection.as_mut() {
            selection.set_cell_selection_enabled(enabled);
        }
        self.coordinator.set_cell_selection(enabled);
    }

    /// The focus model, if any.
    pub fn focus_model(&self) -> Option<&TableFocusModel> {
        self.focus.as_ref()
    }

    /// Replace the focus model.
    pub fn set_focus_model(&mut self, focus: Option<TableFocusModel>) {
        self.focus = focus;
    }

    /// The anchor/modifier coordinator.
    pub fn coordinator(&self) -> &SelectionCoordinator<TablePosition> {
        &self.coordinator
    }

    /// Record the rows the host currently shows.
    pub fn set_viewport(&mut self, first: usize, len: usize) {
        self.viewport.set(first, len);
    }

    /// Selection gestures over this table, or `None` without both models.
    pub fn cells(&mut self) -> Option<CellSelection<'_>> {
        let selection = self.selection.as_mut()?;
        let focus = self.focus.as_mut()?;
        Some(CellSelection::new(selection, focus, &self.coordinator, &mut self.viewport))
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Whether the table allows editing.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Allow or forbid editing.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.edit(None);
        }
    }

    /// The cell being edited.
    pub fn editing_cell(&self) -> Option<TablePosition> {
        self.editing
    }

    /// Whether `cell` can be edited: the table and its column must allow it.
    pub fn is_cell_editable(&self, cell: TablePosition) -> bool {
        self.editable
            && cell.row < self.items.len()
            && cell
                .column
                .and_then(|c| self.columns.get(c))
                .is_some_and(TableColumn::is_editable)
    }

    /// Start editing `cell`, or cancel the current edit with `None`.
    /// Returns whether an edit started.
    pub fn edit(&mut self, cell: Option<TablePosition>) -> bool {
        match cell {
            Some(cell) if self.is_cell_editable(cell) => {
                self.editing = Some(cell);
                self.edit_started.emit(cell);
                true
            }
            Some(_) => false,
            None => {
                if let Some(previous) = self.editing.take() {
                    self.edit_cancelled.emit(previous);
                }
                false
            }
        }
    }

    // =========================================================================
    // Coordinator listeners
    // =========================================================================

    pub(crate) fn connect_coordinator(&mut self) {
        if self.links.is_connected() {
            return;
        }
        self.coordinator.set_row_count(self.items.len());
        self.coordinator
            .set_cell_selection(self.is_cell_selection_enabled());
        let listener = self.coordinator.clone();
        self.links.items = Some(
            self.items
                .changed()
                .connect(move |change: &ListChange| listener.on_items_changed(change)),
        );
        if let Some(selection) = self.selection.as_ref() {
            let listener = self.coordinator.clone();
            self.links.selection = Some(
                selection
                    .selection_changed()
                    .connect(move |change| listener.on_selection_changed(change)),
            );
        }
        tracing::trace!(target: targets::SELECTION, control = ?self.base.id(), "coordinator connected");
    }

    pub(crate) fn disconnect_coordinator(&mut self) {
        if let Some(id) = self.links.items.take() {
            self.items.changed().disconnect(id);
        }
        if let Some(id) = self.links.selection.take()
            && let Some(selection) = self.selection.as_ref()
        {
            selection.selection_changed().disconnect(id);
        }
    }

    /// Whether the coordinator listeners are registered.
    pub fn is_listening(&self) -> bool {
        self.links.is_connected()
    }
}

impl<T> Control for TableView<T> {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }
}

impl<T> std::fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("base", &self.base)
            .field("rows", &self.items.len())
            .field("columns", &self.columns)
            .field("editable", &self.editable)
            .field("editing", &self.editing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableView<u32> {
        TableView::new(
            (0..6).collect(),
            vec![
                TableColumn::new("id").with_editable(false),
                TableColumn::new("name"),
                TableColumn::new("size"),
            ],
        )
        .with_selection_mode(SelectionMode::Multiple)
        .with_cell_selection(true)
    }

    #[test]
    fn test_cell_edit_requires_editable_column() {
        let mut table = table();
        table.set_editable(true);
        assert!(!table.edit(Some(TablePosition::cell(1, 0))));
        assert!(!table.edit(Some(TablePosition::whole_row(1))));
        assert!(table.edit(Some(TablePosition::cell(1, 1))));
        assert_eq!(table.editing_cell(), Some(TablePosition::cell(1, 1)));
    }

    #[test]
    fn test_cell_selection_follows_rows() {
        let mut table = table();
        table.connect_coordinator();
        table.cells().unwrap().press_cell(2, Some(1), false, false);

        table.insert_item(0, 100);
        assert_eq!(
            table.selection_model().unwrap().selected_cells(),
            vec![TablePosition::cell(3, 1)]
        );
        assert_eq!(table.coordinator().anchor(), Some(TablePosition::cell(3, 1)));
    }

    #[test]
    fn test_remove_column_drops_cells() {
        let mut table = table();
        table.cells().unwrap().press_cell(0, Some(2), false, false);
        table.remove_column(2);
        assert!(table.selection_model().unwrap().is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_cell_mode_reaches_coordinator() {
        let mut table = table();
        table.set_cell_selection_enabled(false);
        table.connect_coordinator();
        table.cells().unwrap().press_cell(1, Some(2), false, false);
        assert_eq!(
            table.selection_model().unwrap().selected_cells(),
            vec![TablePosition::whole_row(1)]
        );
    }
}
