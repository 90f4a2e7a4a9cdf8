//! List control state.
//!
//! # Example
//!
//! ```
//! use horizon_controls::control::ListView;
//! use horizon_controls::selection::SelectionMode;
//!
//! let mut list = ListView::new(vec!["a", "b", "c"]).with_selection_mode(SelectionMode::Multiple);
//! list.rows().unwrap().press_row(2, false, false);
//! list.insert_item(0, "z");
//!
//! assert_eq!(list.selection_model().unwrap().selected_indices(), vec![3]);
//! ```

use horizon_controls_core::logging::targets;
use horizon_controls_core::{ListChange, ObservableList, Signal};

use super::{Control, ControlBase, CoordinatorLinks, NodeOrientation, Orientation};
use crate::config::BehaviorConfig;
use crate::selection::{
    ListFocusModel, MultipleSelectionModel, RowSelection, SelectionCoordinator, SelectionMode, Viewport,
};

/// A vertical or horizontal list of items with row selection.
pub struct ListView<T> {
    base: ControlBase,
    items: ObservableList<T>,
    selection: Option<MultipleSelectionModel>,
    focus: Option<ListFocusModel>,
    coordinator: SelectionCoordinator<usize>,
    viewport: Viewport,
    orientation: Orientation,
    editable: bool,
    editing: Option<usize>,
    links: CoordinatorLinks,

    /// Emitted with the row when an edit starts.
    pub edit_started: Signal<usize>,
    /// Emitted with the row when an edit is cancelled.
    pub edit_cancelled: Signal<usize>,
}

impl<T> ListView<T> {
    /// A list over `items` with default configuration.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_config(items, &BehaviorConfig::default())
    }

    /// A list over `items` configured by `config`.
    pub fn with_config(items: Vec<T>, config: &BehaviorConfig) -> Self {
        let len = items.len();
        let mut base = ControlBase::new();
        base.set_node_orientation(config.node_orientation());
        Self {
            base,
            items: ObservableList::from_vec(items),
            selection: Some(MultipleSelectionModel::new(len)),
            focus: Some(ListFocusModel::new(len)),
            coordinator: SelectionCoordinator::new(config.history_limit),
            viewport: Viewport::new(config.page_size),
            orientation: Orientation::Vertical,
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

    /// Builder-style orientation setter.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// The items.
    pub fn items(&self) -> &ObservableList<T> {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item.
    pub fn push_item(&mut self, item: T) {
        let change = self.items.push(item);
        self.follow(&change);
    }

    /// Insert an item; an index past the end appends.
    pub fn insert_item(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        if let Ok(change) = self.items.insert(index, item) {
            self.follow(&change);
        }
    }

    /// Remove and return the item at `index`.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        let item = self.items.remove(index).ok()?;
        self.follow(&ListChange::Removed { from: index, count: 1 });
        Some(item)
    }

    /// Remove every item.
    pub fn clear_items(&mut self) {
        let change = self.items.clear();
        self.follow(&change);
    }

    /// Stable-sort the items; selection and focus stay with their items.
    pub fn sort_items_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let change = self.items.sort_by(compare);
        self.follow(&change);
    }

    fn follow(&mut self, change: &ListChange) {
        if let Some(selection) = self.selection.as_mut() {
            selection.handle_items_change(change);
        }
        if let Some(focus) = self.focus.as_mut() {
            focus.handle_items_change(change);
        }
        if let Some(row) = self.editing {
            match change.map_index(row) {
                Some(moved) => self.editing = Some(moved),
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
    pub fn selection_model(&self) -> Option<&MultipleSelectionModel> {
        self.selection.as_ref()
    }

    /// The selection model, mutably.
    pub fn selection_model_mut(&mut self) -> Option<&mut MultipleSelectionModel> {
        self.selection.as_mut()
    }

    /// Replace the selection model. Listeners move to the new model.
    pub fn set_selection_model(&mut self, selection: Option<MultipleSelectionModel>) {
        let listening = self.links.is_connected();
        if listening {
            self.disconnect_coordinator();
        }
        self.selection = selection;
        if listening {
            self.connect_coordinator();
        }
    }

    /// The focus model, if any.
    pub fn focus_model(&self) -> Option<&ListFocusModel> {
        self.focus.as_ref()
    }

    /// Replace the focus model.
    pub fn set_focus_model(&mut self, focus: Option<ListFocusModel>) {
        self.focus = focus;
    }

    /// The anchor/modifier coordinator.
    pub fn coordinator(&self) -> &SelectionCoordinator<usize> {
        &self.coordinator
    }

    /// Rows the host currently shows.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record the rows the host currently shows.
    pub fn set_viewport(&mut self, first: usize, len: usize) {
        self.viewport.set(first, len);
    }

    /// Selection gestures over this list, or `None` without both models.
    pub fn rows(&mut self) -> Option<RowSelection<'_>> {
        let selection = self.selection.as_mut()?;
        let focus = self.focus.as_mut()?;
        Some(RowSelection::new(selection, focus, &self.coordinator, &mut self.viewport))
    }

    // =========================================================================
    // Orientation and editing
    // =========================================================================

    /// Row layout direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the row layout direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Set left-to-right or right-to-left content.
    pub fn set_node_orientation(&mut self, orientation: NodeOrientation) {
        self.base.set_node_orientation(orientation);
    }

    /// Whether rows may be edited.
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

    /// The row being edited.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    /// Start editing `row`, or cancel the current edit with `None`.
    /// Returns whether an edit started.
    pub fn edit(&mut self, row: Option<usize>) -> bool {
        match row {
            Some(row) if self.editable && row < self.items.len() => {
                self.editing = Some(row);
                self.edit_started.emit(row);
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

    /// Keep the coordinator in step with the items and the selection.
    pub(crate) fn connect_coordinator(&mut self) {
        if self.links.is_connected() {
            return;
        }
        self.coordinator.set_row_count(self.items.len());
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
                    .selection_changed
                    .connect(move |change| listener.on_selection_changed(change)),
            );
        }
        tracing::trace!(target: targets::SELECTION, control = ?self.base.id(), "coordinator connected");
    }

    /// Remove the listeners added by [`connect_coordinator`](Self::connect_coordinator).
    pub(crate) fn disconnect_coordinator(&mut self) {
        if let Some(id) = self.links.items.take() {
            self.items.changed().disconnect(id);
        }
        if let Some(id) = self.links.selection.take()
            && let Some(selection) = self.selection.as_ref()
        {
            selection.selection_changed.disconnect(id);
        }
        tracing::trace!(target: targets::SELECTION, control = ?self.base.id(), "coordinator disconnected");
    }

    /// Whether the coordinator listeners are registered.
    pub fn is_listening(&self) -> bool {
        self.links.is_connected()
    }
}

impl<T: PartialEq> ListView<T> {
    /// Replace every item. Selection and focus follow items that survive.
    pub fn set_items(&mut self, items: Vec<T>) {
        let change = self.items.set_all(items);
        self.follow(&change);
    }
}

impl<T> Control for ListView<T> {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }
}

impl<T> std::fmt::Debug for ListView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("base", &self.base)
            .field("len", &self.items.len())
            .field("orientation", &self.orientation)
            .field("editable", &self.editable)
            .field("editing", &self.editing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AnchorState;

    fn list(len: usize) -> ListView<usize> {
        ListView::new((0..len).collect()).with_selection_mode(SelectionMode::Multiple)
    }

    #[test]
    fn test_selection_follows_insert_and_remove() {
        let mut list = list(5);
        list.rows().unwrap().press_row(2, false, false);

        list.insert_item(0, 99);
        assert_eq!(list.selection_model().unwrap().selected_indices(), vec![3]);
        assert_eq!(list.focus_model().unwrap().focused_index(), Some(3));

        list.remove_item(0);
        assert_eq!(list.selection_model().unwrap().selected_indices(), vec![2]);
    }

    #[test]
    fn test_anchor_follows_items_only_while_connected() {
        let mut list = list(5);
        list.connect_coordinator();
        list.rows().unwrap().press_row(2, false, false);

        list.insert_item(0, 99);
        assert_eq!(list.coordinator().anchor_state(), AnchorState::Explicit(3));

        list.disconnect_coordinator();
        assert!(!list.is_listening());
        list.insert_item(0, 98);
        assert_eq!(list.coordinator().anchor(), Some(3));
    }

    #[test]
    fn test_set_items_keeps_surviving_selection() {
        let mut list = ListView::new(vec!["a", "b", "c"]);
        list.connect_coordinator();
        list.rows().unwrap().press_row(1, false, false);

        list.set_items(vec!["x", "b"]);
        assert_eq!(list.selection_model().unwrap().selected_indices(), vec![1]);
        assert_eq!(list.coordinator().anchor(), Some(1));

        list.set_items(vec!["y"]);
        assert!(list.selection_model().unwrap().is_empty());
        assert_eq!(list.coordinator().anchor(), None);
    }

    #[test]
    fn test_missing_models_disable_gestures() {
        let mut list = list(3);
        list.set_selection_model(None);
        assert!(list.rows().is_none());
    }

    #[test]
    fn test_edit_requires_editable_and_cancels_on_removal() {
        let mut list = list(3);
        assert!(!list.edit(Some(1)));

        list.set_editable(true);
        assert!(list.edit(Some(1)));
        assert_eq!(list.editing_index(), Some(1));

        list.remove_item(1);
        assert_eq!(list.editing_index(), None);
    }
}
