//! Tree control state.
//!
//! Items live in a [`SlotMap`] arena keyed by [`TreeItemId`]. The control
//! flattens the expanded part of the tree into a list of visible rows, and
//! that list is what selection, focus and the anchor index into. Expanding a
//! node inserts its visible descendants below it and collapsing removes
//! them, both reported as ordinary [`ListChange`]s, so row-indexed state
//! shifts exactly as it does for list insertions and removals.
//!
//! ```
//! use horizon_controls::control::TreeView;
//!
//! let mut tree = TreeView::new("root");
//! let docs = tree.push_child(tree.root(), "docs").unwrap();
//! tree.push_child(docs, "readme").unwrap();
//! tree.push_child(tree.root(), "src").unwrap();
//! assert_eq!(tree.row_count(), 3);
//!
//! tree.expand(docs);
//! assert_eq!(tree.row_count(), 4);
//! assert_eq!(tree.value(tree.item_at_row(2).unwrap()), Some(&"readme"));
//! ```

use horizon_controls_core::logging::targets;
use horizon_controls_core::{ListChange, ObservableList, Signal};
use slotmap::{SlotMap, new_key_type};

use super::{Control, ControlBase, CoordinatorLinks};
use crate::config::BehaviorConfig;
use crate::selection::{
    ListFocusModel, MultipleSelectionModel, RowSelection, SelectionCoordinator, SelectionMode, Viewport,
};

new_key_type! {
    /// Identifies one item of a [`TreeView`].
    pub struct TreeItemId;
}

struct TreeNode<T> {
    value: T,
    parent: Option<TreeItemId>,
    children: Vec<TreeItemId>,
    expanded: bool,
}

/// A tree of items shown as a list of visible rows.
pub struct TreeView<T> {
    base: ControlBase,
    nodes: SlotMap<TreeItemId, TreeNode<T>>,
    root: TreeItemId,
    show_root: bool,
    rows: ObservableList<TreeItemId>,
    selection: Option<MultipleSelectionModel>,
    focus: Option<ListFocusModel>,
    coordinator: SelectionCoordinator<usize>,
    viewport: Viewport,
    editable: bool,
    editing: Option<usize>,
    links: CoordinatorLinks,

    /// Emitted with the item and its new state when an item expands or collapses.
    pub expanded_changed: Signal<(TreeItemId, bool)>,
    /// Emitted with the row when an edit starts.
    pub edit_started: Signal<usize>,
    /// Emitted with the row when an edit is cancelled.
    pub edit_cancelled: Signal<usize>,
}

impl<T> TreeView<T> {
    /// A tree with an expanded, visible root holding `root`.
    pub fn new(root: T) -> Self {
        Self::with_config(root, &BehaviorConfig::default())
    }

    /// A tree configured by `config`.
    pub fn with_config(root: T, config: &BehaviorConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TreeNode {
            value: root,
            parent: None,
            children: Vec::new(),
            expanded: true,
        });
        let mut base = ControlBase::new();
        base.set_node_orientation(config.node_orientation());
        Self {
            base,
            nodes,
            root,
            show_root: true,
            rows: ObservableList::from_vec(vec![root]),
            selection: Some(MultipleSelectionModel::new(1)),
            focus: Some(ListFocusModel::new(1)),
            coordinator: SelectionCoordinator::new(config.history_limit),
            viewport: Viewport::new(config.page_size),
            editable: false,
            editing: None,
            links: CoordinatorLinks::default(),
            expanded_changed: Signal::new(),
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

    // =========================================================================
    // Items
    // =========================================================================

    /// The root item.
    pub fn root(&self) -> TreeItemId {
        self.root
    }

    /// The value of `id`.
    pub fn value(&self, id: TreeItemId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.value)
    }

    /// The value of `id`, mutably.
    pub fn value_mut(&mut self, id: TreeItemId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.value)
    }

    /// The parent of `id`; `None` for the root.
    pub fn parent(&self, id: TreeItemId) -> Option<TreeItemId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// The children of `id`, in order.
    pub fn children(&self, id: TreeItemId) -> &[TreeItemId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Whether `id` has no children.
    pub fn is_leaf(&self, id: TreeItemId) -> bool {
        self.children(id).is_empty()
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: TreeItemId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.expanded)
    }

    /// Number of items in the tree, shown or not.
    pub fn item_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert `value` as child `index` of `parent` (past the end appends).
    /// Returns `None` when `parent` is not in the tree.
    pub fn insert_child(&mut self, parent: TreeItemId, index: usize, value: T) -> Option<TreeItemId> {
        let index = index.min(self.nodes.get(parent)?.children.len());
        let row = self.children_visible(parent).then(|| self.row_for_child(parent, index));
        let id = self.nodes.insert(TreeNode {
            value,
            parent: Some(parent),
            children: Vec::new(),
            expanded: false,
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.insert(index, id);
        }
        if let Some(row) = row
            && let Ok(change) = self.rows.insert(row, id)
        {
            self.follow(&change);
        }
        Some(id)
    }

    /// Append `value` as the last child of `parent`.
    pub fn push_child(&mut self, parent: TreeItemId, value: T) -> Option<TreeItemId> {
        self.insert_child(parent, usize::MAX, value)
    }

    /// Remove `id` and its whole subtree, returning its value. The root
    /// cannot be removed.
    pub fn remove_item(&mut self, id: TreeItemId) -> Option<T> {
        let parent = self.nodes.get(id)?.parent?;

        if let Some(row) = self.row_of(id) {
            let count = 1 + self.visible_descendant_count(id);
            if self.rows.remove_range(row, row + count).is_ok() {
                self.follow(&ListChange::Removed { from: row, count });
            }
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != id);
        }

        let mut stack = self.children(id).to_vec();
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        self.nodes.remove(id).map(|n| n.value)
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// The visible rows, top to bottom.
    pub fn visible_rows(&self) -> &ObservableList<TreeItemId> {
        &self.rows
    }

    /// Number of visible rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The item shown at `row`.
    pub fn item_at_row(&self, row: usize) -> Option<TreeItemId> {
        self.rows.get(row).copied()
    }

    /// The row showing `id`, if it is visible.
    pub fn row_of(&self, id: TreeItemId) -> Option<usize> {
        self.rows.iter().position(|&r| r == id)
    }

    /// Depth of `id` below the root.
    pub fn level(&self, id: TreeItemId) -> usize {
        let mut level = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            level += 1;
            current = self.parent(parent);
        }
        level
    }

    /// Whether the root has a row of its own.
    pub fn shows_root(&self) -> bool {
        self.show_root
    }

    /// Show or hide the root row. Its children stay visible while it is expanded.
    pub fn set_show_root(&mut self, show: bool) {
        if self.show_root == show {
            return;
        }
        self.show_root = show;
        let mut rows = Vec::new();
        if show {
            rows.push(self.root);
        }
        self.collect_visible(self.root, &mut rows);
        let change = self.rows.set_all(rows);
        self.follow(&change);
    }

    fn children_visible(&self, id: TreeItemId) -> bool {
        self.is_expanded(id) && (self.row_of(id).is_some() || (id == self.root && !self.show_root))
    }

    fn collect_visible(&self, id: TreeItemId, out: &mut Vec<TreeItemId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.expanded {
            return;
        }
        for &child in &node.children {
            out.push(child);
            self.collect_visible(child, out);
        }
    }

    fn visible_descendant_count(&self, id: TreeItemId) -> usize {
        let mut rows = Vec::new();
        self.collect_visible(id, &mut rows);
        rows.len()
    }

    /// Row a new child at `index` of a parent showing its children lands on.
    fn row_for_child(&self, parent: TreeItemId, index: usize) -> usize {
        let start = self.row_of(parent).map_or(0, |r| r + 1);
        self.children(parent)
            .iter()
            .take(index)
            .fold(start, |row, &sibling| row + 1 + self.visible_descendant_count(sibling))
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Expand `id`. Returns whether its state changed.
    pub fn expand(&mut self, id: TreeItemId) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if !node.expanded => node.expanded = true,
            _ => return false,
        }
        if self.children_visible(id) {
            let mut shown = Vec::new();
            self.collect_visible(id, &mut shown);
            let at = self.row_of(id).map_or(0, |r| r + 1);
            if !shown.is_empty()
                && let Ok(change) = self.rows.insert_all(at, shown)
            {
                self.follow(&change);
            }
        }
        tracing::trace!(target: targets::SELECTION, item = ?id, "tree item expanded");
        self.expanded_changed.emit((id, true));
        true
    }

    /// Collapse `id`. Focus, selection and the anchor inside the hidden rows
    /// move to `id`'s row. Returns whether its state changed.
    pub fn collapse(&mut self, id: TreeItemId) -> bool {
        if !self.is_expanded(id) {
            return false;
        }
        let hidden = if self.children_visible(id) {
            self.visible_descendant_count(id)
        } else {
            0
        };
        let row = self.row_of(id);

        if let Some(row) = row
            && hidden > 0
        {
            let inside = |r: usize| r > row && r <= row + hidden;
            if let Some(focus) = self.focus.as_mut()
                && focus.focused_index().is_some_and(inside)
            {
                focus.focus(row);
            }
            if let Some(selection) = self.selection.as_mut()
                && selection.selected_indices().into_iter().any(inside)
            {
                selection.select(row);
            }
            if self.coordinator.anchor().is_some_and(inside) {
                self.coordinator.set_anchor(row);
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.expanded = false;
        }
        if hidden > 0 {
            let from = row.map_or(0, |r| r + 1);
            if self.rows.remove_range(from, from + hidden).is_ok() {
                self.follow(&ListChange::Removed { from, count: hidden });
            }
        }
        tracing::trace!(target: targets::SELECTION, item = ?id, hidden, "tree item collapsed");
        self.expanded_changed.emit((id, false));
        true
    }

    /// Expand or collapse `id`.
    pub fn toggle_expanded(&mut self, id: TreeItemId) -> bool {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand `id` and every non-leaf item below it.
    pub fn expand_all(&mut self, id: TreeItemId) {
        if self.is_leaf(id) {
            return;
        }
        self.expand(id);
        for child in self.children(id).to_vec() {
            self.expand_all(child);
        }
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

    /// Record the rows the host currently shows.
    pub fn set_viewport(&mut self, first: usize, len: usize) {
        self.viewport.set(first, len);
    }

    /// Selection gestures over the visible rows.
    pub fn rows(&mut self) -> Option<RowSelection<'_>> {
        let selection = self.selection.as_mut()?;
        let focus = self.focus.as_mut()?;
        Some(RowSelection::new(selection, focus, &self.coordinator, &mut self.viewport))
    }

    /// The focused item.
    pub fn focused_item(&self) -> Option<TreeItemId> {
        self.focus
            .as_ref()
            .and_then(|f| f.focused_index())
            .and_then(|row| self.item_at_row(row))
    }

    // =========================================================================
    // Editing
    // =========================================================================

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
    pub fn edit(&mut self, row: Option<usize>) -> bool {
        match row {
            Some(row) if self.editable && row < self.rows.len() => {
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

    pub(crate) fn connect_coordinator(&mut self) {
        if self.links.is_connected() {
            return;
        }
        self.coordinator.set_row_count(self.rows.len());
        let listener = self.coordinator.clone();
        self.links.items = Some(
            self.rows
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
    }

    pub(crate) fn disconnect_coordinator(&mut self) {
        if let Some(id) = self.links.items.take() {
            self.rows.changed().disconnect(id);
        }
        if let Some(id) = self.links.selection.take()
            && let Some(selection) = self.selection.as_ref()
        {
            selection.selection_changed.disconnect(id);
        }
    }

    /// Whether the coordinator listeners are registered.
    pub fn is_listening(&self) -> bool {
        self.links.is_connected()
    }
}

impl<T> Control for TreeView<T> {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }
}

impl<T> std::fmt::Debug for TreeView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeView")
            .field("base", &self.base)
            .field("items", &self.nodes.len())
            .field("rows", &self.rows.len())
            .field("show_root", &self.show_root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root
    /// ├── a
    /// │   ├── a1
    /// │   └── a2
    /// └── b
    fn sample() -> (TreeView<&'static str>, TreeItemId, TreeItemId) {
        let mut tree = TreeView::new("root").with_selection_mode(SelectionMode::Multiple);
        let a = tree.push_child(tree.root(), "a").unwrap();
        tree.push_child(a, "a1").unwrap();
        tree.push_child(a, "a2").unwrap();
        let b = tree.push_child(tree.root(), "b").unwrap();
        (tree, a, b)
    }

    fn labels(tree: &TreeView<&'static str>) -> Vec<&'static str> {
        tree.visible_rows().iter().map(|&id| *tree.value(id).unwrap()).collect()
    }

    #[test]
    fn test_expand_and_collapse_rows() {
        let (mut tree, a, _) = sample();
        assert_eq!(labels(&tree), vec!["root", "a", "b"]);

        assert!(tree.expand(a));
        assert!(!tree.expand(a));
        assert_eq!(labels(&tree), vec!["root", "a", "a1", "a2", "b"]);

        assert!(tree.collapse(a));
        assert_eq!(labels(&tree), vec!["root", "a", "b"]);
    }

    #[test]
    fn test_selection_shifts_on_expand() {
        let (mut tree, a, _) = sample();
        tree.connect_coordinator();
        tree.rows().unwrap().press_row(2, false, false);

        tree.expand(a);
        assert_eq!(tree.selection_model().unwrap().selected_indices(), vec![4]);
        assert_eq!(tree.coordinator().anchor(), Some(4));
    }

    #[test]
    fn test_collapse_moves_selection_to_collapsed_item() {
        let (mut tree, a, _) = sample();
        tree.connect_coordinator();
        tree.expand(a);
        tree.rows().unwrap().press_row(3, false, false);

        tree.collapse(a);
        assert_eq!(tree.selection_model().unwrap().selected_indices(), vec![1]);
        assert_eq!(tree.focus_model().unwrap().focused_index(), Some(1));
        assert_eq!(tree.coordinator().anchor(), Some(1));
    }

    #[test]
    fn test_insert_child_lands_after_sibling_subtree() {
        let (mut tree, a, _) = sample();
        tree.expand(a);
        tree.insert_child(tree.root(), 1, "between").unwrap();
        assert_eq!(labels(&tree), vec!["root", "a", "a1", "a2", "between", "b"]);

        let hidden = tree.push_child(tree.item_at_row(4).unwrap(), "hidden").unwrap();
        assert_eq!(tree.row_of(hidden), None);
    }

    #[test]
    fn test_remove_item_drops_subtree() {
        let (mut tree, a, _) = sample();
        tree.expand(a);
        assert_eq!(tree.remove_item(a), Some("a"));
        assert_eq!(labels(&tree), vec!["root", "b"]);
        assert_eq!(tree.item_count(), 2);
        assert_eq!(tree.remove_item(tree.root()), None);
    }

    #[test]
    fn test_hidden_root() {
        let (mut tree, a, _) = sample();
        tree.set_show_root(false);
        assert_eq!(labels(&tree), vec!["a", "b"]);
        tree.expand(a);
        assert_eq!(labels(&tree), vec!["a", "a1", "a2", "b"]);
        assert_eq!(tree.level(tree.item_at_row(1).unwrap()), 2);
    }

    #[test]
    fn test_expand_all() {
        let (mut tree, a, _) = sample();
        let a1 = tree.children(a)[0];
        tree.push_child(a1, "deep").unwrap();
        tree.expand_all(tree.root());
        assert_eq!(labels(&tree), vec!["root", "a", "a1", "deep", "a2", "b"]);
    }
}
