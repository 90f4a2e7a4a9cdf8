//! Tree behavior: row actions plus expansion.

use super::action::Action;
use super::kind::ControlKind;
use super::list::{RowControl, perform_row_action};
use super::Actionable;
use crate::control::{Control, TreeItemId, TreeView};
use crate::input::{HitTarget, InputEvent};
use crate::selection::RowSelection;

impl<T: 'static> RowControl for TreeView<T> {
    fn row_selection(&mut self) -> Option<RowSelection<'_>> {
        self.rows()
    }

    fn begin_edit(&mut self, row: usize) -> bool {
        self.edit(Some(row))
    }

    fn cancel_edit(&mut self) -> bool {
        let editing = self.editing_index().is_some();
        self.edit(None);
        editing
    }
}

impl<T: 'static> TreeView<T> {
    fn select_item(&mut self, id: TreeItemId) {
        if let Some(row) = self.row_of(id)
            && let Some(mut rows) = self.rows()
        {
            rows.clear_and_select(row);
        }
    }

    /// Right: expand a collapsed branch, or step into an expanded one.
    fn expand_focused(&mut self) {
        let Some(id) = self.focused_item() else {
            return;
        };
        if self.is_leaf(id) {
            return;
        }
        if !self.is_expanded(id) {
            self.expand(id);
        } else if let Some(&first) = self.children(id).first() {
            self.select_item(first);
        }
    }

    /// Left: collapse an expanded branch, or step out to the parent.
    fn collapse_focused(&mut self) {
        let Some(id) = self.focused_item() else {
            return;
        };
        if self.is_expanded(id) && !self.is_leaf(id) {
            self.collapse(id);
        } else if let Some(parent) = self.parent(id) {
            self.select_item(parent);
        }
    }
}

impl<T: 'static> Actionable for TreeView<T> {
    const KIND: ControlKind = ControlKind::Tree;

    fn filter_event(&mut self, event: &InputEvent) {
        self.coordinator().track_modifiers(event);
    }

    fn connect_listeners(&mut self) {
        self.connect_coordinator();
    }

    fn disconnect_listeners(&mut self) {
        self.disconnect_coordinator();
    }

    fn perform(&mut self, action: Action, event: &mut InputEvent) {
        match action {
            Action::ExpandRow => self.expand_focused(),
            Action::CollapseRow => self.collapse_focused(),
            Action::ExpandAll => {
                if let Some(id) = self.focused_item() {
                    self.expand_all(id);
                }
            }
            Action::PointerPress => {
                if let HitTarget::Disclosure(row) = event.target() {
                    if let Some(id) = self.item_at_row(row) {
                        self.toggle_expanded(id);
                    }
                    let base = self.control_base();
                    if !base.is_focused() {
                        base.request_focus();
                    }
                    event.consume();
                } else {
                    perform_row_action(self, action, event);
                }
            }
            _ => perform_row_action(self, action, event),
        }
    }
}
