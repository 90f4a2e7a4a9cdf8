//! Row actions shared by lists and trees, and the list behavior.

use horizon_controls_core::logging::targets;

use super::action::Action;
use super::kind::ControlKind;
use super::Actionable;
use crate::control::{Control, ListView, Orientation};
use crate::input::{Direction, InputEvent, MouseButton};
use crate::selection::RowSelection;

/// A control whose selection is a list of rows.
pub(crate) trait RowControl: Control {
    fn row_selection(&mut self) -> Option<RowSelection<'_>>;

    /// Start editing `row`. Returns whether an edit started.
    fn begin_edit(&mut self, row: usize) -> bool;

    /// Cancel the current edit. Returns whether one was in progress.
    fn cancel_edit(&mut self) -> bool;
}

pub(crate) fn traversal_direction(action: Action) -> Option<Direction> {
    match action {
        Action::TraverseNext => Some(Direction::Next),
        Action::TraversePrevious => Some(Direction::Previous),
        Action::TraverseUp => Some(Direction::Up),
        Action::TraverseDown => Some(Direction::Down),
        Action::TraverseLeft => Some(Direction::Left),
        Action::TraverseRight => Some(Direction::Right),
        _ => None,
    }
}

/// Run a row action. Actions outside the row vocabulary are ignored.
pub(crate) fn perform_row_action<C: RowControl>(control: &mut C, action: Action, event: &mut InputEvent) {
    if let Some(direction) = traversal_direction(action) {
        control.control_base().traverse(direction);
        return;
    }
    match action {
        Action::Activate => return activate(control, event),
        Action::CancelEdit => {
            if control.cancel_edit() {
                event.consume();
            }
            return;
        }
        Action::PointerPress => return press(control, event),
        _ => {}
    }

    let Some(mut rows) = control.row_selection() else {
        tracing::trace!(target: targets::BEHAVIOR, %action, "no selection or focus model");
        return;
    };
    match action {
        Action::SelectFirstRow => rows.select_first_row(),
        Action::SelectLastRow => rows.select_last_row(),
        Action::SelectPreviousRow => rows.select_previous_row(),
        Action::SelectNextRow => rows.select_next_row(),
        Action::ScrollPageUp => rows.scroll_page_up(),
        Action::ScrollPageDown => rows.scroll_page_down(),
        Action::AlsoSelectPrevious => rows.also_select_previous(),
        Action::AlsoSelectNext => rows.also_select_next(),
        Action::SelectAllToFirstRow => rows.select_all_to_first_row(),
        Action::SelectAllToLastRow => rows.select_all_to_last_row(),
        Action::SelectAllPageUp => rows.select_all_page_up(),
        Action::SelectAllPageDown => rows.select_all_page_down(),
        Action::SelectAllToFocus => rows.select_all_to_focus(false),
        Action::SelectAllToFocusAndSetAnchor => rows.select_all_to_focus(true),
        Action::SelectAll => rows.select_all(),
        Action::FocusFirstRow => rows.focus_first_row(),
        Action::FocusLastRow => rows.focus_last_row(),
        Action::FocusPreviousRow => rows.focus_previous_row(),
        Action::FocusNextRow => rows.focus_next_row(),
        Action::FocusPageUp => rows.focus_page_up(),
        Action::FocusPageDown => rows.focus_page_down(),
        Action::DiscontinuousSelectPreviousRow => rows.discontinuous_select_previous_row(),
        Action::DiscontinuousSelectNextRow => rows.discontinuous_select_next_row(),
        Action::DiscontinuousSelectPageUp => rows.discontinuous_select_page_up(),
        Action::DiscontinuousSelectPageDown => rows.discontinuous_select_page_down(),
        Action::DiscontinuousSelectAllToFirstRow => rows.discontinuous_select_all_to_first_row(),
        Action::DiscontinuousSelectAllToLastRow => rows.discontinuous_select_all_to_last_row(),
        Action::ToggleFocusOwnerSelection => rows.toggle_focus_owner_selection(),
        _ => {}
    }
}

fn activate<C: RowControl>(control: &mut C, event: &mut InputEvent) {
    let focused = control.row_selection().and_then(|mut rows| rows.select_focused());
    if let Some(row) = focused
        && control.begin_edit(row)
    {
        event.consume();
    }
}

fn press<C: RowControl>(control: &mut C, event: &mut InputEvent) {
    let base = control.control_base();
    if !base.is_focused() {
        base.request_focus();
    }
    let Some(row) = event.target().row() else {
        return;
    };
    let button = event.button();
    let shift = event.is_shift_down();
    let shortcut = event.is_shortcut_down();
    let Some(mut rows) = control.row_selection() else {
        return;
    };

    match button {
        Some(MouseButton::Secondary) if rows.is_selected(row) => return,
        Some(MouseButton::Primary | MouseButton::Secondary) => rows.press_row(row, shift, shortcut),
        _ => return,
    }

    if button == Some(MouseButton::Primary) && event.click_count() == 2 && !shift && !shortcut {
        control.begin_edit(row);
    }
}

// =============================================================================
// ListView
// =============================================================================

impl<T: 'static> RowControl for ListView<T> {
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

impl<T: 'static> Actionable for ListView<T> {
    const KIND: ControlKind = ControlKind::List;

    fn orientation(&self) -> Orientation {
        ListView::orientation(self)
    }

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
        perform_row_action(self, action, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::control::NodeOrientation;
    use crate::input::{HitTarget, Key, KeyboardModifiers};
    use crate::selection::SelectionMode;

    fn list() -> (ListView<&'static str>, Behavior<ListView<&'static str>>) {
        let mut list = ListView::new(vec!["a", "b", "c", "d"]).with_selection_mode(SelectionMode::Multiple);
        let behavior = Behavior::new(&mut list);
        (list, behavior)
    }

    fn key(key: Key, modifiers: KeyboardModifiers) -> InputEvent {
        InputEvent::key_pressed(key, modifiers)
    }

    fn selected(list: &ListView<&'static str>) -> Vec<usize> {
        list.selection_model().unwrap().selected_indices()
    }

    #[test]
    fn test_enter_consumed_only_when_edit_starts() {
        let (mut list, behavior) = list();
        list.rows().unwrap().press_row(1, false, false);

        let mut enter = key(Key::Enter, KeyboardModifiers::NONE);
        assert!(!behavior.handle_event(&mut list, &mut enter));

        list.set_editable(true);
        let mut enter = key(Key::Enter, KeyboardModifiers::NONE);
        assert!(behavior.handle_event(&mut list, &mut enter));
        assert_eq!(list.editing_index(), Some(1));

        let mut escape = key(Key::Escape, KeyboardModifiers::NONE);
        assert!(behavior.handle_event(&mut list, &mut escape));
        let mut escape = key(Key::Escape, KeyboardModifiers::NONE);
        assert!(!behavior.handle_event(&mut list, &mut escape));
    }

    #[test]
    fn test_orientation_scopes() {
        let (mut list, behavior) = list();
        list.rows().unwrap().press_row(1, false, false);

        let mut right = key(Key::ArrowRight, KeyboardModifiers::NONE);
        assert!(!behavior.handle_event(&mut list, &mut right));

        list.set_orientation(Orientation::Horizontal);
        let mut right = key(Key::ArrowRight, KeyboardModifiers::NONE);
        assert!(behavior.handle_event(&mut list, &mut right));
        assert_eq!(selected(&list), vec![2]);

        let mut down = key(Key::ArrowDown, KeyboardModifiers::NONE);
        assert!(!behavior.handle_event(&mut list, &mut down));
    }

    #[test]
    fn test_horizontal_list_mirrors_in_rtl() {
        let (mut list, behavior) = list();
        list.set_orientation(Orientation::Horizontal);
        list.set_node_orientation(NodeOrientation::RightToLeft);
        list.rows().unwrap().press_row(1, false, false);

        let mut right = key(Key::ArrowRight, KeyboardModifiers::NONE);
        assert!(behavior.handle_event(&mut list, &mut right));
        assert_eq!(selected(&list), vec![0]);
    }

    #[test]
    fn test_secondary_press_on_selection_keeps_it() {
        let (mut list, behavior) = list();
        list.rows().unwrap().select_all();

        let mut press = InputEvent::mouse(crate::input::EventKind::MousePressed, MouseButton::Secondary, HitTarget::Row(2));
        assert!(behavior.handle_event(&mut list, &mut press));
        assert_eq!(selected(&list), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_double_click_edits() {
        let (mut list, behavior) = list();
        list.set_editable(true);
        let mut press = InputEvent::mouse_pressed(HitTarget::Row(3), KeyboardModifiers::NONE).with_click_count(2);
        behavior.handle_event(&mut list, &mut press);
        assert_eq!(selected(&list), vec![3]);
        assert_eq!(list.editing_index(), Some(3));
        assert!(list.control_base().is_focused());
    }
}
