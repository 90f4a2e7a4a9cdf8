//! Table behavior: row and cell actions.
//!
//! Plain arrows first try to move the selection. When the selection cannot
//! move (last row, first or last column) the event stays unconsumed and
//! falls through to the root map's directional traversal. Up on the first
//! row reselects the focused cell instead.

use super::action::Action;
use super::kind::ControlKind;
use super::list::traversal_direction;
use super::Actionable;
use crate::control::{Control, TableView};
use crate::input::{HitTarget, InputEvent, MouseButton};
use crate::selection::{CellSelection, TablePosition};

fn perform_cell_action(cells: &mut CellSelection<'_>, action: Action) {
    match action {
        Action::SelectFirstRow => cells.select_first_row(),
        Action::SelectLastRow => cells.select_last_row(),
        Action::ScrollPageUp => cells.scroll_page_up(),
        Action::ScrollPageDown => cells.scroll_page_down(),
        Action::AlsoSelectPrevious => cells.also_select_previous(),
        Action::AlsoSelectNext => cells.also_select_next(),
        Action::AlsoSelectLeftCell => cells.also_select_left_cell(),
        Action::AlsoSelectRightCell => cells.also_select_right_cell(),
        Action::SelectAllToFirstRow => cells.select_all_to_first_row(),
        Action::SelectAllToLastRow => cells.select_all_to_last_row(),
        Action::SelectAllPageUp => cells.select_all_page_up(),
        Action::SelectAllPageDown => cells.select_all_page_down(),
        Action::SelectAllToFocus => cells.select_all_to_focus(false),
        Action::SelectAllToFocusAndSetAnchor => cells.select_all_to_focus(true),
        Action::SelectAll => cells.select_all(),
        Action::FocusFirstRow => cells.focus_first_row(),
        Action::FocusLastRow => cells.focus_last_row(),
        Action::FocusPreviousRow => cells.focus_previous_row(),
        Action::FocusNextRow => cells.focus_next_row(),
        Action::FocusLeftCell => cells.focus_left_cell(),
        Action::FocusRightCell => cells.focus_right_cell(),
        Action::FocusPageUp => cells.focus_page_up(),
        Action::FocusPageDown => cells.focus_page_down(),
        Action::DiscontinuousSelectPreviousRow => cells.discontinuous_select_previous_row(),
        Action::DiscontinuousSelectNextRow => cells.discontinuous_select_next_row(),
        Action::DiscontinuousSelectPreviousColumn => cells.discontinuous_select_previous_column(),
        Action::DiscontinuousSelectNextColumn => cells.discontinuous_select_next_column(),
        Action::DiscontinuousSelectPageUp => cells.discontinuous_select_page_up(),
        Action::DiscontinuousSelectPageDown => cells.discontinuous_select_page_down(),
        Action::DiscontinuousSelectAllToFirstRow => cells.discontinuous_select_all_to_first_row(),
        Action::DiscontinuousSelectAllToLastRow => cells.discontinuous_select_all_to_last_row(),
        Action::ToggleFocusOwnerSelection => cells.toggle_focus_owner_selection(),
        _ => {}
    }
}

impl<T: 'static> TableView<T> {
    fn activate(&mut self, event: &mut InputEvent) {
        let focused = self.cells().and_then(|mut cells| cells.select_focused());
        if let Some(cell) = focused
            && self.edit(Some(cell))
        {
            event.consume();
        }
    }

    fn press(&mut self, event: &mut InputEvent) {
        let base = self.control_base();
        if !base.is_focused() {
            base.request_focus();
        }
        let (row, column) = match event.target() {
            HitTarget::Cell { row, column } => (row, Some(column)),
            HitTarget::Row(row) => (row, None),
            HitTarget::Control | HitTarget::Disclosure(_) => return,
        };
        let button = event.button();
        let shift = event.is_shift_down();
        let shortcut = event.is_shortcut_down();
        let Some(mut cells) = self.cells() else {
            return;
        };

        match button {
            Some(MouseButton::Secondary) if cells.is_selected(row, column) => return,
            Some(MouseButton::Primary | MouseButton::Secondary) => cells.press_cell(row, column, shift, shortcut),
            _ => return,
        }

        if button == Some(MouseButton::Primary)
            && event.click_count() == 2
            && !shift
            && !shortcut
            && let Some(column) = column
        {
            self.edit(Some(TablePosition::cell(row, column)));
        }
    }
}

impl<T: 'static> Actionable for TableView<T> {
    const KIND: ControlKind = ControlKind::Table;

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
        if let Some(direction) = traversal_direction(action) {
            self.control_base().traverse(direction);
            return;
        }
        match action {
            Action::Activate => return self.activate(event),
            Action::CancelEdit => {
                if self.editing_cell().is_some() {
                    self.edit(None);
                    event.consume();
                }
                return;
            }
            Action::PointerPress => return self.press(event),
            _ => {}
        }

        let Some(mut cells) = self.cells() else {
            return;
        };
        let moved = match action {
            Action::SelectPreviousRow => cells.select_previous_row(),
            Action::SelectNextRow => cells.select_next_row(),
            Action::SelectLeftCell => cells.select_left_cell(),
            Action::SelectRightCell => cells.select_right_cell(),
            other => {
                perform_cell_action(&mut cells, other);
                false
            }
        };
        if moved {
            event.consume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::control::{ControlId, NodeOrientation, TableColumn};
    use crate::input::{Direction, FocusHost, Key, KeyboardModifiers};
    use crate::selection::SelectionMode;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Host(Mutex<Vec<Direction>>);

    impl FocusHost for Host {
        fn traverse(&self, _from: ControlId, direction: Direction) -> bool {
            self.0.lock().push(direction);
            true
        }

        fn request_focus(&self, _control: ControlId) {}
    }

    fn table() -> (TableView<u32>, Behavior<TableView<u32>>, Arc<Host>) {
        let columns = vec![TableColumn::new("a"), TableColumn::new("b"), TableColumn::new("c")];
        let mut table = TableView::new(vec![10, 20, 30], columns)
            .with_selection_mode(SelectionMode::Multiple)
            .with_cell_selection(true);
        let host = Arc::new(Host::default());
        table.control_base_mut().set_focus_host(Some(host.clone()));
        let behavior = Behavior::new(&mut table);
        (table, behavior, host)
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::key_pressed(key, KeyboardModifiers::NONE)
    }

    fn selected(table: &TableView<u32>) -> Vec<TablePosition> {
        table.selection_model().unwrap().selected_cells()
    }

    #[test]
    fn test_arrows_move_cells_then_traverse_at_edge() {
        let (mut table, behavior, host) = table();
        table.cells().unwrap().press_cell(0, Some(1), false, false);

        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowRight)));
        assert_eq!(selected(&table), vec![TablePosition::cell(0, 2)]);
        assert!(host.0.lock().is_empty());

        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowRight)));
        assert_eq!(selected(&table), vec![TablePosition::cell(0, 2)]);
        assert_eq!(*host.0.lock(), vec![Direction::Right]);

        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowDown)));
        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowDown)));
        assert_eq!(selected(&table), vec![TablePosition::cell(2, 2)]);
        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowDown)));
        assert_eq!(*host.0.lock(), vec![Direction::Right, Direction::Down]);
    }

    #[test]
    fn test_up_on_first_row_reselects_cell() {
        let (mut table, behavior, host) = table();
        table.cells().unwrap().press_cell(0, Some(1), false, false);
        table.selection_model_mut().unwrap().clear_selection();

        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowUp)));
        assert_eq!(selected(&table), vec![TablePosition::cell(0, 1)]);
        assert!(host.0.lock().is_empty());
    }

    #[test]
    fn test_rtl_mirrors_cell_moves() {
        let (mut table, behavior, _host) = table();
        table.control_base_mut().set_node_orientation(NodeOrientation::RightToLeft);
        table.cells().unwrap().press_cell(1, Some(1), false, false);

        assert!(behavior.handle_event(&mut table, &mut key(Key::ArrowRight)));
        assert_eq!(selected(&table), vec![TablePosition::cell(1, 0)]);
    }

    #[test]
    fn test_activate_respects_column_editability() {
        let columns = vec![TableColumn::new("a"), TableColumn::new("b").with_editable(false)];
        let mut table = TableView::new(vec![1, 2], columns).with_cell_selection(true);
        table.set_editable(true);
        let behavior = Behavior::new(&mut table);

        table.cells().unwrap().press_cell(0, Some(1), false, false);
        let mut enter = key(Key::Enter);
        assert!(!behavior.handle_event(&mut table, &mut enter));
        assert_eq!(table.editing_cell(), None);

        table.cells().unwrap().press_cell(0, Some(0), false, false);
        let mut enter = key(Key::Enter);
        assert!(behavior.handle_event(&mut table, &mut enter));
        assert_eq!(table.editing_cell(), Some(TablePosition::cell(0, 0)));
    }

    #[test]
    fn test_cell_press_and_shift_press() {
        let (mut table, behavior, _host) = table();
        let mut press = InputEvent::mouse_pressed(HitTarget::Cell { row: 0, column: 0 }, KeyboardModifiers::NONE);
        behavior.handle_event(&mut table, &mut press);
        let mut press = InputEvent::mouse_pressed(HitTarget::Cell { row: 1, column: 1 }, KeyboardModifiers::SHIFT);
        behavior.handle_event(&mut table, &mut press);
        assert_eq!(selected(&table).len(), 4);
        assert_eq!(table.coordinator().anchor(), Some(TablePosition::cell(0, 0)));
    }
}
