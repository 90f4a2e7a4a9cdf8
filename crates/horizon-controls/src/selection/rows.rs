//! Keyboard and pointer selection algorithms for row controls (lists, trees).
//!
//! [`RowSelection`] borrows a control's selection and focus models together
//! with its [`SelectionCoordinator`] and [`Viewport`] for the duration of one
//! gesture. Every operation keeps the three in step: the selection model
//! holds what is selected, the focus model where navigation continues from,
//! and the coordinator where the next shift-extension is anchored.
//!
//! Single-item moves (`select_*_row`, plain clicks, ctrl toggles) re-anchor
//! explicitly. Shift extensions leave the anchor where it is, and bulk
//! rewrites run under a [`SelectionChangeGuard`](super::SelectionChangeGuard)
//! so listener-driven anchor resets do not fire halfway through.

use horizon_controls_core::logging::targets;

use super::coordinator::SelectionCoordinator;
use super::focus::ListFocusModel;
use super::model::{MultipleSelectionModel, SelectionMode};
use super::position::offset_row;
use super::viewport::Viewport;

/// Selection gestures over one row control's state.
pub struct RowSelection<'a> {
    selection: &'a mut MultipleSelectionModel,
    focus: &'a mut ListFocusModel,
    coordinator: &'a SelectionCoordinator<usize>,
    viewport: &'a mut Viewport,
}

impl<'a> RowSelection<'a> {
    /// Borrow a control's selection state.
    pub fn new(
        selection: &'a mut MultipleSelectionModel,
        focus: &'a mut ListFocusModel,
        coordinator: &'a SelectionCoordinator<usize>,
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

    fn is_single(&self) -> bool {
        self.selection.selection_mode() == SelectionMode::Single
    }

    fn focused_or_first(&self) -> usize {
        self.focus.focused_index().unwrap_or(0)
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Replace the selection with `row`, focus it and anchor there.
    pub fn clear_and_select(&mut self, row: usize) {
        if row >= self.row_count() {
            return;
        }
        self.selection.clear_and_select(row);
        self.focus.focus(row);
        self.coordinator.set_anchor(row);
        self.viewport.reveal(row);
    }

    fn select(&mut self, row: usize) {
        self.selection.select(row);
        self.focus.focus(row);
        self.viewport.reveal(row);
    }

    fn select_range(&mut self, from: usize, to: usize) {
        self.selection.select_range(from, to);
        self.focus.focus(to);
        self.viewport.reveal(to);
    }

    fn focus_row(&mut self, row: usize) {
        self.focus.focus(row);
        self.viewport.reveal(row);
    }

    /// Deselect every row outside `start..=end` (either order), as one bulk change.
    pub fn clear_selection_outside_range(&mut self, start: usize, end: usize) {
        let (min, max) = (start.min(end), start.max(end));
        let _guard = self.coordinator.begin_selection_change();
        for row in self.selection.selected_indices() {
            if row < min || row > max {
                self.selection.clear_selection_at(row);
            }
        }
    }

    // =========================================================================
    // Navigate and select
    // =========================================================================

    /// Select the first row.
    pub fn select_first_row(&mut self) {
        self.clear_and_select(0);
    }

    /// Select the last row.
    pub fn select_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            self.clear_and_select(last);
        }
    }

    /// Select the row above the focused one.
    pub fn select_previous_row(&mut self) {
        match self.focus.focused_index() {
            Some(focus) if focus > 0 => self.clear_and_select(focus - 1),
            _ => {}
        }
    }

    /// Select the row below the focused one; unfocused selects the first row.
    pub fn select_next_row(&mut self) {
        match self.focus.focused_index() {
            Some(focus) => self.clear_and_select(focus + 1),
            None => self.clear_and_select(0),
        }
    }

    /// Select the page target above and re-anchor there.
    pub fn scroll_page_up(&mut self) {
        let lead = self.focused_or_first();
        if let Some(target) = self.viewport.page_up(lead, self.row_count()) {
            self.clear_and_select(target);
        }
    }

    /// Select the page target below and re-anchor there.
    pub fn scroll_page_down(&mut self) {
        let lead = self.focused_or_first();
        if let Some(target) = self.viewport.page_down(lead, self.row_count()) {
            self.clear_and_select(target);
        }
    }

    // =========================================================================
    // Shift extension
    // =========================================================================

    /// Shift+Up: extend the range from the anchor one row up.
    pub fn also_select_previous(&mut self) {
        self.also_select(-1);
    }

    /// Shift+Down: extend the range from the anchor one row down.
    pub fn also_select_next(&mut self) {
        self.also_select(1);
    }

    fn also_select(&mut self, delta: isize) {
        if self.is_single() {
            if delta < 0 {
                self.select_previous_row();
            } else {
                self.select_next_row();
            }
            return;
        }
        if self.coordinator.is_shift_down() {
            self.update_row_selection(delta);
        } else if let Some(row) = offset_row(self.focused_or_first(), delta, self.row_count()) {
            self.select(row);
        }
    }

    fn update_row_selection(&mut self, delta: isize) {
        let Some(focus) = self.focus.focused_index() else {
            self.select_first_row();
            return;
        };
        let Some(new_row) = offset_row(focus, delta, self.row_count()) else {
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
            self.clear_selection_outside_range(anchor, new_row);
        }
        self.select_range(anchor, new_row);
    }

    /// Shift+Home: select from the lead (anchor with shift, else focus) to the first row.
    pub fn select_all_to_first_row(&mut self) {
        self.select_all_to_edge(0);
    }

    /// Shift+End: select from the lead to the last row.
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
        let focus = self.focused_or_first();
        let lead = if shift { self.coordinator.anchor_or(focus) } else { focus };
        {
            let _guard = self.coordinator.begin_selection_change();
            if self.is_single() {
                self.selection.select(edge);
            } else {
                self.selection.clear_selection();
                self.selection.select_range(lead, edge);
            }
        }
        self.focus_row(edge);
        if shift {
            self.coordinator.set_anchor(lead);
        }
    }

    /// Shift+PageUp: select from the lead to the page target above.
    pub fn select_all_page_up(&mut self) {
        let focus = self.focused_or_first();
        let target = self.viewport.page_up(focus, self.row_count());
        self.select_all_to_page_target(focus, target);
    }

    /// Shift+PageDown: select from the lead to the page target below.
    pub fn select_all_page_down(&mut self) {
        let focus = self.focused_or_first();
        let target = self.viewport.page_down(focus, self.row_count());
        self.select_all_to_page_target(focus, target);
    }

    fn select_all_to_page_target(&mut self, focus: usize, target: Option<usize>) {
        let Some(target) = target else {
            return;
        };
        let mut lead = focus;
        if self.coordinator.is_shift_down() {
            lead = self.coordinator.anchor_or(focus);
            self.coordinator.set_anchor(lead);
        }
        {
            let _guard = self.coordinator.begin_selection_change();
            if self.is_single() {
                self.selection.select(target);
            } else {
                self.selection.clear_selection();
                self.selection.select_range(lead, target);
            }
        }
        self.focus_row(target);
    }

    /// Select everything. The anchor is kept.
    pub fn select_all(&mut self) {
        let _guard = self.coordinator.begin_selection_change();
        self.selection.select_all();
    }

    /// Replace the selection with the anchor-to-focus range. With
    /// `move_anchor` the focused row becomes the anchor.
    pub fn select_all_to_focus(&mut self, move_anchor: bool) {
        let Some(focus) = self.focus.focused_index() else {
            return;
        };
        let anchor = self.coordinator.anchor_or(focus);
        {
            let _guard = self.coordinator.begin_selection_change();
            self.selection.clear_selection();
            self.selection.select_range(anchor, focus);
        }
        self.coordinator.set_anchor(if move_anchor { focus } else { anchor });
    }

    // =========================================================================
    // Focus only
    // =========================================================================

    /// Move focus to the first row without selecting.
    pub fn focus_first_row(&mut self) {
        if self.row_count() > 0 {
            self.focus_row(0);
        }
    }

    /// Move focus to the last row without selecting.
    pub fn focus_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            self.focus_row(last);
        }
    }

    /// Move focus up one row. The anchor follows only when the shortcut
    /// modifier is up or no anchor exists.
    pub fn focus_previous_row(&mut self) {
        self.focus.focus_previous(0);
        self.anchor_to_moved_focus();
    }

    /// Move focus down one row. The anchor follows like [`focus_previous_row`](Self::focus_previous_row).
    pub fn focus_next_row(&mut self) {
        self.focus.focus_next(0);
        self.anchor_to_moved_focus();
    }

    fn anchor_to_moved_focus(&mut self) {
        let Some(focus) = self.focus.focused_index() else {
            return;
        };
        self.viewport.reveal(focus);
        if !self.coordinator.is_shortcut_down() || !self.coordinator.has_anchor() {
            self.coordinator.set_anchor(focus);
        }
    }

    /// Move focus to the page target above.
    pub fn focus_page_up(&mut self) {
        let focus = self.focused_or_first();
        if let Some(target) = self.viewport.page_up(focus, self.row_count()) {
            self.focus.focus(target);
        }
    }

    /// Move focus to the page target below.
    pub fn focus_page_down(&mut self) {
        let focus = self.focused_or_first();
        if let Some(target) = self.viewport.page_down(focus, self.row_count()) {
            self.focus.focus(target);
        }
    }

    // =========================================================================
    // Discontinuous (ctrl+shift) selection
    // =========================================================================

    /// Add the row above to the selection without clearing anything.
    pub fn discontinuous_select_previous_row(&mut self) {
        self.discontinuous_select(-1);
    }

    /// Add the row below to the selection without clearing anything.
    pub fn discontinuous_select_next_row(&mut self) {
        self.discontinuous_select(1);
    }

    fn discontinuous_select(&mut self, delta: isize) {
        if self.is_single() {
            if delta < 0 {
                self.select_previous_row();
            } else {
                self.select_next_row();
            }
            return;
        }
        let Some(focus) = self.focus.focused_index() else {
            return;
        };
        let Some(new_focus) = offset_row(focus, delta, self.row_count()) else {
            return;
        };
        let start = if self.coordinator.is_shift_down() {
            self.coordinator.anchor_or(focus)
        } else {
            focus
        };
        self.select_range(start, new_focus);
    }

    /// Add the anchor-to-page-target range above.
    pub fn discontinuous_select_page_up(&mut self) {
        let focus = self.focused_or_first();
        let anchor = self.coordinator.anchor_or(focus);
        if let Some(target) = self.viewport.page_up(focus, self.row_count()) {
            self.select_range(anchor, target);
        }
    }

    /// Add the anchor-to-page-target range below.
    pub fn discontinuous_select_page_down(&mut self) {
        let focus = self.focused_or_first();
        let anchor = self.coordinator.anchor_or(focus);
        if let Some(target) = self.viewport.page_down(focus, self.row_count()) {
            self.select_range(anchor, target);
        }
    }

    /// Add every row from the focus up to the first row.
    pub fn discontinuous_select_all_to_first_row(&mut self) {
        if self.row_count() > 0 {
            let focus = self.focused_or_first();
            self.select_range(focus, 0);
        }
    }

    /// Add every row from the focus down to the last row.
    pub fn discontinuous_select_all_to_last_row(&mut self) {
        if let Some(last) = self.row_count().checked_sub(1) {
            let focus = self.focused_or_first();
            self.select_range(focus, last);
        }
    }

    /// Toggle the focused row and anchor there, even when it ends up deselected.
    pub fn toggle_focus_owner_selection(&mut self) {
        let Some(focus) = self.focus.focused_index() else {
            return;
        };
        self.toggle(focus);
    }

    fn toggle(&mut self, row: usize) {
        if self.selection.is_selected(&row) {
            self.selection.clear_selection_at(row);
            self.focus_row(row);
        } else {
            self.select(row);
        }
        self.coordinator.set_anchor(row);
    }

    /// Select and anchor the focused row, returning it.
    pub fn select_focused(&mut self) -> Option<usize> {
        let focus = self.focus.focused_index()?;
        self.selection.select(focus);
        self.coordinator.set_anchor(focus);
        Some(focus)
    }

    /// Whether `row` is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selection.is_selected(&row)
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// A primary press on `row`: shift range-selects from the anchor (or the
    /// focus), shortcut toggles and re-anchors, a plain press selects only `row`.
    pub fn press_row(&mut self, row: usize, shift: bool, shortcut: bool) {
        if row >= self.row_count() {
            return;
        }
        tracing::trace!(target: targets::SELECTION, row, shift, shortcut, "row pressed");
        if shift && !self.is_single() {
            let anchor = match self.coordinator.anchor() {
                Some(anchor) => anchor,
                None => {
                    let anchor = self.focus.focused_index().unwrap_or(row);
                    self.coordinator.set_anchor(anchor);
                    anchor
                }
            };
            if self.selection.selected_count() > 1 {
                self.clear_selection_outside_range(anchor, row);
            }
            self.select_range(anchor, row);
        } else if shortcut {
            self.toggle(row);
        } else {
            self.clear_and_select(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AnchorState;

    struct Fixture {
        selection: MultipleSelectionModel,
        focus: ListFocusModel,
        coordinator: SelectionCoordinator<usize>,
        viewport: Viewport,
    }

    impl Fixture {
        fn new(rows: usize) -> Self {
            let selection = MultipleSelectionModel::new(rows).with_mode(SelectionMode::Multiple);
            let coordinator = SelectionCoordinator::new(10);
            let listener = coordinator.clone();
            selection
                .selection_changed
                .connect(move |change| listener.on_selection_changed(change));
            Self {
                selection,
                focus: ListFocusModel::new(rows),
                coordinator,
                viewport: Viewport::new(5),
            }
        }

        fn rows(&mut self) -> RowSelection<'_> {
            RowSelection::new(&mut self.selection, &mut self.focus, &self.coordinator, &mut self.viewport)
        }
    }

    #[test]
    fn test_navigation_reanchors() {
        let mut fx = Fixture::new(5);
        fx.rows().select_next_row();
        fx.rows().select_next_row();
        assert_eq!(fx.selection.selected_indices(), vec![1]);
        assert_eq!(fx.coordinator.anchor_state(), AnchorState::Explicit(1));
        fx.rows().select_last_row();
        fx.rows().select_next_row();
        assert_eq!(fx.selection.selected_indices(), vec![4]);
    }

    #[test]
    fn test_shift_extension_round_trip() {
        let mut fx = Fixture::new(10);
        fx.rows().clear_and_select(2);
        fx.coordinator.set_modifiers(true, false);
        for _ in 0..3 {
            fx.rows().also_select_next();
        }
        assert_eq!(fx.selection.selected_indices(), vec![2, 3, 4, 5]);
        assert_eq!(fx.selection.selected_index(), Some(5));
        for _ in 0..3 {
            fx.rows().also_select_previous();
        }
        assert_eq!(fx.selection.selected_indices(), vec![2]);
        assert_eq!(fx.coordinator.anchor(), Some(2));
    }

    #[test]
    fn test_shift_extension_without_anchor_uses_focus() {
        let mut fx = Fixture::new(10);
        fx.focus.focus(4);
        fx.coordinator.set_modifiers(true, false);
        fx.rows().also_select_previous();
        assert_eq!(fx.selection.selected_indices(), vec![3, 4]);
        assert_eq!(fx.coordinator.anchor_state(), AnchorState::Explicit(4));
    }

    #[test]
    fn test_focus_only_keeps_selection_and_anchor() {
        let mut fx = Fixture::new(10);
        fx.rows().clear_and_select(3);
        fx.coordinator.set_modifiers(false, true);
        fx.rows().focus_next_row();
        fx.rows().focus_next_row();
        assert_eq!(fx.focus.focused_index(), Some(5));
        assert_eq!(fx.selection.selected_indices(), vec![3]);
        assert_eq!(fx.coordinator.anchor(), Some(3));
    }

    #[test]
    fn test_discontinuous_selection_is_additive() {
        let mut fx = Fixture::new(10);
        fx.rows().clear_and_select(1);
        fx.coordinator.set_modifiers(false, true);
        fx.rows().focus_next_row();
        fx.rows().focus_next_row();
        fx.coordinator.set_modifiers(true, true);
        fx.rows().discontinuous_select_next_row();
        assert_eq!(fx.selection.selected_indices(), vec![1, 2, 3, 4]);

        fx.rows().clear_and_select(1);
        fx.rows().focus_next_row();
        fx.rows().focus_next_row();
        fx.rows().toggle_focus_owner_selection();
        fx.coordinator.set_modifiers(false, true);
        fx.rows().discontinuous_select_next_row();
        assert_eq!(fx.selection.selected_indices(), vec![1, 3, 4]);
    }

    #[test]
    fn test_select_all_to_edges() {
        let mut fx = Fixture::new(10);
        fx.rows().clear_and_select(4);
        fx.coordinator.set_modifiers(true, false);
        fx.rows().select_all_to_first_row();
        assert_eq!(fx.selection.selected_indices(), vec![0, 1, 2, 3, 4]);
        assert_eq!(fx.selection.selected_index(), Some(0));
        assert_eq!(fx.coordinator.anchor_state(), AnchorState::Explicit(4));

        fx.rows().select_all_to_last_row();
        assert_eq!(fx.selection.selected_indices(), (4..10).collect::<Vec<_>>());
        assert_eq!(fx.focus.focused_index(), Some(9));
    }

    #[test]
    fn test_page_selection() {
        let mut fx = Fixture::new(20);
        fx.rows().clear_and_select(1);
        fx.coordinator.set_modifiers(true, false);
        fx.rows().select_all_page_down();
        assert_eq!(fx.selection.selected_indices(), vec![1, 2, 3, 4]);
        fx.rows().select_all_page_down();
        assert_eq!(fx.selection.selected_indices(), (1..=8).collect::<Vec<_>>());
        assert_eq!(fx.coordinator.anchor(), Some(1));
    }

    #[test]
    fn test_select_all_to_focus_moves_anchor_on_request() {
        let mut fx = Fixture::new(10);
        fx.rows().clear_and_select(2);
        fx.focus.focus(6);
        fx.rows().select_all_to_focus(false);
        assert_eq!(fx.selection.selected_indices(), vec![2, 3, 4, 5, 6]);
        assert_eq!(fx.coordinator.anchor(), Some(2));
        fx.rows().select_all_to_focus(true);
        assert_eq!(fx.coordinator.anchor(), Some(6));
    }

    #[test]
    fn test_press_gestures() {
        let mut fx = Fixture::new(5);
        fx.rows().press_row(1, false, false);
        fx.rows().press_row(3, true, false);
        assert_eq!(fx.selection.selected_indices(), vec![1, 2, 3]);
        assert_eq!(fx.selection.selected_index(), Some(3));

        fx.rows().press_row(1, false, true);
        assert_eq!(fx.selection.selected_indices(), vec![2, 3]);
        assert_eq!(fx.coordinator.anchor(), Some(1));

        fx.rows().press_row(4, true, false);
        assert_eq!(fx.selection.selected_indices(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_select_all_keeps_anchor() {
        let mut fx = Fixture::new(4);
        fx.rows().clear_and_select(2);
        fx.rows().select_all();
        assert_eq!(fx.selection.selected_count(), 4);
        assert_eq!(fx.coordinator.anchor_state(), AnchorState::Explicit(2));
    }
}
