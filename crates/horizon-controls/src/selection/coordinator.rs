//! Anchor, modifier and selection-history bookkeeping shared by a control's
//! behavior and the listeners it registers on the control's models.
//!
//! The coordinator is owned by the control. Listener slots hold clones of it
//! (clones share state), and the behavior disconnects those slots when it is
//! disposed, so no slot outlives the control that owns the coordinator.
//!
//! # Anchor transitions
//!
//! | Trigger | Effect |
//! |---|---|
//! | single select, navigate-and-select, ctrl toggle | `Explicit(target)` |
//! | shift extension | unchanged; with no anchor, focus becomes `Explicit` first |
//! | selection replaced (bulk) | a `Default` anchor is dropped |
//! | selection becomes empty | cleared |
//! | `Default` anchor deselected | cleared |
//! | nothing anchored, positions added | `Default(last added)` |
//! | item insert/remove/permute | follows its row; a removed explicit anchor moves to the removal point |
//! | item list replaced | explicit anchor kept if its item survived, default cleared |
//!
//! Selection-change rules other than the last one are suspended while a
//! [`SelectionChangeGuard`] is alive, so bulk operations (clear then
//! re-select) do not reset the anchor halfway through.

use std::sync::Arc;

use horizon_controls_core::ListChange;
use horizon_controls_core::logging::targets;
use parking_lot::Mutex;

use super::anchor::AnchorState;
use super::history::SelectionHistory;
use super::model::SelectionChange;
use super::position::{GridPosition, relocate};
use crate::input::{EventKind, InputEvent};

#[derive(Debug)]
struct CoordinatorState<P> {
    anchor: AnchorState<P>,
    selection_changing: bool,
    shift_down: bool,
    shortcut_down: bool,
    cell_selection: bool,
    path_deviated: bool,
    history: SelectionHistory<P>,
    row_count: usize,
}

/// Shared anchor/modifier/history state for one control.
#[derive(Debug)]
pub struct SelectionCoordinator<P> {
    state: Arc<Mutex<CoordinatorState<P>>>,
}

impl<P> Clone for SelectionCoordinator<P> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<P: GridPosition> SelectionCoordinator<P> {
    /// Creates a coordinator remembering `history_limit` recent selections.
    pub fn new(history_limit: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(CoordinatorState {
                anchor: AnchorState::None,
                selection_changing: false,
                shift_down: false,
                shortcut_down: false,
                cell_selection: false,
                path_deviated: false,
                history: SelectionHistory::new(history_limit),
                row_count: 0,
            })),
        }
    }

    // =========================================================================
    // Anchor
    // =========================================================================

    /// The anchored position, default or explicit.
    pub fn anchor(&self) -> Option<P> {
        self.state.lock().anchor.position()
    }

    /// The full anchor state.
    pub fn anchor_state(&self) -> AnchorState<P> {
        self.state.lock().anchor
    }

    /// Whether any anchor is set.
    pub fn has_anchor(&self) -> bool {
        self.state.lock().anchor.is_set()
    }

    /// Whether the anchor was auto-assigned.
    pub fn has_default_anchor(&self) -> bool {
        self.state.lock().anchor.is_default()
    }

    /// The anchor, or `fallback` when none is set.
    pub fn anchor_or(&self, fallback: P) -> P {
        self.anchor().unwrap_or(fallback)
    }

    /// Place an explicit anchor at `position`.
    pub fn set_anchor(&self, position: P) {
        self.replace_anchor(AnchorState::Explicit(position));
    }

    /// Place an auto-assigned anchor at `position`.
    pub fn set_default_anchor(&self, position: P) {
        self.replace_anchor(AnchorState::Default(position));
    }

    /// Remove the anchor.
    pub fn clear_anchor(&self) {
        self.replace_anchor(AnchorState::None);
    }

    fn replace_anchor(&self, anchor: AnchorState<P>) {
        let mut state = self.state.lock();
        if state.anchor != anchor {
            tracing::debug!(target: targets::SELECTION, from = ?state.anchor, to = ?anchor, "anchor moved");
            state.anchor = anchor;
        }
    }

    // =========================================================================
    // Bulk-change guard
    // =========================================================================

    /// Suspend anchor resets from selection churn until the guard drops.
    pub fn begin_selection_change(&self) -> SelectionChangeGuard<P> {
        let previous = std::mem::replace(&mut self.state.lock().selection_changing, true);
        SelectionChangeGuard {
            state: Arc::clone(&self.state),
            previous,
        }
    }

    /// Whether a bulk change is in progress.
    pub fn is_selection_changing(&self) -> bool {
        self.state.lock().selection_changing
    }

    // =========================================================================
    // Modifier tracking
    // =========================================================================

    /// Record the shift/shortcut state of an unconsumed key event. Only key
    /// presses count as held; any other key event releases both.
    pub fn track_modifiers(&self, event: &InputEvent) {
        if !event.kind().is_key() || event.is_consumed() {
            return;
        }
        let pressed = event.kind() == EventKind::KeyPressed;
        let mut state = self.state.lock();
        state.shift_down = pressed && event.is_shift_down();
        state.shortcut_down = pressed && event.is_shortcut_down();
    }

    /// Override the tracked modifier state.
    pub fn set_modifiers(&self, shift_down: bool, shortcut_down: bool) {
        let mut state = self.state.lock();
        state.shift_down = shift_down;
        state.shortcut_down = shortcut_down;
    }

    /// Whether shift was held on the last key press.
    pub fn is_shift_down(&self) -> bool {
        self.state.lock().shift_down
    }

    /// Whether the shortcut modifier was held on the last key press.
    pub fn is_shortcut_down(&self) -> bool {
        self.state.lock().shortcut_down
    }

    // =========================================================================
    // Cell-mode path tracking
    // =========================================================================

    /// Tell the coordinator whether positions are single cells.
    pub fn set_cell_selection(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.cell_selection = enabled;
        state.path_deviated = false;
    }

    /// Whether a shift selection left the anchor's row and column.
    pub fn is_path_deviated(&self) -> bool {
        self.state.lock().path_deviated
    }

    /// Set or reset path deviation.
    pub fn set_path_deviated(&self, deviated: bool) {
        self.state.lock().path_deviated = deviated;
    }

    /// The history entry `age` steps back (0 is the most recent).
    pub fn history_entry(&self, age: usize) -> Option<P> {
        self.state.lock().history.get(age)
    }

    /// Number of remembered selections.
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// React to a selection-model change.
    pub fn on_selection_changed(&self, change: &SelectionChange<P>) {
        let mut state = self.state.lock();

        for position in &change.added {
            if !state.history.contains(position) {
                state.history.push(*position);
            }
        }

        let anchor_before = state.anchor.position();
        let mut anchor = state.anchor;

        if change.replaced && anchor.is_default() {
            anchor = AnchorState::None;
        }
        if !state.selection_changing {
            if change.empty_after {
                anchor = AnchorState::None;
            } else if let AnchorState::Default(p) = anchor {
                if change.removed.contains(&p) {
                    anchor = AnchorState::None;
                }
            }
        }
        if !anchor.is_set() {
            if let Some(&last) = change.added.last() {
                anchor = AnchorState::Default(last);
            }
        }

        if let Some(origin) = anchor_before {
            if state.cell_selection && !state.path_deviated {
                let off_path = change
                    .added
                    .iter()
                    .any(|p| p.row() != origin.row() && p.column() != origin.column());
                if off_path {
                    tracing::trace!(target: targets::SELECTION, ?origin, "selection path deviated");
                    state.path_deviated = true;
                }
            }
        }

        if state.anchor != anchor {
            tracing::debug!(target: targets::SELECTION, from = ?state.anchor, to = ?anchor, "anchor updated by selection change");
            state.anchor = anchor;
        }
    }

    /// Number of rows the anchor may point into.
    pub fn row_count(&self) -> usize {
        self.state.lock().row_count
    }

    /// Record the row count; item changes keep it current afterwards.
    pub fn set_row_count(&self, row_count: usize) {
        self.state.lock().row_count = row_count;
    }

    /// React to an item mutation.
    pub fn on_items_changed(&self, change: &ListChange) {
        let mut state = self.state.lock();
        let len_after = change.len_after(state.row_count);
        state.row_count = len_after;
        state.history.clear();
        state.path_deviated = false;

        let anchor = match (state.anchor, change.is_replacement()) {
            (AnchorState::Explicit(p), false) => {
                AnchorState::Explicit(p).map(|p| relocate(p, change, len_after))
            }
            (other, _) => other.map(|p| change.map_index(p.row()).map(|row| p.with_row(row))),
        };

        if state.anchor != anchor {
            tracing::debug!(target: targets::SELECTION, from = ?state.anchor, to = ?anchor, "anchor follows items");
            state.anchor = anchor;
        }
    }

    /// Forget the anchor, modifier state and history.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.anchor = AnchorState::None;
        state.selection_changing = false;
        state.shift_down = false;
        state.shortcut_down = false;
        state.path_deviated = false;
        state.history.clear();
    }
}

/// Keeps a bulk selection change open; restores the previous flag on drop.
#[must_use = "the bulk change ends when the guard is dropped"]
pub struct SelectionChangeGuard<P> {
    state: Arc<Mutex<CoordinatorState<P>>>,
    previous: bool,
}

impl<P> Drop for SelectionChangeGuard<P> {
    fn drop(&mut self) {
        self.state.lock().selection_changing = self.previous;
    }
}

static_assertions::assert_impl_all!(SelectionCoordinator<usize>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyboardModifiers};
    use crate::selection::TablePosition;

    fn change(added: Vec<usize>, removed: Vec<usize>, empty_after: bool) -> SelectionChange<usize> {
        SelectionChange {
            replaced: !added.is_empty() && !removed.is_empty(),
            added,
            removed,
            empty_after,
        }
    }

    #[test]
    fn test_first_selection_sets_default_anchor() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.on_selection_changed(&change(vec![4], vec![], false));
        assert_eq!(coordinator.anchor_state(), AnchorState::Default(4));
    }

    #[test]
    fn test_explicit_anchor_survives_deselection() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_anchor(1usize);
        coordinator.on_selection_changed(&change(vec![], vec![1], false));
        assert_eq!(coordinator.anchor_state(), AnchorState::Explicit(1));
    }

    #[test]
    fn test_default_anchor_cleared_when_deselected() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_default_anchor(1usize);
        coordinator.on_selection_changed(&change(vec![], vec![1], false));
        assert_eq!(coordinator.anchor(), None);
    }

    #[test]
    fn test_empty_selection_clears_anchor() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_anchor(2usize);
        coordinator.on_selection_changed(&change(vec![], vec![2, 3], true));
        assert_eq!(coordinator.anchor(), None);
    }

    #[test]
    fn test_guard_suspends_resets() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_anchor(2usize);
        {
            let _guard = coordinator.begin_selection_change();
            assert!(coordinator.is_selection_changing());
            coordinator.on_selection_changed(&change(vec![], vec![2, 3], true));
        }
        assert!(!coordinator.is_selection_changing());
        assert_eq!(coordinator.anchor(), Some(2));
    }

    #[test]
    fn test_replacement_drops_default_then_reassigns() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_default_anchor(0usize);
        coordinator.on_selection_changed(&change(vec![3], vec![0], false));
        assert_eq!(coordinator.anchor_state(), AnchorState::Default(3));
    }

    #[test]
    fn test_items_change_moves_explicit_anchor() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_row_count(10);
        coordinator.set_anchor(5usize);
        coordinator.on_items_changed(&ListChange::Added { from: 0, count: 2 });
        assert_eq!(coordinator.anchor(), Some(7));
        coordinator.on_items_changed(&ListChange::Removed { from: 6, count: 3 });
        assert_eq!(coordinator.row_count(), 9);
        assert_eq!(coordinator.anchor_state(), AnchorState::Explicit(6));
    }

    #[test]
    fn test_items_change_drops_removed_default_anchor() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_row_count(5);
        coordinator.set_default_anchor(2usize);
        coordinator.on_items_changed(&ListChange::Removed { from: 2, count: 1 });
        assert_eq!(coordinator.anchor(), None);
    }

    #[test]
    fn test_replacement_keeps_surviving_explicit_anchor() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_anchor(1usize);
        let replaced = ListChange::Replaced {
            old_to_new: vec![None, Some(0)],
            new_len: 1,
        };
        coordinator.on_items_changed(&replaced);
        assert_eq!(coordinator.anchor_state(), AnchorState::Explicit(0));

        coordinator.set_default_anchor(0);
        coordinator.on_items_changed(&replaced);
        assert_eq!(coordinator.anchor(), None);
    }

    #[test]
    fn test_modifier_tracking_only_counts_presses() {
        let coordinator = SelectionCoordinator::<usize>::new(10);
        coordinator.track_modifiers(&InputEvent::key_pressed(Key::ArrowDown, KeyboardModifiers::SHIFT));
        assert!(coordinator.is_shift_down());
        coordinator.track_modifiers(&InputEvent::key_released(Key::ArrowDown, KeyboardModifiers::SHIFT));
        assert!(!coordinator.is_shift_down());
    }

    #[test]
    fn test_cell_path_deviation() {
        let coordinator = SelectionCoordinator::new(10);
        coordinator.set_cell_selection(true);
        coordinator.set_anchor(TablePosition::cell(1, 1));
        coordinator.on_selection_changed(&SelectionChange {
            added: vec![TablePosition::cell(2, 1)],
            removed: vec![],
            replaced: false,
            empty_after: false,
        });
        assert!(!coordinator.is_path_deviated());
        coordinator.on_selection_changed(&SelectionChange {
            added: vec![TablePosition::cell(2, 2)],
            removed: vec![],
            replaced: false,
            empty_after: false,
        });
        assert!(coordinator.is_path_deviated());
        assert_eq!(coordinator.history_entry(0), Some(TablePosition::cell(2, 2)));
        assert_eq!(coordinator.history_entry(1), Some(TablePosition::cell(2, 1)));
    }
}
