//! Shared helpers for integration tests.

#![allow(dead_code)]

use horizon_controls::prelude::*;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A multiple-selection list with `count` items and its behavior.
pub fn multi_list(count: usize) -> (ListView<usize>, Behavior<ListView<usize>>) {
    let mut list = ListView::new((0..count).collect()).with_selection_mode(SelectionMode::Multiple);
    let behavior = Behavior::new(&mut list);
    (list, behavior)
}

/// Deliver a primary press on `row`.
pub fn click(
    list: &mut ListView<usize>,
    behavior: &Behavior<ListView<usize>>,
    row: usize,
    modifiers: KeyboardModifiers,
) -> bool {
    let mut event = InputEvent::mouse_pressed(HitTarget::Row(row), modifiers).on_platform(Platform::Linux);
    behavior.handle_event(list, &mut event)
}

/// Deliver a key press.
pub fn press(
    list: &mut ListView<usize>,
    behavior: &Behavior<ListView<usize>>,
    key: Key,
    modifiers: KeyboardModifiers,
) -> bool {
    let mut event = InputEvent::key_pressed(key, modifiers).on_platform(Platform::Linux);
    behavior.handle_event(list, &mut event)
}

pub fn selected(list: &ListView<usize>) -> Vec<usize> {
    list.selection_model().map(|s| s.selected_indices()).unwrap_or_default()
}
