//! End-to-end selection tests driven through list behaviors.

mod common;

use common::{click, multi_list, press, selected};
use horizon_controls::prelude::*;

const SHIFT: KeyboardModifiers = KeyboardModifiers::SHIFT;
const CTRL: KeyboardModifiers = KeyboardModifiers::CTRL;
const NONE: KeyboardModifiers = KeyboardModifiers::NONE;

fn last_selected(list: &ListView<usize>) -> Option<usize> {
    list.selection_model().and_then(|s| s.selected_index())
}

#[test]
fn test_click_then_shift_click_selects_range() {
    common::init_tracing();
    let (mut list, behavior) = multi_list(5);

    assert!(click(&mut list, &behavior, 1, NONE));
    assert_eq!(list.coordinator().anchor(), Some(1));

    assert!(click(&mut list, &behavior, 3, SHIFT));
    assert_eq!(selected(&list), vec![1, 2, 3]);
    assert_eq!(list.coordinator().anchor(), Some(1));
    assert_eq!(last_selected(&list), Some(3));
}

#[test]
fn test_ctrl_click_deselecting_anchor_keeps_it() {
    let (mut list, behavior) = multi_list(5);
    click(&mut list, &behavior, 1, NONE);
    click(&mut list, &behavior, 3, SHIFT);

    click(&mut list, &behavior, 1, CTRL);
    assert_eq!(selected(&list), vec![2, 3]);
    assert_eq!(list.coordinator().anchor(), Some(1));

    // The retained anchor still pivots the next extension.
    click(&mut list, &behavior, 4, SHIFT);
    assert_eq!(selected(&list), vec![1, 2, 3, 4]);
    assert_eq!(list.coordinator().anchor(), Some(1));
}

#[test]
fn test_shift_extension_back_to_anchor_is_idempotent() {
    let (mut list, behavior) = multi_list(10);
    click(&mut list, &behavior, 2, NONE);

    for _ in 0..3 {
        click(&mut list, &behavior, 5, SHIFT);
        assert_eq!(selected(&list), vec![2, 3, 4, 5]);
        click(&mut list, &behavior, 2, SHIFT);
        assert_eq!(selected(&list), vec![2]);
        assert_eq!(list.coordinator().anchor(), Some(2));
    }
}

#[test]
fn test_range_direction_sets_last_selected() {
    let mut model: SelectionModel<usize> = SelectionModel::new(10).with_mode(SelectionMode::Multiple);
    model.select_range(2, 5);
    assert_eq!(model.selected_index(), Some(5));

    let mut model: SelectionModel<usize> = SelectionModel::new(10).with_mode(SelectionMode::Multiple);
    model.select_range(5, 2);
    assert_eq!(model.selected_index(), Some(2));
    assert_eq!(model.selected_indices(), vec![2, 3, 4, 5]);
}

#[test]
fn test_shift_arrows_extend_from_anchor() {
    let (mut list, behavior) = multi_list(6);
    press(&mut list, &behavior, Key::ArrowDown, NONE);
    press(&mut list, &behavior, Key::ArrowDown, NONE);
    assert_eq!(selected(&list), vec![1]);
    assert_eq!(list.coordinator().anchor(), Some(1));

    press(&mut list, &behavior, Key::ArrowDown, SHIFT);
    press(&mut list, &behavior, Key::ArrowDown, SHIFT);
    assert_eq!(selected(&list), vec![1, 2, 3]);

    press(&mut list, &behavior, Key::ArrowUp, SHIFT);
    assert_eq!(selected(&list), vec![1, 2]);
    assert_eq!(list.coordinator().anchor(), Some(1));
}

#[test]
fn test_select_all_shortcut() {
    let (mut list, behavior) = multi_list(4);
    click(&mut list, &behavior, 2, NONE);
    assert!(press(&mut list, &behavior, Key::A, CTRL));
    assert_eq!(selected(&list), vec![0, 1, 2, 3]);
    assert_eq!(list.coordinator().anchor(), Some(2));
}

#[test]
fn test_single_mode_ignores_shift_range() {
    let mut list = ListView::new((0..5).collect::<Vec<usize>>());
    let behavior = Behavior::new(&mut list);
    click(&mut list, &behavior, 1, NONE);
    click(&mut list, &behavior, 3, SHIFT);
    assert_eq!(selected(&list), vec![3]);
}

#[test]
fn test_anchor_follows_item_insertion() {
    let (mut list, behavior) = multi_list(5);
    click(&mut list, &behavior, 2, NONE);
    list.insert_item(0, 99);
    assert_eq!(list.coordinator().anchor(), Some(3));
    assert_eq!(selected(&list), vec![3]);

    click(&mut list, &behavior, 5, SHIFT);
    assert_eq!(selected(&list), vec![3, 4, 5]);
}

#[test]
fn test_pointer_press_outside_rows_is_ignored() {
    let (mut list, behavior) = multi_list(3);
    click(&mut list, &behavior, 1, NONE);
    click(&mut list, &behavior, 7, SHIFT);
    assert_eq!(selected(&list), vec![1]);
}
