//! Behavior lifecycle: install, dispatch, keymaps and dispose.

use std::fmt;

use horizon_controls_core::logging::{PerfSpan, span_names, targets};

use super::bindings::{BindingEntry, binding_table};
use super::kind::ControlKind;
use super::Actionable;
use crate::config::{BehaviorConfig, Keymap, KeymapEntry};
use crate::error::Result;
use crate::input::{InputEvent, InputMap, InputMapId, Mapping, MappingId, Platform};

/// The input policy of one control.
///
/// A behavior is created against a control and keeps that control's
/// [`InputMap`]. The control itself is passed back in on every call, so a
/// behavior can never act on a control that does not exist.
pub struct Behavior<C: Actionable> {
    kind: ControlKind,
    input_map: InputMap<C>,

    /// Default mappings this behavior added, wherever they live.
    default_mappings: Vec<MappingId>,

    /// Scope maps this behavior grafted onto the root.
    grafted_maps: Vec<InputMapId>,

    /// Child map holding keymap bindings. Owned by the user, not the behavior.
    keymap_map: Option<InputMapId>,

    /// Platform override applied to events before dispatch.
    platform: Option<Platform>,

    disposed: bool,
}

fn default_mapping<C: Actionable>(entry: &BindingEntry) -> Mapping<C> {
    let entry = *entry;
    Mapping::new(entry.trigger(), move |control: &mut C, event: &mut InputEvent| {
        let action = entry.action_for(control.control_base().is_right_to_left());
        control.perform(action, event);
    })
    .with_auto_consume(entry.auto_consume())
}

fn keymap_mapping<C: Actionable>(entry: &KeymapEntry) -> Result<Mapping<C>> {
    let action = entry.action;
    Ok(
        Mapping::new(entry.binding()?, move |control: &mut C, event: &mut InputEvent| {
            control.perform(action, event);
        })
        .with_auto_consume(entry.consume),
    )
}

impl<C: Actionable> Behavior<C> {
    /// Install the default bindings of `C` into a fresh input map.
    pub fn new(control: &mut C) -> Self {
        Self::with_input_map(control, InputMap::new())
    }

    /// Install the default bindings of `C` into `input_map`, keeping the
    /// mappings it already holds. Root bindings whose trigger is already
    /// bound at the root are skipped.
    pub fn with_input_map(control: &mut C, mut input_map: InputMap<C>) -> Self {
        let kind = C::KIND;
        let table = binding_table(kind);
        let mut default_mappings = Vec::with_capacity(table.len());
        let mut grafted_maps = Vec::with_capacity(table.scopes().len());

        for entry in table.entries() {
            default_mappings.extend(input_map.add_default_mapping(default_mapping(entry)));
        }

        for scope in table.scopes() {
            let condition = scope.condition();
            let mut child = InputMap::new()
                .with_interceptor(move |control: &C, event: &InputEvent| !condition.is_active(control, event));
            for entry in scope.entries() {
                default_mappings.extend(child.add_default_mapping(default_mapping(entry)));
            }
            grafted_maps.push(input_map.add_child_map(child));
        }

        control.connect_listeners();

        tracing::debug!(
            target: targets::BEHAVIOR,
            control = ?control.id(),
            %kind,
            mappings = default_mappings.len(),
            scopes = grafted_maps.len(),
            "behavior installed"
        );

        Self {
            kind,
            input_map,
            default_mappings,
            grafted_maps,
            keymap_map: None,
            platform: None,
            disposed: false,
        }
    }

    /// Apply host-wide settings.
    pub fn configure(&mut self, config: &BehaviorConfig) {
        self.platform = config.platform;
    }

    /// The control kind.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// The input map.
    pub fn input_map(&self) -> &InputMap<C> {
        &self.input_map
    }

    /// The input map, for adding application mappings.
    pub fn input_map_mut(&mut self) -> &mut InputMap<C> {
        &mut self.input_map
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Hand the input map back, typically after [`dispose`](Self::dispose)
    /// so another behavior can be installed into it.
    pub fn into_input_map(self) -> InputMap<C> {
        self.input_map
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Offer `event` to the control. Returns whether it was consumed.
    pub fn handle_event(&self, control: &mut C, event: &mut InputEvent) -> bool {
        let _span = PerfSpan::new(span_names::DISPATCH);
        if let Some(platform) = self.platform {
            event.set_platform(platform);
        }
        if !self.disposed {
            control.filter_event(event);
        }
        let consumed = self.input_map.dispatch(control, event);
        tracing::trace!(
            target: targets::BEHAVIOR,
            control = ?control.id(),
            kind = ?event.kind(),
            consumed,
            "event handled"
        );
        consumed
    }

    // =========================================================================
    // Keymaps
    // =========================================================================

    /// Install the keymap entries for this control kind as user mappings.
    ///
    /// Every entry is validated first; on error nothing is installed. A
    /// keymap binding replaces an earlier keymap binding of the same key.
    /// Returns the number of mappings installed.
    pub fn apply_keymap(&mut self, keymap: &Keymap) -> Result<usize> {
        let mappings = keymap
            .entries_for(self.kind)
            .map(|entry| {
                entry.validate()?;
                keymap_mapping(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.install_keymap_mappings(mappings))
    }

    /// Like [`apply_keymap`](Self::apply_keymap), but skips invalid entries
    /// with a warning instead of failing.
    pub fn apply_keymap_lenient(&mut self, keymap: &Keymap) -> usize {
        let kind = self.kind;
        let mappings = keymap
            .entries_for(kind)
            .filter_map(|entry| match entry.validate().and_then(|()| keymap_mapping(entry)) {
                Ok(mapping) => Some(mapping),
                Err(err) => {
                    tracing::warn!(target: targets::CONFIG, %kind, key = %entry.key, %err, "keymap entry skipped");
                    None
                }
            })
            .collect();
        self.install_keymap_mappings(mappings)
    }

    fn install_keymap_mappings(&mut self, mappings: Vec<Mapping<C>>) -> usize {
        if mappings.is_empty() {
            return 0;
        }
        let map_id = match self.keymap_map {
            Some(id) if self.input_map.find_map_mut(id).is_some() => id,
            _ => {
                let id = self.input_map.insert_child_map(0, InputMap::new());
                self.keymap_map = Some(id);
                id
            }
        };
        let Some(map) = self.input_map.find_map_mut(map_id) else {
            return 0;
        };

        let count = mappings.len();
        for mapping in mappings {
            let trigger = *mapping.trigger();
            map.remove_mappings_matching(&trigger);
            map.add_mapping(mapping);
        }
        tracing::debug!(target: targets::BEHAVIOR, kind = %self.kind, count, "keymap applied");
        count
    }

    // =========================================================================
    // Dispose
    // =========================================================================

    /// Remove everything this behavior installed and disconnect its
    /// listeners. Mappings and maps added by anyone else stay. Calling it
    /// again does nothing.
    pub fn dispose(&mut self, control: &mut C) {
        if self.disposed {
            return;
        }
        let removed = self
            .default_mappings
            .drain(..)
            .filter(|&id| self.input_map.remove_mapping(id).is_some())
            .count();

        // A scope map someone added mappings to stays, minus our defaults.
        for id in self.grafted_maps.drain(..) {
            let empty = self
                .input_map
                .find_map_mut(id)
                .is_some_and(|map| map.mappings().is_empty() && map.child_maps().is_empty());
            if empty {
                self.input_map.remove_child_map(id);
            }
        }

        control.disconnect_listeners();
        self.disposed = true;

        tracing::debug!(
            target: targets::BEHAVIOR,
            control = ?control.id(),
            kind = %self.kind,
            removed,
            remaining = self.input_map.mapping_count(),
            "behavior disposed"
        );
    }
}

impl<C: Actionable> fmt::Debug for Behavior<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("kind", &self.kind)
            .field("default_mappings", &self.default_mappings.len())
            .field("grafted_maps", &self.grafted_maps)
            .field("platform", &self.platform)
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Action;
    use crate::config::KeymapEntry;
    use crate::control::{Button, ListView};
    use crate::input::{Key, KeyBinding, KeyboardModifiers};
    use crate::selection::SelectionMode;

    fn key(key: Key) -> InputEvent {
        InputEvent::key_pressed(key, KeyboardModifiers::NONE)
    }

    #[test]
    fn test_install_covers_whole_table() {
        let mut list = ListView::new(vec![1, 2, 3]);
        let behavior = Behavior::new(&mut list);
        let table = binding_table(ControlKind::List);
        assert_eq!(behavior.input_map().mapping_count(), table.len());
        assert_eq!(behavior.input_map().child_maps().len(), table.scopes().len());
        assert!(list.is_listening());
    }

    #[test]
    fn test_dispose_is_idempotent_and_keeps_foreign_mappings() {
        let mut list = ListView::new(vec![1, 2, 3]);
        let mut behavior = Behavior::new(&mut list);
        let id = behavior
            .input_map_mut()
            .add_mapping(Mapping::new(KeyBinding::new(Key::F5), |_: &mut ListView<i32>, _: &mut InputEvent| {}));

        behavior.dispose(&mut list);
        behavior.dispose(&mut list);

        assert!(behavior.is_disposed());
        assert!(!list.is_listening());
        assert_eq!(behavior.input_map().mapping_count(), 1);
        assert!(behavior.input_map().contains_mapping(id));
        assert!(behavior.input_map().child_maps().is_empty());
    }

    #[test]
    fn test_reinstall_into_existing_map() {
        let mut list = ListView::new(vec![1, 2, 3]);
        let mut first = Behavior::new(&mut list);
        first
            .input_map_mut()
            .add_mapping(Mapping::new(KeyBinding::new(Key::Home), |l: &mut ListView<i32>, e: &mut InputEvent| {
                if let Some(mut rows) = l.rows() {
                    rows.select_last_row();
                }
                e.consume();
            }));
        first.dispose(&mut list);

        let second = Behavior::with_input_map(&mut list, first.into_input_map());
        assert!(second.handle_event(&mut list, &mut key(Key::Home)));
        assert_eq!(list.selection_model().unwrap().selected_index(), Some(2));
    }

    #[test]
    fn test_keymap_overrides_default_binding() {
        let mut list = ListView::new(vec![1, 2, 3]);
        let mut behavior = Behavior::new(&mut list);
        let mut keymap = Keymap::new();
        keymap.push(KeymapEntry::new(ControlKind::List, "Home", Action::SelectLastRow));
        keymap.push(KeymapEntry::new(ControlKind::Button, "Home", Action::KeyArm));

        assert_eq!(behavior.apply_keymap(&keymap).unwrap(), 1);
        assert!(behavior.handle_event(&mut list, &mut key(Key::Home)));
        assert_eq!(list.selection_model().unwrap().selected_index(), Some(2));

        // Keymap bindings belong to the user and survive disposal.
        behavior.dispose(&mut list);
        assert_eq!(behavior.input_map().mapping_count(), 1);
    }

    #[test]
    fn test_strict_keymap_installs_nothing_on_error() {
        let mut button = Button::new("OK");
        let mut behavior = Behavior::new(&mut button);
        let before = behavior.input_map().mapping_count();
        let mut keymap = Keymap::new();
        keymap.push(KeymapEntry::new(ControlKind::Button, "Enter", Action::KeyArm));
        keymap.push(KeymapEntry::new(ControlKind::Button, "Enter", Action::SelectAll));

        assert!(behavior.apply_keymap(&keymap).is_err());
        assert_eq!(behavior.input_map().mapping_count(), before);
        assert_eq!(behavior.apply_keymap_lenient(&keymap), 1);
        assert_eq!(behavior.input_map().mapping_count(), before + 1);
    }

    #[test]
    fn test_platform_override() {
        let mut list = ListView::new(vec![1, 2, 3]).with_selection_mode(SelectionMode::Multiple);
        let mut behavior = Behavior::new(&mut list);
        behavior.configure(&BehaviorConfig {
            platform: Some(Platform::Mac),
            ..BehaviorConfig::default()
        });
        list.rows().unwrap().press_row(0, false, false);

        // Meta is the shortcut on the overridden platform.
        let mut event = InputEvent::key_pressed(Key::A, KeyboardModifiers::META).on_platform(Platform::Linux);
        assert!(behavior.handle_event(&mut list, &mut event));
        assert_eq!(event.platform(), Platform::Mac);
        assert_eq!(list.selection_model().unwrap().selected_count(), 3);
    }
}
