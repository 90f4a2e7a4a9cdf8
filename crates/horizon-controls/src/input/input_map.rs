//! Hierarchical, interceptable mapping tables.
//!
//! An [`InputMap`] holds an ordered list of [`Mapping`]s and an ordered list
//! of child maps. Each map may carry an *interceptor*: while it returns
//! `true` for an event, the map and its whole subtree are invisible to that
//! event. Interceptors are evaluated per event, so they can depend on mutable
//! control state such as orientation.
//!
//! # Precedence
//!
//! Lookup descends into children first, in list order, so a child's mapping
//! shadows its parent's mapping for the same trigger. Within one map,
//! user-origin mappings are consulted before default-origin mappings, and
//! insertion order decides among mappings of the same origin.
//!
//! # Example
//!
//! ```
//! use horizon_controls::input::{InputEvent, InputMap, Key, KeyBinding, KeyboardModifiers, Mapping};
//!
//! #[derive(Default)]
//! struct Lamp {
//!     vertical: bool,
//!     log: Vec<&'static str>,
//! }
//!
//! let mut map = InputMap::new();
//! map.add_mapping(Mapping::new(KeyBinding::new(Key::ArrowUp), |l: &mut Lamp, _: &mut InputEvent| {
//!     l.log.push("parent")
//! }));
//!
//! let mut vertical = InputMap::new().with_interceptor(|l: &Lamp, _: &InputEvent| !l.vertical);
//! vertical.add_mapping(Mapping::new(KeyBinding::new(Key::ArrowUp), |l: &mut Lamp, _: &mut InputEvent| {
//!     l.log.push("child")
//! }));
//! map.add_child_map(vertical);
//!
//! let mut lamp = Lamp::default();
//! map.dispatch(&mut lamp, &mut InputEvent::key_pressed(Key::ArrowUp, KeyboardModifiers::NONE));
//! lamp.vertical = true;
//! map.dispatch(&mut lamp, &mut InputEvent::key_pressed(Key::ArrowUp, KeyboardModifiers::NONE));
//! assert_eq!(lamp.log, vec!["parent", "child"]);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_controls_core::logging::targets;

use super::binding::Trigger;
use super::event::InputEvent;
use super::mapping::{Mapping, MappingId, MappingOrigin, Predicate};

static NEXT_INPUT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of an [`InputMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputMapId(u64);

impl InputMapId {
    fn next() -> Self {
        Self(NEXT_INPUT_MAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node of a control's mapping tree.
pub struct InputMap<C> {
    id: InputMapId,
    mappings: Vec<Mapping<C>>,
    children: Vec<InputMap<C>>,
    interceptor: Option<Predicate<C>>,
}

impl<C> InputMap<C> {
    /// Create an empty map with no interceptor.
    pub fn new() -> Self {
        Self {
            id: InputMapId::next(),
            mappings: Vec::new(),
            children: Vec::new(),
            interceptor: None,
        }
    }

    /// Gate this map (and its subtree) behind `interceptor`.
    pub fn with_interceptor<P>(mut self, interceptor: P) -> Self
    where
        P: Fn(&C, &InputEvent) -> bool + Send + Sync + 'static,
    {
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Replace (or remove) the interceptor.
    pub fn set_interceptor(&mut self, interceptor: Option<Predicate<C>>) {
        self.interceptor = interceptor;
    }

    /// The map id.
    #[inline]
    pub fn id(&self) -> InputMapId {
        self.id
    }

    /// Mappings held directly by this map, in insertion order.
    pub fn mappings(&self) -> &[Mapping<C>] {
        &self.mappings
    }

    /// Child maps, in insertion order.
    pub fn child_maps(&self) -> &[InputMap<C>] {
        &self.children
    }

    /// Whether the interceptor hides this map from `event`.
    pub fn is_intercepted(&self, control: &C, event: &InputEvent) -> bool {
        self.interceptor.as_ref().is_some_and(|i| i(control, event))
    }

    /// Append a mapping. Duplicate triggers are allowed; see
    /// [`remove_mappings_matching`](Self::remove_mappings_matching) to replace one.
    pub fn add_mapping(&mut self, mapping: Mapping<C>) -> MappingId {
        let id = mapping.id();
        tracing::trace!(
            target: targets::INPUT,
            map = ?self.id,
            mapping = ?id,
            trigger = %mapping.trigger(),
            origin = ?mapping.origin(),
            "mapping added"
        );
        self.mappings.push(mapping);
        id
    }

    /// Append a behavior-owned mapping unless this map already holds one with an
    /// equal trigger. Returns the id when the mapping was added.
    pub fn add_default_mapping(&mut self, mapping: Mapping<C>) -> Option<MappingId> {
        if self.contains_trigger(mapping.trigger()) {
            tracing::trace!(
                target: targets::INPUT,
                map = ?self.id,
                trigger = %mapping.trigger(),
                "default mapping skipped, trigger already bound"
            );
            return None;
        }
        Some(self.add_mapping(mapping.with_origin(MappingOrigin::Default)))
    }

    /// Whether this map (not its children) holds a mapping for `trigger`.
    pub fn contains_trigger(&self, trigger: &Trigger) -> bool {
        self.mappings.iter().any(|m| m.trigger() == trigger)
    }

    /// Whether a mapping with `id` exists anywhere in this tree.
    pub fn contains_mapping(&self, id: MappingId) -> bool {
        self.mappings.iter().any(|m| m.id() == id)
            || self.children.iter().any(|c| c.contains_mapping(id))
    }

    /// Remove the mapping with `id`, searching the whole tree.
    pub fn remove_mapping(&mut self, id: MappingId) -> Option<Mapping<C>> {
        if let Some(pos) = self.mappings.iter().position(|m| m.id() == id) {
            return Some(self.mappings.remove(pos));
        }
        self.children.iter_mut().find_map(|c| c.remove_mapping(id))
    }

    /// Remove every mapping of this map whose trigger equals `trigger`.
    /// Returns how many were removed.
    pub fn remove_mappings_matching(&mut self, trigger: &Trigger) -> usize {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.trigger() != trigger);
        before - self.mappings.len()
    }

    /// Mutable access to the mapping with `id`, searching the whole tree.
    pub fn mapping_mut(&mut self, id: MappingId) -> Option<&mut Mapping<C>> {
        if let Some(pos) = self.mappings.iter().position(|m| m.id() == id) {
            return self.mappings.get_mut(pos);
        }
        self.children.iter_mut().find_map(|c| c.mapping_mut(id))
    }

    /// Append a child map. Returns its id.
    pub fn add_child_map(&mut self, child: InputMap<C>) -> InputMapId {
        let id = child.id;
        tracing::trace!(target: targets::INPUT, parent = ?self.id, child = ?id, "child map added");
        self.children.push(child);
        id
    }

    /// Insert a child map at `index` (clamped), ahead of later siblings in
    /// lookup order. Returns its id.
    pub fn insert_child_map(&mut self, index: usize, child: InputMap<C>) -> InputMapId {
        let id = child.id;
        let index = index.min(self.children.len());
        tracing::trace!(target: targets::INPUT, parent = ?self.id, child = ?id, index, "child map inserted");
        self.children.insert(index, child);
        id
    }

    /// Remove the child map with `id` from anywhere in the tree.
    pub fn remove_child_map(&mut self, id: InputMapId) -> Option<InputMap<C>> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|c| c.remove_child_map(id))
    }

    /// Mutable access to the map with `id` (this map or a descendant).
    pub fn find_map_mut(&mut self, id: InputMapId) -> Option<&mut InputMap<C>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_map_mut(id))
    }

    /// Total number of mappings in this tree.
    pub fn mapping_count(&self) -> usize {
        self.mappings.len() + self.children.iter().map(|c| c.mapping_count()).sum::<usize>()
    }

    /// The highest-precedence mapping that matches `event`, if any.
    pub fn lookup_mapping(&self, control: &C, event: &InputEvent) -> Option<&Mapping<C>> {
        if self.is_intercepted(control, event) {
            return None;
        }
        self.children
            .iter()
            .find_map(|c| c.lookup_mapping(control, event))
            .or_else(|| self.own_matches(control, event).into_iter().next())
    }

    /// Every mapping that matches `event`, highest precedence first.
    pub fn lookup_all(&self, control: &C, event: &InputEvent) -> Vec<&Mapping<C>> {
        let mut found = Vec::new();
        self.collect_matches(control, event, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, control: &C, event: &InputEvent, found: &mut Vec<&'a Mapping<C>>) {
        if self.is_intercepted(control, event) {
            tracing::trace!(target: targets::INPUT, map = ?self.id, kind = ?event.kind(), "map intercepted");
            return;
        }
        for child in &self.children {
            child.collect_matches(control, event, found);
        }
        found.extend(self.own_matches(control, event));
    }

    fn own_matches<'a>(&'a self, control: &C, event: &InputEvent) -> Vec<&'a Mapping<C>> {
        let user = self.mappings.iter().filter(|m| m.origin() == MappingOrigin::User);
        let default = self.mappings.iter().filter(|m| m.origin() == MappingOrigin::Default);
        user.chain(default).filter(|m| m.matches(control, event)).collect()
    }

    /// Offer `event` to this tree.
    ///
    /// Matching handlers run in precedence order. After each handler the event
    /// is consumed if the mapping auto-consumes; dispatch stops once the event
    /// is consumed and moves to the next match only when the handler left it
    /// unconsumed and the mapping does not auto-consume. Returns whether the
    /// event ended up consumed.
    pub fn dispatch(&self, control: &mut C, event: &mut InputEvent) -> bool {
        let handlers: Vec<_> = self
            .lookup_all(control, event)
            .into_iter()
            .map(|m| (m.id(), m.handler(), m.auto_consume()))
            .collect();

        for (id, handler, auto_consume) in handlers {
            tracing::trace!(target: targets::INPUT, mapping = ?id, kind = ?event.kind(), "mapping matched");
            handler(control, event);
            if auto_consume {
                event.consume();
            }
            if event.is_consumed() {
                tracing::trace!(target: targets::INPUT, mapping = ?id, "event consumed");
                return true;
            }
        }
        event.is_consumed()
    }
}

impl<C> Default for InputMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for InputMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputMap")
            .field("id", &self.id)
            .field("mappings", &self.mappings)
            .field("children", &self.children)
            .field("intercepted", &self.interceptor.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(InputMap<()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyBinding, KeyboardModifiers};

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    fn push(tag: &'static str) -> impl Fn(&mut Log, &mut InputEvent) + Send + Sync + 'static {
        move |log: &mut Log, _: &mut InputEvent| log.0.push(tag)
    }

    fn enter() -> InputEvent {
        InputEvent::key_pressed(Key::Enter, KeyboardModifiers::NONE)
    }

    #[test]
    fn test_user_mapping_precedes_default_at_same_node() {
        let mut map = InputMap::new();
        map.add_default_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("default")));
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("user")));

        let mut log = Log::default();
        assert!(map.dispatch(&mut log, &mut enter()));
        assert_eq!(log.0, vec!["user"]);
    }

    #[test]
    fn test_default_install_skips_duplicate_trigger() {
        let mut map = InputMap::<Log>::new();
        assert!(map.add_default_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("a"))).is_some());
        assert!(map.add_default_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("b"))).is_none());
        assert_eq!(map.mappings().len(), 1);
    }

    #[test]
    fn test_non_consuming_mapping_chains_to_next_match() {
        let mut map = InputMap::new();
        let mut child = InputMap::new();
        child.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("child")).with_auto_consume(false));
        map.add_child_map(child);
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("parent")));

        let mut log = Log::default();
        assert!(map.dispatch(&mut log, &mut enter()));
        assert_eq!(log.0, vec!["child", "parent"]);
    }

    #[test]
    fn test_handler_consuming_stops_chain() {
        let mut map = InputMap::new();
        map.add_mapping(
            Mapping::new(KeyBinding::new(Key::Enter), |log: &mut Log, e: &mut InputEvent| {
                log.0.push("first");
                e.consume();
            })
            .with_auto_consume(false),
        );
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("second")));

        let mut log = Log::default();
        assert!(map.dispatch(&mut log, &mut enter()));
        assert_eq!(log.0, vec!["first"]);
    }

    #[test]
    fn test_unmatched_event_is_not_consumed() {
        let mut map = InputMap::new();
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Escape), push("esc")));
        let mut log = Log::default();
        let mut event = enter();
        assert!(!map.dispatch(&mut log, &mut event));
        assert!(!event.is_consumed());
        assert!(log.0.is_empty());
    }

    #[test]
    fn test_remove_mapping_searches_children() {
        let mut map = InputMap::<Log>::new();
        let mut child = InputMap::new();
        let id = child.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("x")));
        let child_id = map.add_child_map(child);

        assert!(map.contains_mapping(id));
        assert!(map.remove_mapping(id).is_some());
        assert!(!map.contains_mapping(id));
        assert!(map.remove_child_map(child_id).is_some());
        assert!(map.child_maps().is_empty());
    }

    #[test]
    fn test_inserted_child_map_takes_precedence() {
        let mut map = InputMap::new();
        let mut later = InputMap::new();
        later.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("later")));
        map.add_child_map(later);
        let mut first = InputMap::new();
        first.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("first")));
        map.insert_child_map(0, first);

        let mut log = Log::default();
        assert!(map.dispatch(&mut log, &mut enter()));
        assert_eq!(log.0, vec!["first"]);
    }

    #[test]
    fn test_remove_mappings_matching_trigger() {
        let mut map = InputMap::<Log>::new();
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("a")));
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Enter), push("b")));
        map.add_mapping(Mapping::new(KeyBinding::new(Key::Space), push("c")));
        assert_eq!(map.remove_mappings_matching(&KeyBinding::new(Key::Enter).into()), 2);
        assert_eq!(map.mapping_count(), 1);
    }
}
