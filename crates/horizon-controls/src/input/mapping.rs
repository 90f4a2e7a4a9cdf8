//! Trigger-to-handler associations.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::binding::Trigger;
use super::event::InputEvent;

static NEXT_MAPPING_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a [`Mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MappingId(u64);

impl MappingId {
    fn next() -> Self {
        Self(NEXT_MAPPING_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Who installed a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MappingOrigin {
    /// Installed by a behavior; removed when the behavior is disposed.
    Default,
    /// Installed by application code; survives behavior disposal.
    #[default]
    User,
}

/// Handler invoked when a mapping matches.
pub type Handler<C> = Arc<dyn Fn(&mut C, &mut InputEvent) + Send + Sync>;

/// Predicate evaluated against the control and the event on every dispatch.
pub type Predicate<C> = Arc<dyn Fn(&C, &InputEvent) -> bool + Send + Sync>;

/// Associates a [`Trigger`] with a handler for controls of type `C`.
///
/// ```
/// use horizon_controls::input::{InputEvent, Key, KeyBinding, Mapping};
///
/// struct Counter(u32);
///
/// let mapping = Mapping::new(KeyBinding::new(Key::Enter), |c: &mut Counter, _: &mut InputEvent| {
///     c.0 += 1;
/// })
/// .with_auto_consume(false);
/// assert!(!mapping.auto_consume());
/// ```
pub struct Mapping<C> {
    id: MappingId,
    trigger: Trigger,
    handler: Handler<C>,
    auto_consume: bool,
    disabled: bool,
    enabled_when: Option<Predicate<C>>,
    origin: MappingOrigin,
}

impl<C> Mapping<C> {
    /// Create a user-origin mapping that consumes the events it handles.
    pub fn new<F>(trigger: impl Into<Trigger>, handler: F) -> Self
    where
        F: Fn(&mut C, &mut InputEvent) + Send + Sync + 'static,
    {
        Self::from_handler(trigger.into(), Arc::new(handler))
    }

    /// Create a mapping from an already shared handler.
    pub fn from_handler(trigger: Trigger, handler: Handler<C>) -> Self {
        Self {
            id: MappingId::next(),
            trigger,
            handler,
            auto_consume: true,
            disabled: false,
            enabled_when: None,
            origin: MappingOrigin::User,
        }
    }

    /// Whether the event is consumed after the handler runs.
    pub fn with_auto_consume(mut self, auto_consume: bool) -> Self {
        self.auto_consume = auto_consume;
        self
    }

    /// Only match while `predicate` holds. Re-evaluated on every dispatch.
    pub fn with_enabled_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&C, &InputEvent) -> bool + Send + Sync + 'static,
    {
        self.enabled_when = Some(Arc::new(predicate));
        self
    }

    /// Mark who installed the mapping.
    pub fn with_origin(mut self, origin: MappingOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// The mapping id.
    #[inline]
    pub fn id(&self) -> MappingId {
        self.id
    }

    /// The trigger.
    #[inline]
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Who installed the mapping.
    #[inline]
    pub fn origin(&self) -> MappingOrigin {
        self.origin
    }

    /// Whether the event is consumed after the handler runs.
    #[inline]
    pub fn auto_consume(&self) -> bool {
        self.auto_consume
    }

    /// Whether the mapping has been disabled outright.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disable or re-enable the mapping.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the mapping may fire for `event` on `control`, ignoring the trigger.
    pub fn is_enabled_for(&self, control: &C, event: &InputEvent) -> bool {
        !self.disabled && self.enabled_when.as_ref().is_none_or(|p| p(control, event))
    }

    /// Whether the trigger matches and the mapping is enabled.
    pub fn matches(&self, control: &C, event: &InputEvent) -> bool {
        self.trigger.matches(event) && self.is_enabled_for(control, event)
    }

    /// Run the handler without touching the consumed flag.
    pub fn invoke(&self, control: &mut C, event: &mut InputEvent) {
        (self.handler)(control, event);
    }

    pub(crate) fn handler(&self) -> Handler<C> {
        Arc::clone(&self.handler)
    }
}

impl<C> fmt::Debug for Mapping<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("auto_consume", &self.auto_consume)
            .field("disabled", &self.disabled)
            .field("conditional", &self.enabled_when.is_some())
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyBinding, KeyboardModifiers};

    #[derive(Default)]
    struct Switch {
        hits: u32,
        armed: bool,
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Mapping::<Switch>::new(KeyBinding::new(Key::A), |_, _| {});
        let b = Mapping::<Switch>::new(KeyBinding::new(Key::A), |_, _| {});
        assert_ne!(a.id(), b.id());
        assert_eq!(a.trigger(), b.trigger());
    }

    #[test]
    fn test_enabled_predicate_is_checked_per_call() {
        let mapping = Mapping::new(KeyBinding::new(Key::Space), |p: &mut Switch, _| p.hits += 1)
            .with_enabled_when(|p, _| p.armed);
        let event = InputEvent::key_pressed(Key::Space, KeyboardModifiers::NONE);

        let mut switch = Switch::default();
        assert!(!mapping.matches(&switch, &event));
        switch.armed = true;
        assert!(mapping.matches(&switch, &event));

        let mut event = event;
        mapping.invoke(&mut switch, &mut event);
        assert_eq!(switch.hits, 1);
        assert!(!event.is_consumed());
    }

    #[test]
    fn test_disabled_never_matches() {
        let mut mapping = Mapping::<Switch>::new(KeyBinding::new(Key::Tab), |_, _| {});
        mapping.set_disabled(true);
        let event = InputEvent::key_pressed(Key::Tab, KeyboardModifiers::NONE);
        assert!(!mapping.matches(&Switch::default(), &event));
    }
}
