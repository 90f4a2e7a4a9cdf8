//! Control base implementation.
//!
//! [`ControlBase`] carries the state every control shares regardless of what
//! it shows: a process-unique id, keyboard focus, node orientation, and the
//! host's focus services. Controls embed it and expose it through
//! [`Control`](super::Control).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_controls_core::logging::targets;
use horizon_controls_core::{Property, Signal};

use crate::input::{Direction, FocusHost};

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Reading direction of a control's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeOrientation {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// The base implementation shared by all controls.
pub struct ControlBase {
    /// Process-unique id, used when talking to the host.
    id: ControlId,

    /// Whether the control currently owns keyboard focus.
    focused: Property<bool>,

    /// Whether the control takes part in focus traversal.
    focus_traversable: bool,

    /// Left-to-right or right-to-left content.
    node_orientation: NodeOrientation,

    /// Host focus services; absent until the host attaches the control.
    focus_host: Option<Arc<dyn FocusHost>>,

    /// Signal emitted when keyboard focus is gained or lost.
    pub focus_changed: Signal<bool>,
}

impl ControlBase {
    /// Create a base with a fresh id, unfocused and focus-traversable.
    pub fn new() -> Self {
        Self {
            id: ControlId::next(),
            focused: Property::new(false),
            focus_traversable: true,
            node_orientation: NodeOrientation::LeftToRight,
            focus_host: None,
            focus_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The control's id.
    #[inline]
    pub fn id(&self) -> ControlId {
        self.id
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether the control owns keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Record a focus change reported by the host.
    pub fn set_focused(&self, focused: bool) {
        if self.focused.set(focused) {
            tracing::trace!(target: targets::BEHAVIOR, control = ?self.id, focused, "focus changed");
            self.focus_changed.emit(focused);
        }
    }

    /// Whether the control takes part in focus traversal.
    pub fn is_focus_traversable(&self) -> bool {
        self.focus_traversable
    }

    /// Include or exclude the control from focus traversal.
    pub fn set_focus_traversable(&mut self, traversable: bool) {
        self.focus_traversable = traversable;
    }

    /// Attach (or detach) the host's focus services.
    pub fn set_focus_host(&mut self, host: Option<Arc<dyn FocusHost>>) {
        self.focus_host = host;
    }

    /// Whether focus services are attached.
    pub fn has_focus_host(&self) -> bool {
        self.focus_host.is_some()
    }

    /// Ask for keyboard focus. Without a host the control simply marks
    /// itself focused.
    pub fn request_focus(&self) {
        if !self.focus_traversable {
            return;
        }
        match &self.focus_host {
            Some(host) => host.request_focus(self.id),
            None => self.set_focused(true),
        }
    }

    /// Ask the host to move focus away in `direction`. Returns whether it moved.
    pub fn traverse(&self, direction: Direction) -> bool {
        let moved = self
            .focus_host
            .as_ref()
            .is_some_and(|host| host.traverse(self.id, direction));
        tracing::trace!(target: targets::BEHAVIOR, control = ?self.id, ?direction, moved, "focus traversal");
        moved
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// The node orientation.
    pub fn node_orientation(&self) -> NodeOrientation {
        self.node_orientation
    }

    /// Set the node orientation.
    pub fn set_node_orientation(&mut self, orientation: NodeOrientation) {
        self.node_orientation = orientation;
    }

    /// Whether content reads right to left.
    pub fn is_right_to_left(&self) -> bool {
        self.node_orientation == NodeOrientation::RightToLeft
    }
}

impl Default for ControlBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControlBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlBase")
            .field("id", &self.id)
            .field("focused", &self.is_focused())
            .field("focus_traversable", &self.focus_traversable)
            .field("node_orientation", &self.node_orientation)
            .field("has_focus_host", &self.focus_host.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(ControlBase: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        requests: Mutex<Vec<ControlId>>,
        moves: Mutex<Vec<(ControlId, Direction)>>,
    }

    impl FocusHost for RecordingHost {
        fn traverse(&self, from: ControlId, direction: Direction) -> bool {
            self.moves.lock().push((from, direction));
            true
        }

        fn request_focus(&self, control: ControlId) {
            self.requests.lock().push(control);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ControlBase::new().id(), ControlBase::new().id());
    }

    #[test]
    fn test_request_focus_without_host_focuses_self() {
        let base = ControlBase::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        base.focus_changed.connect(move |f: &bool| sink.lock().push(*f));

        base.request_focus();
        base.request_focus();
        assert!(base.is_focused());
        assert_eq!(*seen.lock(), vec![true]);
    }

    #[test]
    fn test_host_receives_requests_and_traversal() {
        let host = Arc::new(RecordingHost::default());
        let mut base = ControlBase::new();
        base.set_focus_host(Some(host.clone()));

        base.request_focus();
        assert!(!base.is_focused());
        assert_eq!(*host.requests.lock(), vec![base.id()]);

        assert!(base.traverse(Direction::Next));
        assert_eq!(*host.moves.lock(), vec![(base.id(), Direction::Next)]);
    }

    #[test]
    fn test_traverse_without_host_does_not_move() {
        let base = ControlBase::new();
        assert!(!base.traverse(Direction::Left));
    }

    #[test]
    fn test_not_traversable_ignores_requests() {
        let mut base = ControlBase::new();
        base.set_focus_traversable(false);
        base.request_focus();
        assert!(!base.is_focused());
    }
}
