//! The input event representation delivered by the host.
//!
//! The windowing system owns event delivery; this module only defines the
//! shape the behavior layer consumes: what happened (`kind`), which key or
//! button was involved, the modifier state, what the host's hit test found
//! under the pointer (`target`), and a consumed flag that handlers set to
//! stop further propagation.

use super::key::{Key, KeyboardModifiers, Platform};

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Middle button.
    Middle,
}

/// The kind of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyPressed,
    KeyReleased,
    KeyTyped,
    MousePressed,
    MouseReleased,
    MouseClicked,
    MouseDragged,
    MouseEntered,
    MouseExited,
    /// The control lost keyboard focus.
    FocusLost,
}

impl EventKind {
    /// Whether this is one of the keyboard kinds.
    pub fn is_key(&self) -> bool {
        matches!(self, Self::KeyPressed | Self::KeyReleased | Self::KeyTyped)
    }

    /// Whether this is one of the pointer kinds.
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MousePressed
                | Self::MouseReleased
                | Self::MouseClicked
                | Self::MouseDragged
                | Self::MouseEntered
                | Self::MouseExited
        )
    }
}

/// What the host's hit test found under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitTarget {
    /// The control itself, outside any row or cell.
    #[default]
    Control,
    /// A row of a list or tree.
    Row(usize),
    /// A table cell.
    Cell { row: usize, column: usize },
    /// The expand/collapse disclosure node of a tree row.
    Disclosure(usize),
}

impl HitTarget {
    /// Row index of the target, if it has one.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Control => None,
            Self::Row(row) | Self::Disclosure(row) | Self::Cell { row, .. } => Some(*row),
        }
    }
}

/// An input event offered to a control's input map.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    kind: EventKind,
    key: Option<Key>,
    button: Option<MouseButton>,
    click_count: u32,
    modifiers: KeyboardModifiers,
    target: HitTarget,
    platform: Platform,
    consumed: bool,
}

impl InputEvent {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            key: None,
            button: None,
            click_count: 0,
            modifiers: KeyboardModifiers::NONE,
            target: HitTarget::Control,
            platform: Platform::current(),
            consumed: false,
        }
    }

    /// A key-pressed event.
    pub fn key_pressed(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::key(EventKind::KeyPressed, key, modifiers)
    }

    /// A key-released event.
    pub fn key_released(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::key(EventKind::KeyReleased, key, modifiers)
    }

    /// A keyboard event of the given kind.
    pub fn key(kind: EventKind, key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
            ..Self::new(kind)
        }
    }

    /// A pointer event of the given kind.
    pub fn mouse(kind: EventKind, button: MouseButton, target: HitTarget) -> Self {
        Self {
            button: Some(button),
            click_count: 1,
            target,
            ..Self::new(kind)
        }
    }

    /// A primary-button press on `target`.
    pub fn mouse_pressed(target: HitTarget, modifiers: KeyboardModifiers) -> Self {
        Self::mouse(EventKind::MousePressed, MouseButton::Primary, target).with_modifiers(modifiers)
    }

    /// A focus-lost notification.
    pub fn focus_lost() -> Self {
        Self::new(EventKind::FocusLost)
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the click count (2 for a double click).
    pub fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    /// Pretend the event originated on `platform`.
    pub fn on_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Re-tag the event with `platform` in place.
    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    /// The event kind.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The key, for keyboard events.
    #[inline]
    pub fn key_code(&self) -> Option<Key> {
        self.key
    }

    /// The button, for pointer events.
    #[inline]
    pub fn button(&self) -> Option<MouseButton> {
        self.button
    }

    /// Number of consecutive clicks.
    #[inline]
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Modifier state at the time of the event.
    #[inline]
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Hit-test result.
    #[inline]
    pub fn target(&self) -> HitTarget {
        self.target
    }

    /// Platform the event originated on.
    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether shift is held.
    pub fn is_shift_down(&self) -> bool {
        self.modifiers.shift
    }

    /// Whether the platform shortcut modifier is held.
    pub fn is_shortcut_down(&self) -> bool {
        self.modifiers.shortcut(self.platform)
    }

    /// Mark the event handled; dispatch stops after the current handler.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a handler has consumed the event.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_uses_event_platform() {
        let event = InputEvent::key_pressed(Key::A, KeyboardModifiers::META);
        assert!(event.clone().on_platform(Platform::Mac).is_shortcut_down());
        assert!(!event.on_platform(Platform::Windows).is_shortcut_down());
    }

    #[test]
    fn test_consume_flag() {
        let mut event = InputEvent::mouse_pressed(HitTarget::Row(3), KeyboardModifiers::NONE);
        assert_eq!(event.target().row(), Some(3));
        assert!(!event.is_consumed());
        event.consume();
        assert!(event.is_consumed());
    }
}
