//! Immutable trigger descriptions used to match input events.
//!
//! A [`KeyBinding`] names a key, the key event kind and the required state of
//! each modifier. Every modifier slot is tri-state ([`ModifierState`]): a slot
//! that is not mentioned defaults to [`ModifierState::Up`], so `Up` does not
//! match while shift is held unless the binding explicitly declares shift as
//! [`ModifierState::Any`].
//!
//! # String Form
//!
//! Bindings parse from and print to the `Modifier+...+Key` syntax:
//!
//! - Modifiers: `Shift`, `Ctrl`, `Alt`, `Meta`, `Shortcut`
//! - A `?` prefix declares the modifier ignored (`?Shift+Down`)
//! - A `!` prefix declares it explicitly released (`!Shortcut+Space`)
//! - Keys use [`Key::from_name`] names (`A`, `F2`, `PageUp`, `Space`, ...)
//!
//! ```
//! use horizon_controls::input::{Key, KeyBinding};
//!
//! let binding: KeyBinding = "Shortcut+Shift+Home".parse().unwrap();
//! assert_eq!(binding, KeyBinding::new(Key::Home).shortcut().shift());
//! assert_eq!(binding.to_string(), "Shift+Shortcut+Home");
//! ```

use std::fmt;
use std::str::FromStr;

use super::event::{EventKind, InputEvent, MouseButton};
use super::key::{Key, Platform, ShortcutModifier};

/// Required state of one modifier slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModifierState {
    /// The modifier must be held.
    Down,
    /// The modifier must not be held.
    #[default]
    Up,
    /// The modifier is ignored.
    Any,
}

impl ModifierState {
    /// Whether a modifier that is (or is not) `held` satisfies this state.
    #[inline]
    pub fn accepts(self, held: bool) -> bool {
        match self {
            Self::Down => held,
            Self::Up => !held,
            Self::Any => true,
        }
    }
}

/// A key trigger: key code, key event kind, and tri-state modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    key: Key,
    kind: EventKind,
    shift: ModifierState,
    ctrl: ModifierState,
    alt: ModifierState,
    meta: ModifierState,
    shortcut: Option<ModifierState>,
}

impl KeyBinding {
    /// A key-pressed binding for `key` with every modifier required up.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            kind: EventKind::KeyPressed,
            shift: ModifierState::Up,
            ctrl: ModifierState::Up,
            alt: ModifierState::Up,
            meta: ModifierState::Up,
            shortcut: None,
        }
    }

    /// Match key-released events instead.
    pub const fn released(mut self) -> Self {
        self.kind = EventKind::KeyReleased;
        self
    }

    /// Match key-typed events instead.
    pub const fn typed(mut self) -> Self {
        self.kind = EventKind::KeyTyped;
        self
    }

    /// Match events of `kind` (one of the keyboard kinds).
    pub const fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Require shift down.
    pub const fn shift(self) -> Self {
        self.with_shift(ModifierState::Down)
    }

    /// Require control down.
    pub const fn ctrl(self) -> Self {
        self.with_ctrl(ModifierState::Down)
    }

    /// Require alt down.
    pub const fn alt(self) -> Self {
        self.with_alt(ModifierState::Down)
    }

    /// Require meta down.
    pub const fn meta(self) -> Self {
        self.with_meta(ModifierState::Down)
    }

    /// Require the platform shortcut modifier down.
    pub const fn shortcut(self) -> Self {
        self.with_shortcut(ModifierState::Down)
    }

    /// Set the shift slot.
    pub const fn with_shift(mut self, state: ModifierState) -> Self {
        self.shift = state;
        self
    }

    /// Set the control slot.
    pub const fn with_ctrl(mut self, state: ModifierState) -> Self {
        self.ctrl = state;
        self
    }

    /// Set the alt slot.
    pub const fn with_alt(mut self, state: ModifierState) -> Self {
        self.alt = state;
        self
    }

    /// Set the meta slot.
    pub const fn with_meta(mut self, state: ModifierState) -> Self {
        self.meta = state;
        self
    }

    /// Set the shortcut slot. On match it overrides the physical slot the
    /// event's platform uses for shortcuts.
    pub const fn with_shortcut(mut self, state: ModifierState) -> Self {
        self.shortcut = Some(state);
        self
    }

    /// The bound key.
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// The bound key event kind.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Control and meta slots after resolving the shortcut slot for `platform`.
    fn resolved_ctrl_meta(&self, platform: Platform) -> (ModifierState, ModifierState) {
        match (self.shortcut, platform.shortcut_modifier()) {
            (Some(state), ShortcutModifier::Control) => (state, self.meta),
            (Some(state), ShortcutModifier::Meta) => (self.ctrl, state),
            (None, _) => (self.ctrl, self.meta),
        }
    }

    /// Whether `event` triggers this binding. Modifier matching is exact per slot.
    pub fn matches(&self, event: &InputEvent) -> bool {
        if event.kind() != self.kind || event.key_code() != Some(self.key) {
            return false;
        }
        let mods = event.modifiers();
        let (ctrl, meta) = self.resolved_ctrl_meta(event.platform());
        self.shift.accepts(mods.shift)
            && ctrl.accepts(mods.control)
            && self.alt.accepts(mods.alt)
            && meta.accepts(mods.meta)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = [
            ("Shift", Some(self.shift)),
            ("Ctrl", Some(self.ctrl)),
            ("Alt", Some(self.alt)),
            ("Meta", Some(self.meta)),
            ("Shortcut", self.shortcut),
        ];
        for (name, state) in slots {
            match state {
                Some(ModifierState::Down) => write!(f, "{name}+")?,
                Some(ModifierState::Any) => write!(f, "?{name}+")?,
                Some(ModifierState::Up) if name == "Shortcut" => write!(f, "!{name}+")?,
                _ => {}
            }
        }
        write!(f, "{}", self.key)
    }
}

/// Error type for parsing key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBindingParseError {
    /// The string is empty.
    Empty,
    /// No key was specified (only modifiers).
    NoKey,
    /// More than one non-modifier key.
    MultipleKeys(String),
    /// Unknown key name.
    UnknownKey(String),
}

impl fmt::Display for KeyBindingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty key binding"),
            Self::NoKey => write!(f, "no key specified (only modifiers)"),
            Self::MultipleKeys(s) => write!(f, "more than one key in binding: {s}"),
            Self::UnknownKey(s) => write!(f, "unknown key: {s}"),
        }
    }
}

impl std::error::Error for KeyBindingParseError {}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyBindingParseError::Empty);
        }

        let mut key: Option<Key> = None;
        let mut slots = [None::<ModifierState>; 5];

        for part in s.split('+').map(str::trim) {
            let (state, name) = if let Some(rest) = part.strip_prefix('?') {
                (ModifierState::Any, rest)
            } else if let Some(rest) = part.strip_prefix('!') {
                (ModifierState::Up, rest)
            } else {
                (ModifierState::Down, part)
            };

            let slot = match name.to_ascii_lowercase().as_str() {
                "shift" => Some(0),
                "ctrl" | "control" => Some(1),
                "alt" | "option" => Some(2),
                "meta" | "cmd" | "command" | "super" => Some(3),
                "shortcut" => Some(4),
                _ => None,
            };

            match slot {
                Some(slot) => slots[slot] = Some(state),
                None if key.is_some() => {
                    return Err(KeyBindingParseError::MultipleKeys(s.to_string()));
                }
                None => {
                    key = Some(
                        Key::from_name(name)
                            .ok_or_else(|| KeyBindingParseError::UnknownKey(name.to_string()))?,
                    );
                }
            }
        }

        let key = key.ok_or(KeyBindingParseError::NoKey)?;
        let [shift, ctrl, alt, meta, shortcut] = slots;
        let mut binding = KeyBinding::new(key)
            .with_shift(shift.unwrap_or_default())
            .with_ctrl(ctrl.unwrap_or_default())
            .with_alt(alt.unwrap_or_default())
            .with_meta(meta.unwrap_or_default());
        binding.shortcut = shortcut;
        Ok(binding)
    }
}

/// A pointer trigger: mouse event kind plus an optional button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseBinding {
    kind: EventKind,
    button: Option<MouseButton>,
}

impl MouseBinding {
    /// Match every pointer event of `kind`, whatever the button.
    pub const fn new(kind: EventKind) -> Self {
        Self { kind, button: None }
    }

    /// Only match events for `button`.
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    /// The bound pointer event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether `event` triggers this binding.
    pub fn matches(&self, event: &InputEvent) -> bool {
        event.kind() == self.kind && self.button.is_none_or(|b| event.button() == Some(b))
    }
}

/// Anything a mapping can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A key binding.
    Key(KeyBinding),
    /// A mouse binding.
    Mouse(MouseBinding),
    /// Any event of the given kind.
    Event(EventKind),
}

impl Trigger {
    /// Whether `event` triggers this.
    pub fn matches(&self, event: &InputEvent) -> bool {
        match self {
            Self::Key(binding) => binding.matches(event),
            Self::Mouse(binding) => binding.matches(event),
            Self::Event(kind) => event.kind() == *kind,
        }
    }
}

impl From<KeyBinding> for Trigger {
    fn from(binding: KeyBinding) -> Self {
        Self::Key(binding)
    }
}

impl From<MouseBinding> for Trigger {
    fn from(binding: MouseBinding) -> Self {
        Self::Mouse(binding)
    }
}

impl From<EventKind> for Trigger {
    fn from(kind: EventKind) -> Self {
        Self::Event(kind)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(binding) => write!(f, "{binding}"),
            Self::Mouse(binding) => match binding.button {
                Some(button) => write!(f, "{:?}({button:?})", binding.kind),
                None => write!(f, "{:?}", binding.kind),
            },
            Self::Event(kind) => write!(f, "{kind:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::HitTarget;
    use crate::input::key::KeyboardModifiers;

    fn press(key: Key, mods: KeyboardModifiers, platform: Platform) -> InputEvent {
        InputEvent::key_pressed(key, mods).on_platform(platform)
    }

    #[test]
    fn test_unmentioned_modifier_must_be_up() {
        let up = KeyBinding::new(Key::ArrowUp);
        assert!(up.matches(&press(Key::ArrowUp, KeyboardModifiers::NONE, Platform::Linux)));
        assert!(!up.matches(&press(Key::ArrowUp, KeyboardModifiers::SHIFT, Platform::Linux)));
    }

    #[test]
    fn test_ignored_modifier_matches_either_way() {
        let down = KeyBinding::new(Key::ArrowDown).with_shift(ModifierState::Any);
        assert!(down.matches(&press(Key::ArrowDown, KeyboardModifiers::NONE, Platform::Linux)));
        assert!(down.matches(&press(Key::ArrowDown, KeyboardModifiers::SHIFT, Platform::Linux)));
    }

    #[test]
    fn test_shortcut_resolves_per_platform() {
        let select_all = KeyBinding::new(Key::A).shortcut();
        assert!(select_all.matches(&press(Key::A, KeyboardModifiers::CTRL, Platform::Linux)));
        assert!(!select_all.matches(&press(Key::A, KeyboardModifiers::META, Platform::Linux)));
        assert!(select_all.matches(&press(Key::A, KeyboardModifiers::META, Platform::Mac)));
        assert!(!select_all.matches(&press(Key::A, KeyboardModifiers::CTRL, Platform::Mac)));
    }

    #[test]
    fn test_kind_must_match() {
        let release = KeyBinding::new(Key::Space).released();
        let event = InputEvent::key_released(Key::Space, KeyboardModifiers::NONE);
        assert!(release.matches(&event));
        assert!(!KeyBinding::new(Key::Space).matches(&event));
    }

    #[test]
    fn test_parse_binding_strings() {
        let parsed: KeyBinding = "?Shift+Ctrl+Space".parse().unwrap();
        assert_eq!(
            parsed,
            KeyBinding::new(Key::Space).with_shift(ModifierState::Any).ctrl()
        );
        assert_eq!("".parse::<KeyBinding>(), Err(KeyBindingParseError::Empty));
        assert_eq!("Ctrl+Shift".parse::<KeyBinding>(), Err(KeyBindingParseError::NoKey));
        assert_eq!(
            "Ctrl+Hyper".parse::<KeyBinding>(),
            Err(KeyBindingParseError::UnknownKey("Hyper".into()))
        );
        assert!(matches!(
            "A+B".parse::<KeyBinding>(),
            Err(KeyBindingParseError::MultipleKeys(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let binding = KeyBinding::new(Key::PageDown)
            .shortcut()
            .shift()
            .with_alt(ModifierState::Any);
        let text = binding.to_string();
        assert_eq!(text, "Shift+?Alt+Shortcut+PageDown");
        assert_eq!(text.parse::<KeyBinding>(), Ok(binding));
    }

    #[test]
    fn test_mouse_binding_button_filter() {
        let primary = MouseBinding::new(EventKind::MousePressed).with_button(MouseButton::Primary);
        let secondary = InputEvent::mouse(EventKind::MousePressed, MouseButton::Secondary, HitTarget::Row(0));
        assert!(!primary.matches(&secondary));
        assert!(MouseBinding::new(EventKind::MousePressed).matches(&secondary));
        assert!(Trigger::Event(EventKind::MousePressed).matches(&secondary));
    }
}
