//! Key codes, modifier state and platform conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Keyboard key identifiers.
///
/// Only keys that the behavior layer binds or that users commonly rebind are
/// named; anything else arrives as [`Key::Unknown`] with the host's raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space, Escape,

    // Numpad operators (tree expand/collapse)
    NumpadAdd, NumpadSubtract, NumpadMultiply,

    /// Unknown/unmapped key.
    Unknown(u16),
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

impl Key {
    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    /// Canonical name, as accepted by [`Key::from_name`].
    pub fn name(&self) -> String {
        if let Some(i) = LETTERS.iter().position(|k| k == self) {
            return char::from(b'A' + i as u8).to_string();
        }
        if let Some(i) = DIGITS.iter().position(|k| k == self) {
            return i.to_string();
        }
        if let Some(i) = FUNCTION_KEYS.iter().position(|k| k == self) {
            return format!("F{}", i + 1);
        }
        let named = match self {
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Insert => "Insert",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Escape => "Escape",
            Key::NumpadAdd => "NumpadAdd",
            Key::NumpadSubtract => "NumpadSubtract",
            Key::NumpadMultiply => "NumpadMultiply",
            other => return format!("{other:?}"),
        };
        named.to_string()
    }

    /// Parse a key name (case-insensitive, with common aliases).
    pub fn from_name(s: &str) -> Option<Key> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            let ch = ch.to_ascii_uppercase();
            return match ch {
                'A'..='Z' => Some(LETTERS[(ch as u8 - b'A') as usize]),
                '0'..='9' => Some(DIGITS[(ch as u8 - b'0') as usize]),
                '*' => Some(Key::NumpadMultiply),
                _ => None,
            };
        }

        let lower = s.to_ascii_lowercase();
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
            return FUNCTION_KEYS.get(n.checked_sub(1)?).copied();
        }

        match lower.as_str() {
            "up" | "arrowup" => Some(Key::ArrowUp),
            "down" | "arrowdown" => Some(Key::ArrowDown),
            "left" | "arrowleft" => Some(Key::ArrowLeft),
            "right" | "arrowright" => Some(Key::ArrowRight),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "backspace" | "back" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "insert" | "ins" => Some(Key::Insert),
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "space" | "spacebar" => Some(Key::Space),
            "escape" | "esc" => Some(Key::Escape),
            "numpadadd" | "add" => Some(Key::NumpadAdd),
            "numpadsubtract" | "subtract" => Some(Key::NumpadSubtract),
            "numpadmultiply" | "multiply" => Some(Key::NumpadMultiply),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Command on macOS, Windows key elsewhere).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta + Shift modifiers.
    pub const META_SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Whether the platform's shortcut modifier is held.
    pub fn shortcut(&self, platform: Platform) -> bool {
        match platform.shortcut_modifier() {
            ShortcutModifier::Meta => self.meta,
            ShortcutModifier::Control => self.control,
        }
    }

    /// These modifiers with the platform's shortcut modifier added.
    pub fn with_shortcut(mut self, platform: Platform) -> Self {
        match platform.shortcut_modifier() {
            ShortcutModifier::Meta => self.meta = true,
            ShortcutModifier::Control => self.control = true,
        }
        self
    }
}

/// Which physical modifier acts as "shortcut" on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutModifier {
    /// Command/Meta.
    Meta,
    /// Control.
    Control,
}

/// Desktop platform conventions relevant to key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS.
    Mac,
    /// Windows.
    Windows,
    /// Linux and other Unix desktops.
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Whether this is macOS.
    pub fn is_mac(&self) -> bool {
        matches!(self, Platform::Mac)
    }

    /// The physical modifier used for shortcuts.
    pub fn shortcut_modifier(&self) -> ShortcutModifier {
        if self.is_mac() {
            ShortcutModifier::Meta
        } else {
            ShortcutModifier::Control
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in [Key::Q, Key::Digit7, Key::F11, Key::PageDown, Key::Space, Key::NumpadMultiply] {
            assert_eq!(Key::from_name(&key.name()), Some(key));
        }
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(Key::from_name("esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("f0"), None);
        assert_eq!(Key::from_name("f13"), None);
        assert_eq!(Key::from_name("nope"), None);
    }

    #[test]
    fn test_shortcut_follows_platform() {
        let mods = KeyboardModifiers::META;
        assert!(mods.shortcut(Platform::Mac));
        assert!(!mods.shortcut(Platform::Linux));
        assert_eq!(
            KeyboardModifiers::SHIFT.with_shortcut(Platform::Windows),
            KeyboardModifiers::CTRL_SHIFT
        );
    }
}
