//! Behavior configuration and user keymaps.
//!
//! [`BehaviorConfig`] carries the knobs a host may want to set once for all
//! controls: a platform override for shortcut resolution, the selection
//! history capacity, the fallback page size and the default content
//! direction. [`Keymap`] is a list of user key bindings that a
//! [`Behavior`](crate::behavior::Behavior) installs on top of its defaults.
//!
//! Both load from TOML or JSON:
//!
//! ```
//! use horizon_controls::behavior::{Action, ControlKind};
//! use horizon_controls::config::{BehaviorConfig, Keymap};
//!
//! let config = BehaviorConfig::from_toml_str("history_limit = 4\nright_to_left = true").unwrap();
//! assert_eq!(config.history_limit, 4);
//!
//! let keymap = Keymap::from_toml_str(r#"
//! [[binding]]
//! control = "list"
//! key = "Shortcut+Shift+A"
//! action = "select-all"
//! "#).unwrap();
//! assert_eq!(keymap.entries_for(ControlKind::List).next().unwrap().action, Action::SelectAll);
//! ```

use std::path::Path;

use horizon_controls_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::behavior::{Action, ControlKind, binding_table};
use crate::control::NodeOrientation;
use crate::error::{ControlsError, Result};
use crate::input::{EventKind, KeyBinding, Platform};
use crate::selection::DEFAULT_HISTORY_LIMIT;

/// Rows per page when the host has not reported a viewport.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =============================================================================
// Formats
// =============================================================================

/// Text format of a configuration or keymap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeymapFormat {
    Toml,
    Json,
}

impl KeymapFormat {
    /// Infer the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(text: &str, format: KeymapFormat) -> Result<T> {
    match format {
        KeymapFormat::Toml => toml::from_str(text).map_err(|e| ControlsError::keymap_parse(e.to_string())),
        KeymapFormat::Json => serde_json::from_str(text).map_err(|e| ControlsError::keymap_parse(e.to_string())),
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ControlsError::io(path, e))
}

// =============================================================================
// BehaviorConfig
// =============================================================================

/// Settings shared by every behavior a host creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Platform used to resolve `Shortcut` bindings. `None` uses the event's
    /// own platform.
    pub platform: Option<Platform>,

    /// Capacity of the table cell selection history.
    pub history_limit: usize,

    /// Page size used before the host reports a viewport.
    pub page_size: usize,

    /// Lay out new controls right-to-left.
    pub right_to_left: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            platform: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            right_to_left: false,
        }
    }
}

impl BehaviorConfig {
    /// The effective platform: the override, or the build platform.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_default()
    }

    /// Node orientation for new controls.
    pub fn node_orientation(&self) -> NodeOrientation {
        if self.right_to_left {
            NodeOrientation::RightToLeft
        } else {
            NodeOrientation::LeftToRight
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        parse_document(text, KeymapFormat::Toml)
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        parse_document(text, KeymapFormat::Json)
    }

    /// Load from a file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = parse_document(&read_document(path)?, KeymapFormat::from_path(path))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "behavior config loaded");
        Ok(config)
    }
}

// =============================================================================
// Keymap
// =============================================================================

/// Which key event a keymap entry reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyTrigger {
    #[default]
    Pressed,
    Released,
    Typed,
}

impl KeyTrigger {
    /// The matching event kind.
    pub fn event_kind(self) -> EventKind {
        match self {
            Self::Pressed => EventKind::KeyPressed,
            Self::Released => EventKind::KeyReleased,
            Self::Typed => EventKind::KeyTyped,
        }
    }
}

fn default_consume() -> bool {
    true
}

/// One user key binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapEntry {
    /// Control kind the binding applies to.
    pub control: ControlKind,

    /// Binding string, e.g. `Shortcut+Shift+Home`.
    pub key: String,

    /// Key event kind.
    #[serde(default)]
    pub trigger: KeyTrigger,

    /// What the key does.
    pub action: Action,

    /// Whether the mapping consumes every event it handles.
    #[serde(default = "default_consume")]
    pub consume: bool,
}

impl KeymapEntry {
    /// Create a pressed-key, consuming entry.
    pub fn new(control: ControlKind, key: impl Into<String>, action: Action) -> Self {
        Self {
            control,
            key: key.into(),
            trigger: KeyTrigger::Pressed,
            action,
            consume: true,
        }
    }

    /// The parsed key binding.
    pub fn binding(&self) -> Result<KeyBinding> {
        let binding: KeyBinding = self
            .key
            .parse()
            .map_err(|e| ControlsError::invalid_key_binding(&self.key, e))?;
        Ok(binding.with_kind(self.trigger.event_kind()))
    }

    /// Check that the binding parses and the control kind supports the action.
    pub fn validate(&self) -> Result<()> {
        self.binding()?;
        if !binding_table(self.control).supports(self.action) {
            return Err(ControlsError::unsupported_action(self.control, self.action));
        }
        Ok(())
    }
}

/// User key bindings. Each entry names the control kind it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    /// Entries in file order. Later entries win over earlier ones for the
    /// same control kind and key.
    #[serde(default, rename = "binding")]
    pub bindings: Vec<KeymapEntry>,
}

impl Keymap {
    /// An empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: KeymapEntry) {
        self.bindings.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the keymap has no entries.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Parse a document in `format`.
    pub fn parse(text: &str, format: KeymapFormat) -> Result<Self> {
        parse_document(text, format)
    }

    /// Parse a TOML document (`[[binding]]` tables).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, KeymapFormat::Toml)
    }

    /// Parse a JSON document (`{"binding": [...]}`).
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::parse(text, KeymapFormat::Json)
    }

    /// Load from a file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_with_format(path, KeymapFormat::from_path(path))
    }

    /// Load from a file in an explicit format.
    pub fn load_with_format(path: impl AsRef<Path>, format: KeymapFormat) -> Result<Self> {
        let path = path.as_ref();
        let keymap = Self::parse(&read_document(path)?, format)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            entries = keymap.len(),
            "keymap loaded"
        );
        Ok(keymap)
    }

    /// Validate every entry, stopping at the first error.
    pub fn validate(&self) -> Result<()> {
        self.bindings.iter().try_for_each(KeymapEntry::validate)
    }

    /// Entries for `kind`, in file order.
    pub fn entries_for(&self, kind: ControlKind) -> impl Iterator<Item = &KeymapEntry> {
        self.bindings.iter().filter(move |e| e.control == kind)
    }
}
