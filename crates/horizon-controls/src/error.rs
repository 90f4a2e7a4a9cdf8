//! Error types for behavior configuration and keymaps.

use std::path::PathBuf;

use crate::behavior::{Action, ControlKind};
use crate::input::KeyBindingParseError;

/// Result type alias for configuration and keymap operations.
pub type Result<T> = std::result::Result<T, ControlsError>;

/// Errors raised while loading configuration or applying keymaps.
#[derive(Debug, thiserror::Error)]
pub enum ControlsError {
    /// A keymap entry names a key combination that does not parse.
    #[error("Invalid key binding '{binding}': {source}")]
    InvalidKeyBinding {
        binding: String,
        #[source]
        source: KeyBindingParseError,
    },

    /// A keymap entry binds an action the control kind cannot perform.
    #[error("Action '{action}' is not supported by {kind} controls")]
    UnsupportedAction { kind: ControlKind, action: Action },

    /// A configuration or keymap document is malformed.
    #[error("Keymap parse error: {message}")]
    KeymapParse { message: String },

    /// A configuration file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ControlsError {
    /// Create a key binding error.
    pub fn invalid_key_binding(binding: impl Into<String>, source: KeyBindingParseError) -> Self {
        Self::InvalidKeyBinding {
            binding: binding.into(),
            source,
        }
    }

    /// Create an unsupported-action error.
    pub fn unsupported_action(kind: ControlKind, action: Action) -> Self {
        Self::UnsupportedAction { kind, action }
    }

    /// Create a parse error.
    pub fn keymap_parse(message: impl Into<String>) -> Self {
        Self::KeymapParse {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ControlsError::unsupported_action(ControlKind::Button, Action::SelectAll);
        assert_eq!(err.to_string(), "Action 'select-all' is not supported by button controls");

        let source = "Shift+Nope".parse::<crate::input::KeyBinding>().unwrap_err();
        let err = ControlsError::invalid_key_binding("Shift+Nope", source);
        assert!(err.to_string().starts_with("Invalid key binding 'Shift+Nope'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
