//! The control kinds that have a default binding table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A kind of control, naming its binding table and its keymap section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    List,
    Tree,
    Table,
    Button,
}

impl ControlKind {
    /// Every kind.
    pub const ALL: [ControlKind; 4] = [Self::List, Self::Tree, Self::Table, Self::Button];

    /// The keymap name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Tree => "tree",
            Self::Table => "table",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
