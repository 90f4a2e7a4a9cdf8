//! Named behavior actions.
//!
//! Binding tables and user keymaps refer to what a key does by [`Action`]
//! rather than by handler, so a keymap file can rebind `select-all` without
//! knowing how a list implements it. Action names are kebab-case in keymaps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! actions {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// Something a behavior can do in response to an event.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Action {
            $(
                $(#[$meta])*
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl Action {
            /// Every action, in declaration order.
            pub const ALL: &'static [Action] = &[$(Action::$variant,)*];

            /// The keymap name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Action::$variant => $name,)*
                }
            }
        }
    };
}

actions! {
    // Navigate and select
    SelectFirstRow => "select-first-row",
    SelectLastRow => "select-last-row",
    SelectPreviousRow => "select-previous-row",
    SelectNextRow => "select-next-row",
    ScrollPageUp => "scroll-page-up",
    ScrollPageDown => "scroll-page-down",

    // Shift extension
    AlsoSelectPrevious => "also-select-previous",
    AlsoSelectNext => "also-select-next",
    SelectAllToFirstRow => "select-all-to-first-row",
    SelectAllToLastRow => "select-all-to-last-row",
    SelectAllPageUp => "select-all-page-up",
    SelectAllPageDown => "select-all-page-down",
    SelectAllToFocus => "select-all-to-focus",
    SelectAllToFocusAndSetAnchor => "select-all-to-focus-and-set-anchor",
    SelectAll => "select-all",

    // Focus only
    FocusFirstRow => "focus-first-row",
    FocusLastRow => "focus-last-row",
    FocusPreviousRow => "focus-previous-row",
    FocusNextRow => "focus-next-row",
    FocusPageUp => "focus-page-up",
    FocusPageDown => "focus-page-down",

    // Discontinuous (shortcut + shift)
    DiscontinuousSelectPreviousRow => "discontinuous-select-previous-row",
    DiscontinuousSelectNextRow => "discontinuous-select-next-row",
    DiscontinuousSelectPageUp => "discontinuous-select-page-up",
    DiscontinuousSelectPageDown => "discontinuous-select-page-down",
    DiscontinuousSelectAllToFirstRow => "discontinuous-select-all-to-first-row",
    DiscontinuousSelectAllToLastRow => "discontinuous-select-all-to-last-row",

    ToggleFocusOwnerSelection => "toggle-focus-owner-selection",
    /// Select the focused row and start editing it when allowed.
    Activate => "activate",
    CancelEdit => "cancel-edit",

    // Focus traversal to other controls
    TraverseNext => "traverse-next",
    TraversePrevious => "traverse-previous",
    TraverseUp => "traverse-up",
    TraverseDown => "traverse-down",
    TraverseLeft => "traverse-left",
    TraverseRight => "traverse-right",

    /// Pointer selection on the pressed row or cell.
    PointerPress => "pointer-press",

    // Trees
    ExpandRow => "expand-row",
    CollapseRow => "collapse-row",
    ExpandAll => "expand-all",

    // Table cells
    SelectLeftCell => "select-left-cell",
    SelectRightCell => "select-right-cell",
    AlsoSelectLeftCell => "also-select-left-cell",
    AlsoSelectRightCell => "also-select-right-cell",
    FocusLeftCell => "focus-left-cell",
    FocusRightCell => "focus-right-cell",
    DiscontinuousSelectPreviousColumn => "discontinuous-select-previous-column",
    DiscontinuousSelectNextColumn => "discontinuous-select-next-column",

    // Buttons
    KeyArm => "key-arm",
    KeyFire => "key-fire",
    KeyCancel => "key-cancel",
    MouseArm => "mouse-arm",
    MouseFire => "mouse-fire",
    MouseExit => "mouse-exit",
    MouseEnter => "mouse-enter",
    FocusLost => "focus-lost",
}

impl Action {
    /// The action a horizontally mirrored binding performs in right-to-left
    /// content. Actions without a horizontal sense map to themselves.
    pub const fn mirrored(self) -> Self {
        use Action::*;
        match self {
            SelectPreviousRow => SelectNextRow,
            SelectNextRow => SelectPreviousRow,
            AlsoSelectPrevious => AlsoSelectNext,
            AlsoSelectNext => AlsoSelectPrevious,
            FocusPreviousRow => FocusNextRow,
            FocusNextRow => FocusPreviousRow,
            DiscontinuousSelectPreviousRow => DiscontinuousSelectNextRow,
            DiscontinuousSelectNextRow => DiscontinuousSelectPreviousRow,
            SelectLeftCell => SelectRightCell,
            SelectRightCell => SelectLeftCell,
            AlsoSelectLeftCell => AlsoSelectRightCell,
            AlsoSelectRightCell => AlsoSelectLeftCell,
            FocusLeftCell => FocusRightCell,
            FocusRightCell => FocusLeftCell,
            DiscontinuousSelectPreviousColumn => DiscontinuousSelectNextColumn,
            DiscontinuousSelectNextColumn => DiscontinuousSelectPreviousColumn,
            TraverseLeft => TraverseRight,
            TraverseRight => TraverseLeft,
            ExpandRow => CollapseRow,
            CollapseRow => ExpandRow,
            other => other,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
