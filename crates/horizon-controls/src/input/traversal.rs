//! Directional focus traversal requested by behaviors.
//!
//! Moving focus between controls belongs to the host's scene graph; the
//! behavior layer only asks for it through [`FocusHost`].

use crate::control::ControlId;

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next control in traversal order (Tab).
    Next,
    /// Previous control in traversal order (Shift+Tab).
    Previous,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether this is one of the four spatial directions.
    pub fn is_directional(self) -> bool {
        !matches!(self, Self::Next | Self::Previous)
    }
}

/// Focus services the host provides to controls.
pub trait FocusHost: Send + Sync {
    /// Move focus from `from` in `direction`. Returns whether focus moved.
    fn traverse(&self, from: ControlId, direction: Direction) -> bool;

    /// Give keyboard focus to `control`.
    fn request_focus(&self, control: ControlId);
}
