//! Range-selection anchor state.

/// The fixed end of the next range-extension gesture.
///
/// A default anchor is assigned automatically from selection churn and gives
/// way to later churn; an explicit anchor was placed by a user action and is
/// kept until another user action moves it, even when its row is deselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorState<P> {
    /// No anchor.
    #[default]
    None,
    /// Auto-assigned anchor.
    Default(P),
    /// User-placed anchor.
    Explicit(P),
}

impl<P: Copy> AnchorState<P> {
    /// The anchored position, whatever its kind.
    pub fn position(&self) -> Option<P> {
        match self {
            Self::None => None,
            Self::Default(p) | Self::Explicit(p) => Some(*p),
        }
    }

    /// Whether an anchor is set.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the anchor was auto-assigned.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }

    /// Whether the anchor was placed by a user action.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// The same kind of anchor at a new position.
    pub fn map<F: FnOnce(P) -> Option<P>>(self, f: F) -> Self {
        match self {
            Self::None => Self::None,
            Self::Default(p) => f(p).map_or(Self::None, Self::Default),
            Self::Explicit(p) => f(p).map_or(Self::None, Self::Explicit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let anchor = AnchorState::Explicit(3usize);
        assert_eq!(anchor.position(), Some(3));
        assert!(anchor.is_explicit());
        assert!(!AnchorState::<usize>::None.is_set());
    }

    #[test]
    fn test_map_keeps_kind_or_clears() {
        assert_eq!(AnchorState::Default(2usize).map(|p| Some(p + 1)), AnchorState::Default(3));
        assert_eq!(AnchorState::Explicit(2usize).map(|_| None), AnchorState::None);
    }
}
