//! Error types for the core primitives.

use std::fmt;

/// Errors reported by position-taking collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An index was past the end of the collection.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },
    /// A range was reversed or extended past the end of the collection.
    InvalidRange {
        /// Range start (inclusive).
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// The collection length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Index {index} out of bounds for length {len}")
            }
            Self::InvalidRange { start, end, len } => {
                write!(f, "Invalid range {start}..{end} for length {len}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
