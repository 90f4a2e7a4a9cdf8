//! Change-detecting value cells.
//!
//! A [`Property`] wraps a value and reports whether a `set` actually changed
//! it. Pair it with a [`Signal`](crate::Signal) to notify observers:
//!
//! ```
//! use horizon_controls_core::{Property, Signal};
//!
//! struct Focusable {
//!     focused: Property<bool>,
//!     focus_changed: Signal<bool>,
//! }
//!
//! impl Focusable {
//!     fn set_focused(&self, focused: bool) {
//!         if self.focused.set(focused) {
//!             self.focus_changed.emit(focused);
//!         }
//!     }
//! }
//!
//! let node = Focusable { focused: Property::new(false), focus_changed: Signal::new() };
//! node.set_focused(true);
//! assert!(node.focused.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell with change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the previous value.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Store `value`, returning the previous value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let prop = Property::new(42);
        assert!(!prop.set(42));
        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_replace_returns_old_value() {
        let prop = Property::new(String::from("left"));
        assert_eq!(prop.replace("right".into()), Some("left".into()));
        assert_eq!(prop.replace("right".into()), None);
        assert_eq!(prop.with(|v| v.len()), 5);
    }
}
