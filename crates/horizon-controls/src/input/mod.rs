//! Input triggers and the mapping tree they are dispatched through.
//!
//! The host delivers an [`InputEvent`] to a control; the control's behavior
//! offers it to its [`InputMap`], which finds the matching [`Mapping`]s by
//! [`Trigger`] and runs their handlers.

mod binding;
mod event;
mod input_map;
mod key;
mod mapping;
mod traversal;

pub use binding::{KeyBinding, KeyBindingParseError, ModifierState, MouseBinding, Trigger};
pub use event::{EventKind, HitTarget, InputEvent, MouseButton};
pub use input_map::{InputMap, InputMapId};
pub use key::{Key, KeyboardModifiers, Platform, ShortcutModifier};
pub use mapping::{Handler, Mapping, MappingId, MappingOrigin, Predicate};
pub use traversal::{Direction, FocusHost};
