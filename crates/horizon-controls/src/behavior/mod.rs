//! Behaviors: the keyboard and pointer policy of a control.
//!
//! A [`Behavior`] owns a control's [`InputMap`](crate::input::InputMap). On
//! install it fills the map from the control kind's shared
//! [binding table](binding_table): root entries go into the map itself, and
//! each conditional scope becomes a child map whose interceptor hides it
//! whenever the scope's condition fails. Every handler resolves to an
//! [`Action`] and runs it through [`Actionable::perform`], which is where a
//! control kind turns the action into selection, focus, expansion or
//! button-state changes.
//!
//! Disposing a behavior removes exactly what it installed, so mappings the
//! application added itself survive a behavior swap.
//!
//! # Example
//!
//! ```
//! use horizon_controls::behavior::Behavior;
//! use horizon_controls::control::ListView;
//! use horizon_controls::input::{InputEvent, Key, KeyboardModifiers};
//!
//! let mut list = ListView::new(vec!["a", "b", "c"]);
//! let behavior = Behavior::new(&mut list);
//!
//! let mut end = InputEvent::key_pressed(Key::End, KeyboardModifiers::NONE);
//! assert!(behavior.handle_event(&mut list, &mut end));
//! assert_eq!(list.selection_model().unwrap().selected_index(), Some(2));
//! ```

mod action;
mod base;
mod bindings;
mod button;
mod kind;
mod list;
mod table;
mod tree;

pub use action::{Action, UnknownAction};
pub use base::Behavior;
pub use bindings::{BindingEntry, BindingScope, BindingTable, ScopeCondition, binding_table};
pub use kind::ControlKind;

use crate::control::{Control, Orientation};
use crate::input::InputEvent;

/// A control a [`Behavior`] can drive.
pub trait Actionable: Control + Sized + 'static {
    /// The binding table this control uses.
    const KIND: ControlKind;

    /// Layout direction of the control's rows.
    fn orientation(&self) -> Orientation {
        Orientation::Vertical
    }

    /// Observe every event before it is dispatched.
    fn filter_event(&mut self, _event: &InputEvent) {}

    /// Register the listeners the behavior relies on.
    fn connect_listeners(&mut self) {}

    /// Remove the listeners registered by [`connect_listeners`](Self::connect_listeners).
    fn disconnect_listeners(&mut self) {}

    /// Perform `action` in response to `event`. Actions a control does not
    /// support leave the event untouched.
    fn perform(&mut self, action: Action, event: &mut InputEvent);
}
