//! Horizon Controls - input mapping, selection behavior and layout panes.
//!
//! This crate is the behavior layer of list, table, tree and button controls:
//!
//! - **Input**: keys, bindings and hierarchical [`InputMap`](input::InputMap)s
//!   dispatched child-first with interceptors ([`input`])
//! - **Behaviors**: per-kind binding tables installed into a control's map and
//!   removed precisely on dispose ([`behavior`])
//! - **Selection**: selection and focus models plus the range anchor that
//!   shift/ctrl gestures pivot on ([`selection`])
//! - **Controls**: the control state behaviors drive ([`control`])
//! - **Layout**: tile, border, anchor and grid panes ([`layout`])
//! - **Configuration**: behavior settings and user keymaps from TOML or JSON
//!   ([`config`])
//!
//! Rendering, event delivery and the scene graph belong to the host toolkit.
//!
//! # Example
//!
//! ```
//! use horizon_controls::prelude::*;
//!
//! let mut list = ListView::new(vec!["one", "two", "three", "four", "five"])
//!     .with_selection_mode(SelectionMode::Multiple);
//! let behavior = Behavior::new(&mut list);
//!
//! let mut click = InputEvent::mouse_pressed(HitTarget::Row(1), KeyboardModifiers::NONE);
//! behavior.handle_event(&mut list, &mut click);
//! let mut shift_click = InputEvent::mouse_pressed(HitTarget::Row(3), KeyboardModifiers::SHIFT);
//! behavior.handle_event(&mut list, &mut shift_click);
//!
//! let selection = list.selection_model().unwrap();
//! assert_eq!(selection.selected_indices(), vec![1, 2, 3]);
//! assert_eq!(list.coordinator().anchor(), Some(1));
//! ```

pub mod behavior;
pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod layout;
pub mod prelude;
pub mod selection;

pub use error::{ControlsError, Result};
