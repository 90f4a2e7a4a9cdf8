//! Selection, focus and anchor state for row-oriented controls.
//!
//! The pieces, leaves first:
//!
//! - [`SelectionModel`] / [`TableSelectionModel`]: what is selected, with a
//!   `selection_changed` signal
//! - [`FocusModel`]: where keyboard navigation continues from
//! - [`SelectionCoordinator`]: the range anchor, modifier state and recent
//!   selection history, kept in step with both models through listeners
//! - [`RowSelection`] / [`CellSelection`]: the gesture algorithms (shift
//!   extension, discontinuous selection, paging, pointer presses) that mutate
//!   all of the above together
//!
//! # Example
//!
//! ```
//! use horizon_controls::selection::{
//!     ListFocusModel, MultipleSelectionModel, RowSelection, SelectionCoordinator,
//!     SelectionMode, Viewport,
//! };
//!
//! let mut selection = MultipleSelectionModel::new(5).with_mode(SelectionMode::Multiple);
//! let mut focus = ListFocusModel::new(5);
//! let coordinator = SelectionCoordinator::new(10);
//! let mut viewport = Viewport::new(5);
//!
//! let mut rows = RowSelection::new(&mut selection, &mut focus, &coordinator, &mut viewport);
//! rows.press_row(1, false, false);
//! rows.press_row(3, true, false);
//!
//! assert_eq!(selection.selected_indices(), vec![1, 2, 3]);
//! assert_eq!(coordinator.anchor(), Some(1));
//! ```

mod anchor;
mod cells;
mod coordinator;
mod focus;
mod history;
mod model;
mod position;
mod rows;
mod table_model;
mod viewport;

pub use anchor::AnchorState;
pub use cells::CellSelection;
pub use coordinator::{SelectionChangeGuard, SelectionCoordinator};
pub use focus::{FocusModel, ListFocusModel, TableFocusModel};
pub use history::{DEFAULT_HISTORY_LIMIT, SelectionHistory};
pub use model::{MultipleSelectionModel, SelectionChange, SelectionMode, SelectionModel};
pub use position::{GridPosition, TablePosition, offset_row, relocate};
pub use rows::RowSelection;
pub use table_model::TableSelectionModel;
pub use viewport::Viewport;
