//! Control state consumed by behaviors.
//!
//! A control here is the state a behavior reads and mutates, not something
//! that draws: the item list, the selection and focus models, the
//! [`SelectionCoordinator`](crate::selection::SelectionCoordinator) and a few
//! flags such as orientation and editability. Rendering and scene-graph
//! membership stay with the host, which reports focus and the visible rows
//! back to the control.
//!
//! Item mutations go through the control (`push_item`, `remove_item`, ...)
//! so the selection and focus models follow the items they refer to. The
//! coordinator follows through listeners that a behavior registers when it
//! is installed and removes when it is disposed.

mod base;
mod button;
mod list_view;
mod table_view;
mod tree_view;

pub use base::{ControlBase, ControlId, NodeOrientation};
pub use button::Button;
pub use list_view::ListView;
pub use table_view::{TableColumn, TableView};
pub use tree_view::{TreeItemId, TreeView};

use horizon_controls_core::ConnectionId;

/// Direction rows are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Common access to a control's [`ControlBase`].
pub trait Control {
    /// The shared base.
    fn control_base(&self) -> &ControlBase;

    /// The shared base, mutably.
    fn control_base_mut(&mut self) -> &mut ControlBase;

    /// The control's id.
    fn id(&self) -> ControlId {
        self.control_base().id()
    }
}

/// Listener connections a control holds for its coordinator.
#[derive(Debug, Default)]
pub(crate) struct CoordinatorLinks {
    pub(crate) items: Option<ConnectionId>,
    pub(crate) selection: Option<ConnectionId>,
}

impl CoordinatorLinks {
    pub(crate) fn is_connected(&self) -> bool {
        self.items.is_some()
    }
}
