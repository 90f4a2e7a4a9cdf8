//! Layout panes.
//!
//! Each pane measures its children through the host's [`NodeAccess`]
//! implementation and assigns them bounds inside its own geometry:
//!
//! - [`TilePane`]: uniformly sized tiles that wrap, with ragged last-row alignment
//! - [`BorderPane`]: top/right/bottom/left regions around a center
//! - [`AnchorPane`]: children pinned to edges by pixel anchors
//! - [`GridPane`]: row/column cells with spans, growth priorities and percentages
//!
//! Layout never fails. A pane asked to fit more than it has room for clamps
//! its children to the space available.

mod anchor_pane;
mod area;
mod base;
mod border_pane;
mod grid_pane;
mod tile_pane;
mod traits;

pub use anchor_pane::{AnchorPane, Anchors};
pub use area::{AreaPlacement, HPos, Pos, VPos, layout_in_area, place_in_area, x_offset, y_offset};
pub use base::LayoutBase;
pub use border_pane::{BorderConstraints, BorderPane, BorderRegion};
pub use grid_pane::{ColumnConstraints, GridConstraints, GridPane, Priority, RowConstraints};
pub use tile_pane::{DEFAULT_PREF_TILES, TileConstraints, TilePane};
pub use traits::{Layout, NodeAccess, NodeId, SizeHint};

static_assertions::assert_impl_all!(AnchorPane: Send, Sync);
static_assertions::assert_impl_all!(BorderPane: Send, Sync);
static_assertions::assert_impl_all!(GridPane: Send, Sync);
static_assertions::assert_impl_all!(TilePane: Send);

#[cfg(test)]
pub(crate) mod test_support {
    use horizon_controls_core::{Rect, Size};
    use slotmap::SlotMap;

    use super::{NodeAccess, NodeId, SizeHint};

    /// Slotmap-backed node storage for pane tests.
    #[derive(Default)]
    pub(crate) struct MockStorage {
        nodes: SlotMap<NodeId, (SizeHint, Rect)>,
    }

    impl MockStorage {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// A node that prefers `pref` with no min or max.
        pub(crate) fn add(&mut self, pref: Size) -> NodeId {
            self.add_hint(SizeHint::new(pref))
        }

        pub(crate) fn add_hint(&mut self, hint: SizeHint) -> NodeId {
            self.nodes.insert((hint, Rect::ZERO))
        }

        pub(crate) fn bounds_of(&self, node: NodeId) -> Rect {
            self.nodes.get(node).map_or(Rect::ZERO, |n| n.1)
        }
    }

    impl NodeAccess for MockStorage {
        fn size_hint(&self, node: NodeId) -> Option<SizeHint> {
            self.nodes.get(node).map(|n| n.0)
        }

        fn bounds(&self, node: NodeId) -> Option<Rect> {
            self.nodes.get(node).map(|n| n.1)
        }

        fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
            if let Some(n) = self.nodes.get_mut(node) {
                n.1 = bounds;
            }
        }
    }
}
