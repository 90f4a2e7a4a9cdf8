//! Core layout traits.
//!
//! This module defines the [`Layout`] contract every pane implements and the
//! [`NodeAccess`] trait a host implements to expose its scene nodes.
//!
//! # Measuring and Arranging
//!
//! A generic container pass calls the `compute_*` methods to measure a pane
//! and [`Layout::layout_children`] to arrange it:
//!
//! ```ignore
//! let pref = Size::new(pane.compute_pref_width(&nodes, None), pane.compute_pref_height(&nodes, None));
//! pane.set_geometry(Rect::new(0.0, 0.0, pref.width, pref.height));
//! pane.layout_children(&mut nodes);
//! ```
//!
//! A `None` extent passed to a `compute_*` method means "not yet known".

use horizon_controls_core::{Insets, Rect, Size};

use super::base::LayoutBase;

slotmap::new_key_type! {
    /// Handle to a node managed by a layout pane.
    pub struct NodeId;
}

/// The sizing preferences a node reports to its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeHint {
    /// Smallest acceptable size.
    pub min: Size,
    /// Preferred size.
    pub pref: Size,
    /// Largest useful size.
    pub max: Size,
}

impl SizeHint {
    /// A hint with the given preferred size, no minimum and no maximum.
    pub const fn new(pref: Size) -> Self {
        Self {
            min: Size::ZERO,
            pref,
            max: Size::MAX,
        }
    }

    /// A hint whose min, pref and max are all `size`.
    pub const fn fixed(size: Size) -> Self {
        Self {
            min: size,
            pref: size,
            max: size,
        }
    }

    /// Set the minimum size.
    pub const fn with_min(mut self, min: Size) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum size.
    pub const fn with_max(mut self, max: Size) -> Self {
        self.max = max;
        self
    }

    /// Preferred width clamped to `[min, max]`.
    pub fn bounded_pref_width(&self) -> f32 {
        self.pref.width.min(self.max.width).max(self.min.width)
    }

    /// Preferred height clamped to `[min, max]`.
    pub fn bounded_pref_height(&self) -> f32 {
        self.pref.height.min(self.max.height).max(self.min.height)
    }
}

impl Default for SizeHint {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Host access to the nodes a pane arranges.
///
/// A node the host does not know is treated as unmanaged: it is skipped by
/// measurement and never receives bounds.
pub trait NodeAccess {
    /// The node's sizing preferences, or `None` if the node is unknown.
    fn size_hint(&self, node: NodeId) -> Option<SizeHint>;

    /// The node's current bounds.
    fn bounds(&self, node: NodeId) -> Option<Rect>;

    /// Assign the node's bounds.
    fn set_bounds(&mut self, node: NodeId, bounds: Rect);
}

/// The measuring and arranging contract shared by every pane.
///
/// Implementors supply the `compute_*` measurements and
/// [`layout_children`](Self::layout_children); child management, padding
/// and geometry come from the shared [`LayoutBase`].
pub trait Layout {
    /// Per-child constraints stored alongside each child.
    type Constraints: Default;

    /// The shared layout state.
    fn base(&self) -> &LayoutBase<Self::Constraints>;

    /// The shared layout state, mutably.
    fn base_mut(&mut self) -> &mut LayoutBase<Self::Constraints>;

    // =========================================================================
    // Size Hints
    // =========================================================================

    /// Minimum width, given the height if known.
    fn compute_min_width<S: NodeAccess>(&self, storage: &S, height: Option<f32>) -> f32;

    /// Minimum height, given the width if known.
    fn compute_min_height<S: NodeAccess>(&self, storage: &S, width: Option<f32>) -> f32;

    /// Preferred width, given the height if known.
    fn compute_pref_width<S: NodeAccess>(&self, storage: &S, height: Option<f32>) -> f32;

    /// Preferred height, given the width if known.
    fn compute_pref_height<S: NodeAccess>(&self, storage: &S, width: Option<f32>) -> f32;

    /// Maximum width. Unbounded by default.
    fn compute_max_width<S: NodeAccess>(&self, _storage: &S, _height: Option<f32>) -> f32 {
        f32::MAX
    }

    /// Maximum height. Unbounded by default.
    fn compute_max_height<S: NodeAccess>(&self, _storage: &S, _width: Option<f32>) -> f32 {
        f32::MAX
    }

    /// The pane's own size hint, as a parent container would see it.
    fn size_hint<S: NodeAccess>(&self, storage: &S) -> SizeHint {
        SizeHint {
            min: Size::new(
                self.compute_min_width(storage, None),
                self.compute_min_height(storage, None),
            ),
            pref: Size::new(
                self.compute_pref_width(storage, None),
                self.compute_pref_height(storage, None),
            ),
            max: Size::new(
                self.compute_max_width(storage, None),
                self.compute_max_height(storage, None),
            ),
        }
    }

    // =========================================================================
    // Arrangement
    // =========================================================================

    /// Assign bounds to every managed child inside the pane's geometry.
    fn layout_children<S: NodeAccess>(&self, storage: &mut S);

    /// Resize the pane to `bounds` and arrange its children.
    fn layout<S: NodeAccess>(&mut self, storage: &mut S, bounds: Rect) {
        self.base_mut().set_geometry(bounds);
        self.layout_children(storage);
        self.base_mut().mark_clean();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Children in insertion order.
    fn children(&self) -> &[NodeId] {
        self.base().children()
    }

    /// The pane's bounds.
    fn geometry(&self) -> Rect {
        self.base().geometry()
    }

    /// Set the pane's bounds.
    fn set_geometry(&mut self, rect: Rect) {
        self.base_mut().set_geometry(rect);
    }

    /// Space between the pane's edges and its content.
    fn padding(&self) -> Insets {
        self.base().padding()
    }

    /// Set the padding.
    fn set_padding(&mut self, padding: Insets) {
        self.base_mut().set_padding(padding);
    }

    /// Whether the pane changed since its last [`layout`](Self::layout).
    fn needs_layout(&self) -> bool {
        self.base().is_dirty()
    }
}
