//! Anchor pane: children pinned to the content box edges.
//!
//! Each child may carry up to four anchors, distances in pixels from the
//! top, left, bottom and right edges of the pane's content box.
//!
//! # Anchor Resolution Rules
//!
//! - Both opposite anchors set: the child is stretched between them, whatever
//!   its preferred size.
//! - One anchor set: that edge is pinned and the child keeps its preferred size.
//! - No anchor: the child keeps its current position and preferred size.
//!
//! A child that cannot satisfy its anchors in the space available is clamped
//! to that space. Extents are never negative.

use horizon_controls_core::logging::{span_names, targets};
use horizon_controls_core::{PerfSpan, Rect};

use super::base::LayoutBase;
use super::traits::{Layout, NodeAccess, NodeId, SizeHint};

/// The anchors of one child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchors {
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub bottom: Option<f32>,
    pub right: Option<f32>,
}

impl Anchors {
    /// No anchors.
    pub const NONE: Self = Self {
        top: None,
        left: None,
        bottom: None,
        right: None,
    };

    /// The same distance from all four edges.
    pub const fn fill(inset: f32) -> Self {
        Self {
            top: Some(inset),
            left: Some(inset),
            bottom: Some(inset),
            right: Some(inset),
        }
    }

    /// Builder-style top anchor.
    pub const fn with_top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    /// Builder-style left anchor.
    pub const fn with_left(mut self, left: f32) -> Self {
        self.left = Some(left);
        self
    }

    /// Builder-style bottom anchor.
    pub const fn with_bottom(mut self, bottom: f32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// Builder-style right anchor.
    pub const fn with_right(mut self, right: f32) -> Self {
        self.right = Some(right);
        self
    }
}

/// Resolve one axis: the child's start position and extent.
///
/// `origin`/`extent` describe the content box along the axis, `current` is
/// the child's present position.
fn resolve_axis(start: Option<f32>, end: Option<f32>, origin: f32, extent: f32, pref: f32, current: f32) -> (f32, f32) {
    match (start, end) {
        (Some(start), Some(end)) => (origin + start, (extent - start - end).max(0.0)),
        (Some(start), None) => {
            let size = pref.min(extent - start).max(0.0);
            (origin + start, size)
        }
        (None, Some(end)) => {
            let size = pref.min(extent - end).max(0.0);
            (origin + extent - end - size, size)
        }
        (None, None) => (current, pref.max(0.0)),
    }
}

/// Lays out children by their edge anchors.
#[derive(Debug, Clone, Default)]
pub struct AnchorPane {
    base: LayoutBase<Anchors>,
}

impl AnchorPane {
    /// Create an empty pane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child with the given anchors.
    pub fn add_child(&mut self, node: NodeId, anchors: Anchors) -> bool {
        self.base.add_child_with(node, anchors)
    }

    /// Remove a child, returning its anchors.
    pub fn remove_child(&mut self, node: NodeId) -> Option<Anchors> {
        self.base.remove_child(node)
    }

    /// A child's anchors.
    pub fn anchors(&self, node: NodeId) -> Option<Anchors> {
        self.base.constraints(node).copied()
    }

    /// Replace a child's anchors. Returns `false` if `node` is not a child.
    pub fn set_anchors(&mut self, node: NodeId, anchors: Anchors) -> bool {
        match self.base.constraints_mut(node) {
            Some(slot) => {
                *slot = anchors;
                true
            }
            None => false,
        }
    }

    /// Set or clear a child's top anchor.
    pub fn set_top_anchor(&mut self, node: NodeId, value: Option<f32>) {
        if let Some(anchors) = self.base.constraints_mut(node) {
            anchors.top = value;
        }
    }

    /// Set or clear a child's left anchor.
    pub fn set_left_anchor(&mut self, node: NodeId, value: Option<f32>) {
        if let Some(anchors) = self.base.constraints_mut(node) {
            anchors.left = value;
        }
    }

    /// Set or clear a child's bottom anchor.
    pub fn set_bottom_anchor(&mut self, node: NodeId, value: Option<f32>) {
        if let Some(anchors) = self.base.constraints_mut(node) {
            anchors.bottom = value;
        }
    }

    /// Set or clear a child's right anchor.
    pub fn set_right_anchor(&mut self, node: NodeId, value: Option<f32>) {
        if let Some(anchors) = self.base.constraints_mut(node) {
            anchors.right = value;
        }
    }

    /// Largest horizontal extent any child needs, measured with `width`.
    fn extent_width<S: NodeAccess>(&self, storage: &S, width: impl Fn(&SizeHint) -> f32) -> f32 {
        let origin = self.base.content_rect().left();
        self.base
            .managed(storage)
            .map(|(node, hint, anchors)| {
                let leading = anchors.left.unwrap_or_else(|| match anchors.right {
                    Some(_) => 0.0,
                    None => storage.bounds(node).map_or(0.0, |b| (b.left() - origin).max(0.0)),
                });
                leading + width(&hint) + anchors.right.unwrap_or(0.0)
            })
            .fold(0.0, f32::max)
    }

    fn extent_height<S: NodeAccess>(&self, storage: &S, height: impl Fn(&SizeHint) -> f32) -> f32 {
        let origin = self.base.content_rect().top();
        self.base
            .managed(storage)
            .map(|(node, hint, anchors)| {
                let leading = anchors.top.unwrap_or_else(|| match anchors.bottom {
                    Some(_) => 0.0,
                    None => storage.bounds(node).map_or(0.0, |b| (b.top() - origin).max(0.0)),
                });
                leading + height(&hint) + anchors.bottom.unwrap_or(0.0)
            })
            .fold(0.0, f32::max)
    }
}

impl Layout for AnchorPane {
    type Constraints = Anchors;

    fn base(&self) -> &LayoutBase<Anchors> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayoutBase<Anchors> {
        &mut self.base
    }

    fn compute_min_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        self.base.padding().horizontal() + self.extent_width(storage, |h| h.min.width)
    }

    fn compute_min_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        self.base.padding().vertical() + self.extent_height(storage, |h| h.min.height)
    }

    fn compute_pref_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        self.base.padding().horizontal() + self.extent_width(storage, SizeHint::bounded_pref_width)
    }

    fn compute_pref_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        self.base.padding().vertical() + self.extent_height(storage, SizeHint::bounded_pref_height)
    }

    fn layout_children<S: NodeAccess>(&self, storage: &mut S) {
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        let content = self.base.content_rect();

        let placements: Vec<(NodeId, Rect)> = self
            .base
            .managed(&*storage)
            .map(|(node, hint, anchors)| {
                let current = storage.bounds(node).unwrap_or(Rect::ZERO);
                let (x, width) = resolve_axis(
                    anchors.left,
                    anchors.right,
                    content.left(),
                    content.width(),
                    hint.bounded_pref_width(),
                    current.left(),
                );
                let (y, height) = resolve_axis(
                    anchors.top,
                    anchors.bottom,
                    content.top(),
                    content.height(),
                    hint.bounded_pref_height(),
                    current.top(),
                );
                (node, Rect::new(x, y, width, height))
            })
            .collect();

        tracing::trace!(target: targets::LAYOUT, children = placements.len(), "anchor pane layout");
        for (node, bounds) in placements {
            storage.set_bounds(node, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::MockStorage;
    use horizon_controls_core::{Insets, Size};

    #[test]
    fn test_opposite_anchors_stretch() {
        let mut storage = MockStorage::new();
        let node = storage.add(Size::new(500.0, 20.0));
        let mut pane = AnchorPane::new();
        pane.add_child(node, Anchors::NONE.with_left(10.0).with_right(10.0).with_top(5.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(storage.bounds_of(node), Rect::new(10.0, 5.0, 80.0, 20.0));
    }

    #[test]
    fn test_single_anchor_pins_edge() {
        let mut storage = MockStorage::new();
        let node = storage.add(Size::new(30.0, 20.0));
        let mut pane = AnchorPane::new();
        pane.add_child(node, Anchors::NONE.with_right(10.0).with_bottom(5.0));
        pane.set_padding(Insets::uniform(10.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 120.0, 100.0));
        assert_eq!(storage.bounds_of(node), Rect::new(70.0, 65.0, 30.0, 20.0));
    }

    #[test]
    fn test_unanchored_child_keeps_position() {
        let mut storage = MockStorage::new();
        let node = storage.add(Size::new(30.0, 20.0));
        storage.set_bounds(node, Rect::new(7.0, 9.0, 1.0, 1.0));
        let mut pane = AnchorPane::new();
        pane.add_child(node, Anchors::NONE);
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(storage.bounds_of(node), Rect::new(7.0, 9.0, 30.0, 20.0));
    }

    #[test]
    fn test_overconstraint_clamps() {
        let mut storage = MockStorage::new();
        let wide = storage.add(Size::new(300.0, 10.0));
        let squeezed = storage.add(Size::new(10.0, 10.0));
        let mut pane = AnchorPane::new();
        pane.add_child(wide, Anchors::NONE.with_left(20.0));
        pane.add_child(squeezed, Anchors::NONE.with_left(60.0).with_right(60.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 100.0));

        assert_eq!(storage.bounds_of(wide).width(), 80.0);
        assert_eq!(storage.bounds_of(squeezed).width(), 0.0);
    }

    #[test]
    fn test_pref_size_is_largest_anchored_extent() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(50.0, 10.0));
        let b = storage.add(Size::new(20.0, 40.0));
        let mut pane = AnchorPane::new();
        pane.add_child(a, Anchors::NONE.with_left(10.0).with_right(5.0));
        pane.add_child(b, Anchors::NONE.with_top(30.0).with_bottom(0.0));

        assert_eq!(pane.compute_pref_width(&storage, None), 65.0);
        assert_eq!(pane.compute_pref_height(&storage, None), 70.0);
        assert_eq!(pane.compute_min_width(&storage, None), 15.0);
    }

    #[test]
    fn test_set_anchors_on_unknown_child() {
        let mut storage = MockStorage::new();
        let node = storage.add(Size::new(1.0, 1.0));
        let mut pane = AnchorPane::new();
        assert!(!pane.set_anchors(node, Anchors::fill(0.0)));
        pane.add_child(node, Anchors::NONE);
        pane.set_top_anchor(node, Some(3.0));
        assert_eq!(pane.anchors(node), Some(Anchors::NONE.with_top(3.0)));
    }
}
