//! Border pane: four edge regions around a center.
//!
//! Top and bottom take their preferred heights across the full content
//! width; left and right take their preferred widths in the band between
//! them; the center gets whatever is left. An empty region takes no space.

use horizon_controls_core::logging::{span_names, targets};
use horizon_controls_core::{Insets, PerfSpan, Rect};

use super::area::{AreaPlacement, Pos, layout_in_area};
use super::base::LayoutBase;
use super::traits::{Layout, NodeAccess, NodeId, SizeHint};

/// The five regions of a [`BorderPane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderRegion {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl BorderRegion {
    const ALL: [BorderRegion; 5] = [
        BorderRegion::Top,
        BorderRegion::Right,
        BorderRegion::Bottom,
        BorderRegion::Left,
        BorderRegion::Center,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Alignment used when the region's child cannot fill it.
    pub fn default_alignment(self) -> Pos {
        match self {
            BorderRegion::Top | BorderRegion::Left => Pos::TopLeft,
            BorderRegion::Right => Pos::TopRight,
            BorderRegion::Bottom => Pos::BottomLeft,
            BorderRegion::Center => Pos::Center,
        }
    }
}

/// Per-child region constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderConstraints {
    /// Overrides the region's default alignment.
    pub alignment: Option<Pos>,
    /// Space around the child inside its region.
    pub margin: Insets,
}

/// Lays out up to five children in edge regions and a center.
#[derive(Debug, Clone, Default)]
pub struct BorderPane {
    base: LayoutBase<BorderConstraints>,
    regions: [Option<NodeId>; 5],
}

/// A region's child with its hint and constraints.
type Occupant = (NodeId, SizeHint, BorderConstraints);

impl BorderPane {
    /// Create an empty pane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `node` in `region`, returning the node it replaces.
    ///
    /// `None` empties the region.
    pub fn set_region(&mut self, region: BorderRegion, node: Option<NodeId>) -> Option<NodeId> {
        let previous = self.regions[region.index()].take();
        if let Some(old) = previous {
            self.base.remove_child(old);
        }
        if let Some(node) = node {
            if let Some(other) = self.region_of(node) {
                self.regions[other.index()] = None;
                self.base.remove_child(node);
            }
            self.base.add_child(node);
        }
        self.regions[region.index()] = node;
        previous
    }

    /// The node in `region`.
    pub fn region(&self, region: BorderRegion) -> Option<NodeId> {
        self.regions[region.index()]
    }

    /// The region holding `node`.
    pub fn region_of(&self, node: NodeId) -> Option<BorderRegion> {
        BorderRegion::ALL.into_iter().find(|r| self.regions[r.index()] == Some(node))
    }

    /// Place `node` in the top region, returning the node it replaces.
    pub fn set_top(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        self.set_region(BorderRegion::Top, node)
    }

    /// Place `node` in the right region, returning the node it replaces.
    pub fn set_right(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        self.set_region(BorderRegion::Right, node)
    }

    /// Place `node` in the bottom region, returning the node it replaces.
    pub fn set_bottom(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        self.set_region(BorderRegion::Bottom, node)
    }

    /// Place `node` in the left region, returning the node it replaces.
    pub fn set_left(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        self.set_region(BorderRegion::Left, node)
    }

    /// Place `node` in the center, returning the node it replaces.
    pub fn set_center(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        self.set_region(BorderRegion::Center, node)
    }

    /// Override a child's alignment within its region.
    pub fn set_child_alignment(&mut self, node: NodeId, alignment: Option<Pos>) {
        if let Some(constraints) = self.base.constraints_mut(node) {
            constraints.alignment = alignment;
        }
    }

    /// Set a child's margin.
    pub fn set_child_margin(&mut self, node: NodeId, margin: Insets) {
        if let Some(constraints) = self.base.constraints_mut(node) {
            constraints.margin = margin;
        }
    }

    fn occupant<S: NodeAccess>(&self, storage: &S, region: BorderRegion) -> Option<Occupant> {
        let node = self.regions[region.index()]?;
        let hint = storage.size_hint(node)?;
        let constraints = self.base.constraints(node).copied().unwrap_or_default();
        Some((node, hint, constraints))
    }

    /// Sum of a measurement across the regions, arranged as the pane does.
    fn measure<S: NodeAccess>(&self, storage: &S, width: impl Fn(&SizeHint) -> f32, height: impl Fn(&SizeHint) -> f32) -> (f32, f32) {
        let outer_width = |region| {
            self.occupant(storage, region)
                .map_or(0.0, |(_, hint, c)| width(&hint) + c.margin.horizontal())
        };
        let outer_height = |region| {
            self.occupant(storage, region)
                .map_or(0.0, |(_, hint, c)| height(&hint) + c.margin.vertical())
        };

        let middle_width =
            outer_width(BorderRegion::Left) + outer_width(BorderRegion::Center) + outer_width(BorderRegion::Right);
        let middle_height = outer_height(BorderRegion::Left)
            .max(outer_height(BorderRegion::Center))
            .max(outer_height(BorderRegion::Right));

        let total_width = outer_width(BorderRegion::Top).max(outer_width(BorderRegion::Bottom)).max(middle_width);
        let total_height = outer_height(BorderRegion::Top) + middle_height + outer_height(BorderRegion::Bottom);
        (total_width, total_height)
    }
}

impl Layout for BorderPane {
    type Constraints = BorderConstraints;

    fn base(&self) -> &LayoutBase<BorderConstraints> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayoutBase<BorderConstraints> {
        &mut self.base
    }

    fn compute_min_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        self.base.padding().horizontal() + self.measure(storage, |h| h.min.width, |h| h.min.height).0
    }

    fn compute_min_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        self.base.padding().vertical() + self.measure(storage, |h| h.min.width, |h| h.min.height).1
    }

    fn compute_pref_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        self.base.padding().horizontal()
            + self
                .measure(storage, SizeHint::bounded_pref_width, SizeHint::bounded_pref_height)
                .0
    }

    fn compute_pref_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        self.base.padding().vertical()
            + self
                .measure(storage, SizeHint::bounded_pref_width, SizeHint::bounded_pref_height)
                .1
    }

    fn layout_children<S: NodeAccess>(&self, storage: &mut S) {
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        let content = self.base.content_rect();

        let top = self.occupant(&*storage, BorderRegion::Top);
        let bottom = self.occupant(&*storage, BorderRegion::Bottom);
        let left = self.occupant(&*storage, BorderRegion::Left);
        let right = self.occupant(&*storage, BorderRegion::Right);
        let center = self.occupant(&*storage, BorderRegion::Center);

        let pref_height = |o: &Option<Occupant>| o.map_or(0.0, |(_, hint, c)| hint.bounded_pref_height() + c.margin.vertical());
        let pref_width = |o: &Option<Occupant>| o.map_or(0.0, |(_, hint, c)| hint.bounded_pref_width() + c.margin.horizontal());

        let top_height = pref_height(&top).min(content.height());
        let bottom_height = pref_height(&bottom).min(content.height() - top_height);
        let middle_height = (content.height() - top_height - bottom_height).max(0.0);
        let left_width = pref_width(&left).min(content.width());
        let right_width = pref_width(&right).min(content.width() - left_width);
        let center_width = (content.width() - left_width - right_width).max(0.0);
        let middle_top = content.top() + top_height;

        tracing::trace!(
            target: targets::LAYOUT,
            top_height,
            bottom_height,
            left_width,
            right_width,
            "border pane layout"
        );

        let areas = [
            (BorderRegion::Top, top, Rect::new(content.left(), content.top(), content.width(), top_height)),
            (
                BorderRegion::Bottom,
                bottom,
                Rect::new(content.left(), content.bottom() - bottom_height, content.width(), bottom_height),
            ),
            (BorderRegion::Left, left, Rect::new(content.left(), middle_top, left_width, middle_height)),
            (
                BorderRegion::Right,
                right,
                Rect::new(content.right() - right_width, middle_top, right_width, middle_height),
            ),
            (
                BorderRegion::Center,
                center,
                Rect::new(content.left() + left_width, middle_top, center_width, middle_height),
            ),
        ];
        for (region, occupant, area) in areas {
            if let Some((node, _, constraints)) = occupant {
                let alignment = constraints.alignment.unwrap_or(region.default_alignment());
                layout_in_area(storage, node, area, AreaPlacement::fill(constraints.margin, alignment));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::MockStorage;
    use horizon_controls_core::Size;

    #[test]
    fn test_regions_allocate_edges_first() {
        let mut storage = MockStorage::new();
        let top = storage.add(Size::new(50.0, 20.0));
        let bottom = storage.add(Size::new(50.0, 10.0));
        let left = storage.add(Size::new(30.0, 50.0));
        let right = storage.add(Size::new(40.0, 50.0));
        let center = storage.add(Size::new(10.0, 10.0));

        let mut pane = BorderPane::new();
        pane.set_top(Some(top));
        pane.set_bottom(Some(bottom));
        pane.set_left(Some(left));
        pane.set_right(Some(right));
        pane.set_center(Some(center));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(storage.bounds_of(top), Rect::new(0.0, 0.0, 200.0, 20.0));
        assert_eq!(storage.bounds_of(bottom), Rect::new(0.0, 90.0, 200.0, 10.0));
        assert_eq!(storage.bounds_of(left), Rect::new(0.0, 20.0, 30.0, 70.0));
        assert_eq!(storage.bounds_of(right), Rect::new(160.0, 20.0, 40.0, 70.0));
        assert_eq!(storage.bounds_of(center), Rect::new(30.0, 20.0, 130.0, 70.0));
    }

    #[test]
    fn test_empty_regions_take_no_space() {
        let mut storage = MockStorage::new();
        let center = storage.add(Size::new(10.0, 10.0));
        let mut pane = BorderPane::new();
        pane.set_center(Some(center));
        pane.set_padding(Insets::uniform(5.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 60.0));
        assert_eq!(storage.bounds_of(center), Rect::new(5.0, 5.0, 90.0, 50.0));
    }

    #[test]
    fn test_edges_capped_to_available_space() {
        let mut storage = MockStorage::new();
        let top = storage.add(Size::new(10.0, 80.0));
        let bottom = storage.add(Size::new(10.0, 80.0));
        let mut pane = BorderPane::new();
        pane.set_top(Some(top));
        pane.set_bottom(Some(bottom));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 50.0, 100.0));

        assert_eq!(storage.bounds_of(top).height(), 80.0);
        assert_eq!(storage.bounds_of(bottom), Rect::new(0.0, 80.0, 50.0, 20.0));
    }

    #[test]
    fn test_pref_size_sums_regions() {
        let mut storage = MockStorage::new();
        let top = storage.add(Size::new(100.0, 20.0));
        let left = storage.add(Size::new(30.0, 50.0));
        let center = storage.add(Size::new(80.0, 60.0));
        let mut pane = BorderPane::new();
        pane.set_top(Some(top));
        pane.set_left(Some(left));
        pane.set_center(Some(center));
        pane.set_child_margin(center, Insets::uniform(2.0));

        assert_eq!(pane.compute_pref_width(&storage, None), 114.0);
        assert_eq!(pane.compute_pref_height(&storage, None), 84.0);
        assert_eq!(pane.compute_min_width(&storage, None), 4.0);
    }

    #[test]
    fn test_moving_node_between_regions() {
        let mut storage = MockStorage::new();
        let node = storage.add(Size::new(10.0, 10.0));
        let mut pane = BorderPane::new();
        pane.set_top(Some(node));
        assert_eq!(pane.set_left(Some(node)), None);
        assert_eq!(pane.region(BorderRegion::Top), None);
        assert_eq!(pane.region_of(node), Some(BorderRegion::Left));
        assert_eq!(pane.children().len(), 1);

        assert_eq!(pane.set_left(None), Some(node));
        assert!(pane.children().is_empty());
    }
}
