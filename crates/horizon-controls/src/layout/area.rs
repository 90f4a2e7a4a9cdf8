//! Alignment types and area placement shared by the panes.

use horizon_controls_core::{Insets, Rect};

use super::traits::{NodeAccess, NodeId, SizeHint};

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HPos {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VPos {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Combined horizontal and vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pos {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Pos {
    /// Combine a vertical and a horizontal alignment.
    pub const fn new(vpos: VPos, hpos: HPos) -> Self {
        match (vpos, hpos) {
            (VPos::Top, HPos::Left) => Pos::TopLeft,
            (VPos::Top, HPos::Center) => Pos::TopCenter,
            (VPos::Top, HPos::Right) => Pos::TopRight,
            (VPos::Center, HPos::Left) => Pos::CenterLeft,
            (VPos::Center, HPos::Center) => Pos::Center,
            (VPos::Center, HPos::Right) => Pos::CenterRight,
            (VPos::Bottom, HPos::Left) => Pos::BottomLeft,
            (VPos::Bottom, HPos::Center) => Pos::BottomCenter,
            (VPos::Bottom, HPos::Right) => Pos::BottomRight,
        }
    }

    /// The horizontal component.
    pub const fn hpos(self) -> HPos {
        match self {
            Pos::TopLeft | Pos::CenterLeft | Pos::BottomLeft => HPos::Left,
            Pos::TopCenter | Pos::Center | Pos::BottomCenter => HPos::Center,
            Pos::TopRight | Pos::CenterRight | Pos::BottomRight => HPos::Right,
        }
    }

    /// The vertical component.
    pub const fn vpos(self) -> VPos {
        match self {
            Pos::TopLeft | Pos::TopCenter | Pos::TopRight => VPos::Top,
            Pos::CenterLeft | Pos::Center | Pos::CenterRight => VPos::Center,
            Pos::BottomLeft | Pos::BottomCenter | Pos::BottomRight => VPos::Bottom,
        }
    }
}

/// Offset of `content` inside `width` for the given alignment.
pub fn x_offset(width: f32, content: f32, hpos: HPos) -> f32 {
    match hpos {
        HPos::Left => 0.0,
        HPos::Center => (width - content) / 2.0,
        HPos::Right => width - content,
    }
}

/// Offset of `content` inside `height` for the given alignment.
pub fn y_offset(height: f32, content: f32, vpos: VPos) -> f32 {
    match vpos {
        VPos::Top => 0.0,
        VPos::Center => (height - content) / 2.0,
        VPos::Bottom => height - content,
    }
}

/// How a child is placed inside its layout area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaPlacement {
    pub margin: Insets,
    pub fill_width: bool,
    pub fill_height: bool,
    pub hpos: HPos,
    pub vpos: VPos,
}

impl AreaPlacement {
    /// Fill the area in both directions, aligned by `pos` when capped by max size.
    pub fn fill(margin: Insets, pos: Pos) -> Self {
        Self {
            margin,
            fill_width: true,
            fill_height: true,
            hpos: pos.hpos(),
            vpos: pos.vpos(),
        }
    }
}

/// The size a child takes inside an area of `available` extent.
///
/// Filling children grow toward the area, others keep their preferred size.
/// Either way the result lies within the child's `[min, max]` and never
/// exceeds the area.
fn area_extent(available: f32, min: f32, pref: f32, max: f32, fill: bool) -> f32 {
    let wanted = if fill { available.min(max) } else { pref.min(max) };
    wanted.max(min).min(available).max(0.0)
}

/// Size and position `node` inside `area`, honouring margin and alignment.
///
/// Returns the assigned bounds, or `None` if the host does not know the node.
pub fn layout_in_area<S: NodeAccess>(storage: &mut S, node: NodeId, area: Rect, placement: AreaPlacement) -> Option<Rect> {
    let hint = storage.size_hint(node)?;
    let bounds = place_in_area(hint, area, placement);
    storage.set_bounds(node, bounds);
    Some(bounds)
}

/// Bounds a child with `hint` would receive inside `area`.
pub fn place_in_area(hint: SizeHint, area: Rect, placement: AreaPlacement) -> Rect {
    let margin = placement.margin;
    let inner_width = (area.width() - margin.horizontal()).max(0.0);
    let inner_height = (area.height() - margin.vertical()).max(0.0);

    let width = area_extent(inner_width, hint.min.width, hint.pref.width, hint.max.width, placement.fill_width);
    let height = area_extent(
        inner_height,
        hint.min.height,
        hint.pref.height,
        hint.max.height,
        placement.fill_height,
    );

    let x = area.left() + margin.left + x_offset(inner_width, width, placement.hpos);
    let y = area.top() + margin.top + y_offset(inner_height, height, placement.vpos);
    Rect::new(x, y, width, height)
}
