//! Tile pane: uniformly sized tiles that wrap at the content edge.
//!
//! Every child gets a tile of the same size. A horizontal pane fills rows
//! left to right and wraps to a new row when the next tile would not fit; a
//! vertical pane fills columns top to bottom.
//!
//! # Ragged Last Row
//!
//! When the last row (or column) holds fewer tiles than the others, it is
//! aligned on its own using the pane's alignment, so a centered pane centers
//! the short row instead of leaving a gap on its right.
//!
//! ```
//! use horizon_controls::layout::{Layout, NodeAccess, NodeId, Pos, SizeHint, TilePane};
//! use horizon_controls::control::Orientation;
//! use horizon_controls_core::{Rect, Size};
//! use slotmap::SlotMap;
//!
//! struct Nodes(SlotMap<NodeId, (SizeHint, Rect)>);
//!
//! impl NodeAccess for Nodes {
//!     fn size_hint(&self, node: NodeId) -> Option<SizeHint> {
//!         self.0.get(node).map(|n| n.0)
//!     }
//!     fn bounds(&self, node: NodeId) -> Option<Rect> {
//!         self.0.get(node).map(|n| n.1)
//!     }
//!     fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
//!         if let Some(n) = self.0.get_mut(node) {
//!             n.1 = bounds;
//!         }
//!     }
//! }
//!
//! let mut nodes = Nodes(SlotMap::with_key());
//! let mut pane = TilePane::new(Orientation::Horizontal).with_alignment(Pos::TopCenter);
//! let ids: Vec<NodeId> = (0..7)
//!     .map(|_| nodes.0.insert((SizeHint::new(Size::new(50.0, 20.0)), Rect::ZERO)))
//!     .collect();
//! for &id in &ids {
//!     pane.add_child(id);
//! }
//!
//! pane.layout(&mut nodes, Rect::new(0.0, 0.0, 150.0, 100.0));
//! assert_eq!(pane.actual_columns(), 3);
//! // The single tile of the last row sits in the middle.
//! assert_eq!(nodes.bounds(ids[6]).unwrap().left(), 50.0);
//! ```

use std::cell::Cell;

use horizon_controls_core::logging::{span_names, targets};
use horizon_controls_core::{Insets, PerfSpan, Rect};

use super::area::{AreaPlacement, HPos, Pos, VPos, layout_in_area, x_offset, y_offset};
use super::base::LayoutBase;
use super::traits::{Layout, NodeAccess, NodeId};
use crate::control::Orientation;

/// Default number of preferred columns (horizontal) or rows (vertical).
pub const DEFAULT_PREF_TILES: usize = 5;

/// Per-child tile constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileConstraints {
    /// Overrides the pane's tile alignment for this child.
    pub alignment: Option<Pos>,
    /// Space around the child inside its tile.
    pub margin: Insets,
}

/// Lays children out in uniformly sized tiles.
#[derive(Debug, Clone)]
pub struct TilePane {
    base: LayoutBase<TileConstraints>,
    orientation: Orientation,
    pref_columns: usize,
    pref_rows: usize,
    pref_tile_width: Option<f32>,
    pref_tile_height: Option<f32>,
    hgap: f32,
    vgap: f32,
    alignment: Pos,
    tile_alignment: Pos,
    actual_columns: Cell<usize>,
    actual_rows: Cell<usize>,
}

impl TilePane {
    /// Create an empty pane with the given orientation.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: LayoutBase::new(),
            orientation,
            pref_columns: DEFAULT_PREF_TILES,
            pref_rows: DEFAULT_PREF_TILES,
            pref_tile_width: None,
            pref_tile_height: None,
            hgap: 0.0,
            vgap: 0.0,
            alignment: Pos::TopLeft,
            tile_alignment: Pos::Center,
            actual_columns: Cell::new(0),
            actual_rows: Cell::new(0),
        }
    }

    /// Set both gaps.
    pub fn with_gaps(mut self, hgap: f32, vgap: f32) -> Self {
        self.hgap = hgap.max(0.0);
        self.vgap = vgap.max(0.0);
        self
    }

    /// Set the alignment of the tile grid inside the content box.
    pub fn with_alignment(mut self, alignment: Pos) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set a fixed tile size. `None` computes it from the largest child.
    pub fn with_tile_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.pref_tile_width = width;
        self.pref_tile_height = height;
        self
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Append a child.
    pub fn add_child(&mut self, node: NodeId) -> bool {
        self.base.add_child(node)
    }

    /// Remove a child.
    pub fn remove_child(&mut self, node: NodeId) -> bool {
        self.base.remove_child(node).is_some()
    }

    /// Override one child's alignment inside its tile.
    pub fn set_child_alignment(&mut self, node: NodeId, alignment: Option<Pos>) {
        if let Some(constraints) = self.base.constraints_mut(node) {
            constraints.alignment = alignment;
        }
    }

    /// Set one child's margin.
    pub fn set_child_margin(&mut self, node: NodeId, margin: Insets) {
        if let Some(constraints) = self.base.constraints_mut(node) {
            constraints.margin = margin;
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Direction tiles flow in before wrapping.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the flow direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.base.invalidate();
    }

    /// Preferred column count.
    pub fn pref_columns(&self) -> usize {
        self.pref_columns
    }

    /// Preferred column count of a horizontal pane.
    pub fn set_pref_columns(&mut self, columns: usize) {
        self.pref_columns = columns.max(1);
        self.base.invalidate();
    }

    /// Preferred row count.
    pub fn pref_rows(&self) -> usize {
        self.pref_rows
    }

    /// Preferred row count of a vertical pane.
    pub fn set_pref_rows(&mut self, rows: usize) {
        self.pref_rows = rows.max(1);
        self.base.invalidate();
    }

    /// Horizontal gap between tiles.
    pub fn hgap(&self) -> f32 {
        self.hgap
    }

    /// Set the horizontal gap; negative values clamp to zero.
    pub fn set_hgap(&mut self, hgap: f32) {
        self.hgap = hgap.max(0.0);
        self.base.invalidate();
    }

    /// Vertical gap between tiles.
    pub fn vgap(&self) -> f32 {
        self.vgap
    }

    /// Set the vertical gap; negative values clamp to zero.
    pub fn set_vgap(&mut self, vgap: f32) {
        self.vgap = vgap.max(0.0);
        self.base.invalidate();
    }

    /// Alignment of the tile grid, and of a short last row or column.
    pub fn alignment(&self) -> Pos {
        self.alignment
    }

    /// Change the grid alignment.
    pub fn set_alignment(&mut self, alignment: Pos) {
        self.alignment = alignment;
        self.base.invalidate();
    }

    /// Default alignment of each child inside its tile.
    pub fn tile_alignment(&self) -> Pos {
        self.tile_alignment
    }

    /// Change the default in-tile alignment.
    pub fn set_tile_alignment(&mut self, alignment: Pos) {
        self.tile_alignment = alignment;
        self.base.invalidate();
    }

    /// Fixed tile width, or `None` to use the widest child.
    pub fn set_pref_tile_width(&mut self, width: Option<f32>) {
        self.pref_tile_width = width;
        self.base.invalidate();
    }

    /// Fixed tile height, or `None` to use the tallest child.
    pub fn set_pref_tile_height(&mut self, height: Option<f32>) {
        self.pref_tile_height = height;
        self.base.invalidate();
    }

    /// Columns used by the last layout pass.
    pub fn actual_columns(&self) -> usize {
        self.actual_columns.get()
    }

    /// Rows used by the last layout pass.
    pub fn actual_rows(&self) -> usize {
        self.actual_rows.get()
    }

    // =========================================================================
    // Tile Geometry
    // =========================================================================

    /// The tile width: the fixed width, or the widest child including margin.
    pub fn tile_width<S: NodeAccess>(&self, storage: &S) -> f32 {
        self.pref_tile_width.unwrap_or_else(|| {
            self.base
                .managed(storage)
                .map(|(_, hint, c)| hint.bounded_pref_width() + c.margin.horizontal())
                .fold(0.0, f32::max)
        })
    }

    /// The tile height: the fixed height, or the tallest child including margin.
    pub fn tile_height<S: NodeAccess>(&self, storage: &S) -> f32 {
        self.pref_tile_height.unwrap_or_else(|| {
            self.base
                .managed(storage)
                .map(|(_, hint, c)| hint.bounded_pref_height() + c.margin.vertical())
                .fold(0.0, f32::max)
        })
    }

    fn managed_count<S: NodeAccess>(&self, storage: &S) -> usize {
        self.base.managed(storage).count()
    }

    fn columns_fitting(&self, width: f32, tile_width: f32) -> usize {
        tiles_fitting(width, tile_width, self.hgap)
    }

    fn rows_fitting(&self, height: f32, tile_height: f32) -> usize {
        tiles_fitting(height, tile_height, self.vgap)
    }

    fn content_width(&self, columns: usize, tile_width: f32) -> f32 {
        span_extent(columns, tile_width, self.hgap)
    }

    fn content_height(&self, rows: usize, tile_height: f32) -> f32 {
        span_extent(rows, tile_height, self.vgap)
    }
}

impl Default for TilePane {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

/// How many tiles of `tile` extent fit in `available`, at least one.
fn tiles_fitting(available: f32, tile: f32, gap: f32) -> usize {
    let step = tile + gap;
    if step <= 0.0 {
        return 1;
    }
    (((available + gap) / step).floor() as usize).max(1)
}

/// Count of cells needed in the other direction.
fn other_count(items: usize, cells: usize) -> usize {
    items.div_ceil(cells.max(1))
}

fn span_extent(count: usize, tile: f32, gap: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * tile + (count - 1) as f32 * gap
}

impl Layout for TilePane {
    type Constraints = TileConstraints;

    fn base(&self) -> &LayoutBase<TileConstraints> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayoutBase<TileConstraints> {
        &mut self.base
    }

    fn compute_min_width<S: NodeAccess>(&self, storage: &S, height: Option<f32>) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.base.padding().horizontal() + self.tile_width(storage),
            Orientation::Vertical => self.compute_pref_width(storage, height),
        }
    }

    fn compute_min_height<S: NodeAccess>(&self, storage: &S, width: Option<f32>) -> f32 {
        match self.orientation {
            Orientation::Vertical => self.base.padding().vertical() + self.tile_height(storage),
            Orientation::Horizontal => self.compute_pref_height(storage, width),
        }
    }

    fn compute_pref_width<S: NodeAccess>(&self, storage: &S, height: Option<f32>) -> f32 {
        let padding = self.base.padding();
        let count = self.managed_count(storage);
        let columns = match height {
            Some(height) => {
                let rows = self.rows_fitting(height - padding.vertical(), self.tile_height(storage));
                other_count(count, rows)
            }
            None => match self.orientation {
                Orientation::Horizontal => self.pref_columns,
                Orientation::Vertical => other_count(count, self.pref_rows),
            },
        };
        padding.horizontal() + self.content_width(columns, self.tile_width(storage))
    }

    fn compute_pref_height<S: NodeAccess>(&self, storage: &S, width: Option<f32>) -> f32 {
        let padding = self.base.padding();
        let count = self.managed_count(storage);
        let rows = match width {
            Some(width) => {
                let columns = self.columns_fitting(width - padding.horizontal(), self.tile_width(storage));
                other_count(count, columns)
            }
            None => match self.orientation {
                Orientation::Horizontal => other_count(count, self.pref_columns),
                Orientation::Vertical => self.pref_rows,
            },
        };
        padding.vertical() + self.content_height(rows, self.tile_height(storage))
    }

    fn layout_children<S: NodeAccess>(&self, storage: &mut S) {
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);

        let managed: Vec<(NodeId, TileConstraints)> = self.base.managed(&*storage).map(|(node, _, c)| (node, *c)).collect();
        let count = managed.len();
        let content = self.base.content_rect();
        let hpos = self.alignment.hpos();
        let vpos = self.alignment.vpos();

        let tile_width = self.tile_width(&*storage).min(content.width());
        let tile_height = self.tile_height(&*storage).min(content.height());

        let (columns, rows, last_row_remainder, last_column_remainder) = match self.orientation {
            Orientation::Horizontal => {
                let columns = self.columns_fitting(content.width(), tile_width);
                let rows = other_count(count, columns);
                let remainder = if hpos != HPos::Left {
                    (columns * rows).saturating_sub(count).min(columns)
                } else {
                    0
                };
                (columns, rows, columns - remainder, 0)
            }
            Orientation::Vertical => {
                let rows = self.rows_fitting(content.height(), tile_height);
                let columns = other_count(count, rows);
                let remainder = if vpos != VPos::Top {
                    (columns * rows).saturating_sub(count).min(rows)
                } else {
                    0
                };
                (columns, rows, 0, rows - remainder)
            }
        };
        self.actual_columns.set(columns);
        self.actual_rows.set(rows);

        let row_x = content.left() + x_offset(content.width(), self.content_width(columns, tile_width), hpos);
        let column_y = content.top() + y_offset(content.height(), self.content_height(rows, tile_height), vpos);
        let last_row_x = if last_row_remainder > 0 && last_row_remainder < columns {
            content.left() + x_offset(content.width(), self.content_width(last_row_remainder, tile_width), hpos)
        } else {
            row_x
        };
        let last_column_y = if last_column_remainder > 0 && last_column_remainder < rows {
            content.top() + y_offset(content.height(), self.content_height(last_column_remainder, tile_height), vpos)
        } else {
            column_y
        };

        tracing::trace!(
            target: targets::LAYOUT,
            count,
            columns,
            rows,
            tile_width,
            tile_height,
            "tile pane layout"
        );

        let (mut row, mut column) = (0, 0);
        for (node, constraints) in managed {
            let x = if row + 1 == rows { last_row_x } else { row_x };
            let y = if column + 1 == columns { last_column_y } else { column_y };
            let tile = Rect::new(
                x + column as f32 * (tile_width + self.hgap),
                y + row as f32 * (tile_height + self.vgap),
                tile_width,
                tile_height,
            );
            let alignment = constraints.alignment.unwrap_or(self.tile_alignment);
            layout_in_area(storage, node, tile, AreaPlacement::fill(constraints.margin, alignment));

            match self.orientation {
                Orientation::Horizontal => {
                    column += 1;
                    if column == columns {
                        column = 0;
                        row += 1;
                    }
                }
                Orientation::Vertical => {
                    row += 1;
                    if row == rows {
                        row = 0;
                        column += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::MockStorage;
    use horizon_controls_core::Size;

    fn pane_with(storage: &mut MockStorage, pane: &mut TilePane, count: usize, size: Size) -> Vec<NodeId> {
        (0..count)
            .map(|_| {
                let id = storage.add(size);
                pane.add_child(id);
                id
            })
            .collect()
    }

    #[test]
    fn test_columns_from_width() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Horizontal).with_gaps(10.0, 5.0);
        let ids = pane_with(&mut storage, &mut pane, 5, Size::new(40.0, 20.0));

        pane.layout(&mut storage, Rect::new(0.0, 0.0, 120.0, 200.0));
        assert_eq!(pane.actual_columns(), 2);
        assert_eq!(pane.actual_rows(), 3);
        assert_eq!(storage.bounds_of(ids[1]), Rect::new(50.0, 0.0, 40.0, 20.0));
        assert_eq!(storage.bounds_of(ids[2]), Rect::new(0.0, 25.0, 40.0, 20.0));
    }

    #[test]
    fn test_left_aligned_last_row_stays_in_grid() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Horizontal);
        let ids = pane_with(&mut storage, &mut pane, 7, Size::new(50.0, 10.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 150.0, 100.0));
        assert_eq!(storage.bounds_of(ids[6]).left(), 0.0);
    }

    #[test]
    fn test_vertical_fills_columns() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Vertical).with_alignment(Pos::CenterLeft);
        let ids = pane_with(&mut storage, &mut pane, 5, Size::new(30.0, 30.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 200.0, 90.0));

        assert_eq!(pane.actual_rows(), 3);
        assert_eq!(pane.actual_columns(), 2);
        assert_eq!(storage.bounds_of(ids[2]).top(), 60.0);
        assert_eq!(storage.bounds_of(ids[3]), Rect::new(30.0, 15.0, 30.0, 30.0));
    }

    #[test]
    fn test_child_alignment_override_and_margin() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Horizontal).with_tile_size(Some(100.0), Some(100.0));
        let small = storage.add_hint(crate::layout::SizeHint::new(Size::new(20.0, 20.0)).with_max(Size::new(20.0, 20.0)));
        pane.add_child(small);
        pane.set_child_alignment(small, Some(Pos::BottomRight));
        pane.set_child_margin(small, Insets::uniform(5.0));

        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(storage.bounds_of(small), Rect::new(75.0, 75.0, 20.0, 20.0));
    }

    #[test]
    fn test_pref_size_uses_pref_columns() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Horizontal).with_gaps(2.0, 4.0);
        pane.set_pref_columns(3);
        pane_with(&mut storage, &mut pane, 7, Size::new(10.0, 10.0));
        pane.set_padding(Insets::uniform(1.0));

        assert_eq!(pane.compute_pref_width(&storage, None), 2.0 + 34.0);
        assert_eq!(pane.compute_pref_height(&storage, None), 2.0 + 38.0);
        assert_eq!(pane.compute_pref_height(&storage, Some(2.0 + 22.0)), 2.0 + 10.0 * 4.0 + 12.0);
        assert_eq!(pane.compute_min_width(&storage, None), 12.0);
    }

    #[test]
    fn test_tile_clamped_to_content() {
        let mut storage = MockStorage::new();
        let mut pane = TilePane::new(Orientation::Horizontal);
        let ids = pane_with(&mut storage, &mut pane, 2, Size::new(300.0, 10.0));
        pane.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(storage.bounds_of(ids[0]).width(), 100.0);
        assert_eq!(pane.actual_columns(), 1);
    }
}
