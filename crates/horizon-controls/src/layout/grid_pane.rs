//! Grid pane: children placed in row/column cells.
//!
//! Children sit at a (column, row) position and may span several tracks.
//! Track sizes start from the children's preferred sizes, adjusted by
//! [`ColumnConstraints`] and [`RowConstraints`]:
//!
//! - A fixed min/pref/max overrides what the children report.
//! - A percentage sizes the track against the content box.
//! - Surplus space goes to `Always` tracks, or to `Sometimes` tracks when
//!   no track is `Always`.
//! - A deficit shrinks tracks toward their minimums, in proportion to how
//!   far each can shrink.
//!
//! ```ignore
//! let mut grid = GridPane::new().with_gaps(4.0, 4.0);
//! grid.add(label, 0, 0);
//! grid.add(field, 1, 0);
//! grid.add_spanning(notes, 0, 1, 2, 1);
//! grid.set_column_constraints(1, ColumnConstraints::new().with_grow(Priority::Always));
//! ```

use horizon_controls_core::logging::{span_names, targets};
use horizon_controls_core::{Insets, PerfSpan, Rect};

use super::area::{AreaPlacement, HPos, Pos, VPos, layout_in_area, x_offset, y_offset};
use super::base::LayoutBase;
use super::traits::{Layout, NodeAccess, NodeId};

/// How eagerly a track takes surplus space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    Never,
    Sometimes,
    Always,
}

// =============================================================================
// Constraints
// =============================================================================

/// Where a child sits in the grid and how it fills its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConstraints {
    pub column: usize,
    pub row: usize,
    pub column_span: usize,
    pub row_span: usize,
    /// Overrides the column's alignment.
    pub halignment: Option<HPos>,
    /// Overrides the row's alignment.
    pub valignment: Option<VPos>,
    /// Raises the column's grow priority.
    pub hgrow: Option<Priority>,
    /// Raises the row's grow priority.
    pub vgrow: Option<Priority>,
    pub margin: Insets,
    pub fill_width: Option<bool>,
    pub fill_height: Option<bool>,
}

impl GridConstraints {
    /// A single cell at `column`, `row`.
    pub const fn at(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            column_span: 1,
            row_span: 1,
            halignment: None,
            valignment: None,
            hgrow: None,
            vgrow: None,
            margin: Insets::EMPTY,
            fill_width: None,
            fill_height: None,
        }
    }

    /// Span `columns` by `rows` cells. Spans are at least one.
    pub const fn with_span(mut self, columns: usize, rows: usize) -> Self {
        self.column_span = if columns == 0 { 1 } else { columns };
        self.row_span = if rows == 0 { 1 } else { rows };
        self
    }

    /// Alignment of the child within its cell area.
    pub const fn with_alignment(mut self, halignment: HPos, valignment: VPos) -> Self {
        self.halignment = Some(halignment);
        self.valignment = Some(valignment);
        self
    }

    /// Set how the child's column and row grow.
    pub const fn with_grow(mut self, hgrow: Priority, vgrow: Priority) -> Self {
        self.hgrow = Some(hgrow);
        self.vgrow = Some(vgrow);
        self
    }

    /// Space kept around the child inside its cell area.
    pub const fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Whether the child stretches to fill its cell area.
    pub const fn with_fill(mut self, fill_width: bool, fill_height: bool) -> Self {
        self.fill_width = Some(fill_width);
        self.fill_height = Some(fill_height);
        self
    }
}

impl Default for GridConstraints {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

/// Sizing of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnConstraints {
    pub min_width: Option<f32>,
    pub pref_width: Option<f32>,
    pub max_width: Option<f32>,
    /// Width as a percentage of the content box.
    pub percent_width: Option<f32>,
    pub hgrow: Priority,
    pub halignment: Option<HPos>,
    pub fill_width: bool,
}

impl ColumnConstraints {
    /// A column sized from its children.
    pub const fn new() -> Self {
        Self {
            min_width: None,
            pref_width: None,
            max_width: None,
            percent_width: None,
            hgrow: Priority::Never,
            halignment: None,
            fill_width: true,
        }
    }

    /// A column of exactly `width`.
    pub const fn fixed(width: f32) -> Self {
        let mut c = Self::new();
        c.min_width = Some(width);
        c.pref_width = Some(width);
        c.max_width = Some(width);
        c
    }

    /// Size the column as a percentage of the content width.
    pub const fn with_percent(mut self, percent: f32) -> Self {
        self.percent_width = Some(percent);
        self
    }

    /// Set the column's grow priority.
    pub const fn with_grow(mut self, hgrow: Priority) -> Self {
        self.hgrow = hgrow;
        self
    }

    /// Default horizontal alignment of the column's children.
    pub const fn with_alignment(mut self, halignment: HPos) -> Self {
        self.halignment = Some(halignment);
        self
    }

    /// Set explicit min, preferred and max widths.
    pub const fn with_sizes(mut self, min: Option<f32>, pref: Option<f32>, max: Option<f32>) -> Self {
        self.min_width = min;
        self.pref_width = pref;
        self.max_width = max;
        self
    }

    fn track(&self) -> TrackLimits {
        TrackLimits {
            min: self.min_width,
            pref: self.pref_width,
            max: self.max_width,
            percent: self.percent_width,
            grow: self.hgrow,
        }
    }
}

impl Default for ColumnConstraints {
    fn default() -> Self {
        Self::new()
    }
}

/// Sizing of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowConstraints {
    pub min_height: Option<f32>,
    pub pref_height: Option<f32>,
    pub max_height: Option<f32>,
    /// Height as a percentage of the content box.
    pub percent_height: Option<f32>,
    pub vgrow: Priority,
    pub valignment: Option<VPos>,
    pub fill_height: bool,
}

impl RowConstraints {
    /// A row sized from its children.
    pub const fn new() -> Self {
        Self {
            min_height: None,
            pref_height: None,
            max_height: None,
            percent_height: None,
            vgrow: Priority::Never,
            valignment: None,
            fill_height: true,
        }
    }

    /// A row of exactly `height`.
    pub const fn fixed(height: f32) -> Self {
        let mut r = Self::new();
        r.min_height = Some(height);
        r.pref_height = Some(height);
        r.max_height = Some(height);
        r
    }

    /// Size the row as a percentage of the content height.
    pub const fn with_percent(mut self, percent: f32) -> Self {
        self.percent_height = Some(percent);
        self
    }

    /// Set the row's grow priority.
    pub const fn with_grow(mut self, vgrow: Priority) -> Self {
        self.vgrow = vgrow;
        self
    }

    /// Default vertical alignment of the row's children.
    pub const fn with_alignment(mut self, valignment: VPos) -> Self {
        self.valignment = Some(valignment);
        self
    }

    /// Set explicit min, preferred and max heights.
    pub const fn with_sizes(mut self, min: Option<f32>, pref: Option<f32>, max: Option<f32>) -> Self {
        self.min_height = min;
        self.pref_height = pref;
        self.max_height = max;
        self
    }

    fn track(&self) -> TrackLimits {
        TrackLimits {
            min: self.min_height,
            pref: self.pref_height,
            max: self.max_height,
            percent: self.percent_height,
            grow: self.vgrow,
        }
    }
}

impl Default for RowConstraints {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Track Sizing
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct TrackLimits {
    min: Option<f32>,
    pref: Option<f32>,
    max: Option<f32>,
    percent: Option<f32>,
    grow: Priority,
}

#[derive(Debug, Clone, Copy)]
struct Track {
    min: f32,
    pref: f32,
    max: f32,
    percent: Option<f32>,
    grow: Priority,
}

/// A child's demand along one axis.
#[derive(Debug, Clone, Copy)]
struct Demand {
    start: usize,
    span: usize,
    min: f32,
    pref: f32,
    grow: Option<Priority>,
}

fn spanned_extent(values: impl Iterator<Item = f32>, span: usize, gap: f32) -> f32 {
    values.sum::<f32>() + gap * span.saturating_sub(1) as f32
}

/// Measure `count` tracks from the children's demands and the track limits.
fn measure_tracks(count: usize, limits: &[TrackLimits], demands: &[Demand], gap: f32) -> Vec<Track> {
    let mut tracks: Vec<Track> = (0..count)
        .map(|i| {
            let limit = limits.get(i).copied().unwrap_or_default();
            Track {
                min: 0.0,
                pref: 0.0,
                max: f32::MAX,
                percent: limit.percent,
                grow: limit.grow,
            }
        })
        .collect();

    for demand in demands.iter().filter(|d| d.span == 1) {
        let track = &mut tracks[demand.start];
        track.min = track.min.max(demand.min);
        track.pref = track.pref.max(demand.pref);
        if let Some(grow) = demand.grow {
            track.grow = track.grow.max(grow);
        }
    }

    for (track, limit) in tracks.iter_mut().zip(limits) {
        if let Some(min) = limit.min {
            track.min = min.max(0.0);
        }
        if let Some(pref) = limit.pref {
            track.pref = pref.max(0.0);
        }
        if let Some(max) = limit.max {
            track.max = max.max(track.min);
        }
        track.pref = track.pref.min(track.max).max(track.min);
    }

    // Spanning children spread any shortfall evenly over their tracks.
    for demand in demands.iter().filter(|d| d.span > 1) {
        let range = demand.start..demand.start + demand.span;
        let fixed = |i: usize| limits.get(i).is_some_and(|s| s.pref.is_some());

        let have_min = spanned_extent(tracks[range.clone()].iter().map(|t| t.min), demand.span, gap);
        let have_pref = spanned_extent(tracks[range.clone()].iter().map(|t| t.pref), demand.span, gap);
        let flexible: Vec<usize> = range.clone().filter(|&i| !fixed(i)).collect();
        if flexible.is_empty() {
            continue;
        }
        let share_min = (demand.min - have_min).max(0.0) / flexible.len() as f32;
        let share_pref = (demand.pref - have_pref).max(0.0) / flexible.len() as f32;
        for i in flexible {
            let track = &mut tracks[i];
            track.min += share_min;
            track.pref = (track.pref + share_pref).max(track.min).min(track.max.max(track.min));
            if let Some(grow) = demand.grow {
                track.grow = track.grow.max(grow);
            }
        }
    }

    tracks
}

/// Hand `surplus` out evenly to `candidates`, respecting each track's max.
fn grow_tracks(sizes: &mut [f32], tracks: &[Track], mut candidates: Vec<usize>, mut surplus: f32) {
    while surplus > f32::EPSILON && !candidates.is_empty() {
        let share = surplus / candidates.len() as f32;
        candidates.retain(|&i| {
            let room = (tracks[i].max - sizes[i]).max(0.0);
            let given = share.min(room);
            sizes[i] += given;
            surplus -= given;
            given < room
        });
    }
}

/// Final track sizes for `available` space (gaps already removed).
fn distribute(tracks: &[Track], available: f32) -> Vec<f32> {
    let mut sizes: Vec<f32> = tracks
        .iter()
        .map(|t| match t.percent {
            Some(percent) => (available * percent / 100.0).max(0.0),
            None => t.pref,
        })
        .collect();

    let extra = available - sizes.iter().sum::<f32>();
    if extra > 0.0 {
        for priority in [Priority::Always, Priority::Sometimes] {
            let candidates: Vec<usize> = tracks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.percent.is_none() && t.grow == priority)
                .map(|(i, _)| i)
                .collect();
            if !candidates.is_empty() {
                grow_tracks(&mut sizes, tracks, candidates, extra);
                break;
            }
        }
    } else if extra < 0.0 {
        let rooms: Vec<f32> = sizes.iter().zip(tracks).map(|(size, t)| (size - t.min).max(0.0)).collect();
        let total_room: f32 = rooms.iter().sum();
        if total_room > 0.0 {
            let deficit = (-extra).min(total_room);
            for ((size, room), track) in sizes.iter_mut().zip(&rooms).zip(tracks) {
                *size = (*size - deficit * (room / total_room)).max(track.min);
            }
        }
    }
    sizes
}

/// Start positions of consecutive tracks.
fn positions(sizes: &[f32], gap: f32, start: f32) -> Vec<f32> {
    let mut at = start;
    sizes
        .iter()
        .map(|size| {
            let position = at;
            at += size + gap;
            position
        })
        .collect()
}

fn sum_or_unbounded(values: impl Iterator<Item = f32>) -> f32 {
    let mut total = 0.0_f32;
    for value in values {
        if value >= f32::MAX {
            return f32::MAX;
        }
        total += value;
    }
    total
}

// =============================================================================
// GridPane
// =============================================================================

/// Lays children out in a grid of rows and columns.
#[derive(Debug, Clone, Default)]
pub struct GridPane {
    base: LayoutBase<GridConstraints>,
    column_constraints: Vec<ColumnConstraints>,
    row_constraints: Vec<RowConstraints>,
    hgap: f32,
    vgap: f32,
    alignment: Pos,
}

impl GridPane {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style gap setter; negative gaps clamp to zero.
    pub fn with_gaps(mut self, hgap: f32, vgap: f32) -> Self {
        self.hgap = hgap.max(0.0);
        self.vgap = vgap.max(0.0);
        self
    }

    /// Builder-style alignment setter.
    pub fn with_alignment(mut self, alignment: Pos) -> Self {
        self.alignment = alignment;
        self
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Place `node` in a single cell.
    pub fn add(&mut self, node: NodeId, column: usize, row: usize) -> bool {
        self.base.add_child_with(node, GridConstraints::at(column, row))
    }

    /// Place `node` spanning `column_span` by `row_span` cells.
    pub fn add_spanning(&mut self, node: NodeId, column: usize, row: usize, column_span: usize, row_span: usize) -> bool {
        self.base
            .add_child_with(node, GridConstraints::at(column, row).with_span(column_span, row_span))
    }

    /// Place `node` with full constraints.
    pub fn add_with(&mut self, node: NodeId, constraints: GridConstraints) -> bool {
        self.base.add_child_with(node, constraints)
    }

    /// Remove `node`, returning its constraints.
    pub fn remove(&mut self, node: NodeId) -> Option<GridConstraints> {
        self.base.remove_child(node)
    }

    /// A child's constraints.
    pub fn constraints(&self, node: NodeId) -> Option<GridConstraints> {
        self.base.constraints(node).copied()
    }

    /// Replace a child's constraints. Returns `false` if `node` is not a child.
    pub fn set_constraints(&mut self, node: NodeId, constraints: GridConstraints) -> bool {
        match self.base.constraints_mut(node) {
            Some(slot) => {
                *slot = constraints;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    /// Set the constraints of column `index`, adding default columns before it.
    pub fn set_column_constraints(&mut self, index: usize, constraints: ColumnConstraints) {
        if self.column_constraints.len() <= index {
            self.column_constraints.resize(index + 1, ColumnConstraints::new());
        }
        self.column_constraints[index] = constraints;
        self.base.invalidate();
    }

    /// Constraints of column `index`, if set.
    pub fn column_constraints(&self, index: usize) -> Option<&ColumnConstraints> {
        self.column_constraints.get(index)
    }

    /// Set the constraints of row `index`, adding default rows before it.
    pub fn set_row_constraints(&mut self, index: usize, constraints: RowConstraints) {
        if self.row_constraints.len() <= index {
            self.row_constraints.resize(index + 1, RowConstraints::new());
        }
        self.row_constraints[index] = constraints;
        self.base.invalidate();
    }

    /// Constraints of row `index`, if set.
    pub fn row_constraints(&self, index: usize) -> Option<&RowConstraints> {
        self.row_constraints.get(index)
    }

    /// Columns occupied by children or constrained explicitly.
    pub fn column_count(&self) -> usize {
        self.base
            .children()
            .iter()
            .filter_map(|&n| self.base.constraints(n))
            .map(|c| c.column + c.column_span)
            .chain(std::iter::once(self.column_constraints.len()))
            .max()
            .unwrap_or(0)
    }

    /// Rows occupied by children or constrained explicitly.
    pub fn row_count(&self) -> usize {
        self.base
            .children()
            .iter()
            .filter_map(|&n| self.base.constraints(n))
            .map(|c| c.row + c.row_span)
            .chain(std::iter::once(self.row_constraints.len()))
            .max()
            .unwrap_or(0)
    }

    /// Horizontal gap between columns.
    pub fn hgap(&self) -> f32 {
        self.hgap
    }

    /// Set the horizontal gap; negative values clamp to zero.
    pub fn set_hgap(&mut self, hgap: f32) {
        self.hgap = hgap.max(0.0);
        self.base.invalidate();
    }

    /// Vertical gap between rows.
    pub fn vgap(&self) -> f32 {
        self.vgap
    }

    /// Set the vertical gap; negative values clamp to zero.
    pub fn set_vgap(&mut self, vgap: f32) {
        self.vgap = vgap.max(0.0);
        self.base.invalidate();
    }

    /// Alignment of the grid within the pane.
    pub fn alignment(&self) -> Pos {
        self.alignment
    }

    /// Change the grid alignment.
    pub fn set_alignment(&mut self, alignment: Pos) {
        self.alignment = alignment;
        self.base.invalidate();
    }

    // =========================================================================
    // Private: Measurement
    // =========================================================================

    fn columns<S: NodeAccess>(&self, storage: &S) -> Vec<Track> {
        let demands: Vec<Demand> = self
            .base
            .managed(storage)
            .map(|(_, hint, c)| Demand {
                start: c.column,
                span: c.column_span,
                min: hint.min.width + c.margin.horizontal(),
                pref: hint.bounded_pref_width() + c.margin.horizontal(),
                grow: c.hgrow,
            })
            .collect();
        let limits: Vec<TrackLimits> = self.column_constraints.iter().map(ColumnConstraints::track).collect();
        measure_tracks(self.column_count(), &limits, &demands, self.hgap)
    }

    fn rows<S: NodeAccess>(&self, storage: &S) -> Vec<Track> {
        let demands: Vec<Demand> = self
            .base
            .managed(storage)
            .map(|(_, hint, c)| Demand {
                start: c.row,
                span: c.row_span,
                min: hint.min.height + c.margin.vertical(),
                pref: hint.bounded_pref_height() + c.margin.vertical(),
                grow: c.vgrow,
            })
            .collect();
        let limits: Vec<TrackLimits> = self.row_constraints.iter().map(RowConstraints::track).collect();
        measure_tracks(self.row_count(), &limits, &demands, self.vgap)
    }

    fn gaps(count: usize, gap: f32) -> f32 {
        gap * count.saturating_sub(1) as f32
    }
}

impl Layout for GridPane {
    type Constraints = GridConstraints;

    fn base(&self) -> &LayoutBase<GridConstraints> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayoutBase<GridConstraints> {
        &mut self.base
    }

    fn compute_min_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        let columns = self.columns(storage);
        self.base.padding().horizontal() + columns.iter().map(|t| t.min).sum::<f32>() + Self::gaps(columns.len(), self.hgap)
    }

    fn compute_min_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        let rows = self.rows(storage);
        self.base.padding().vertical() + rows.iter().map(|t| t.min).sum::<f32>() + Self::gaps(rows.len(), self.vgap)
    }

    fn compute_pref_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        let columns = self.columns(storage);
        self.base.padding().horizontal() + columns.iter().map(|t| t.pref).sum::<f32>() + Self::gaps(columns.len(), self.hgap)
    }

    fn compute_pref_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        let rows = self.rows(storage);
        self.base.padding().vertical() + rows.iter().map(|t| t.pref).sum::<f32>() + Self::gaps(rows.len(), self.vgap)
    }

    fn compute_max_width<S: NodeAccess>(&self, storage: &S, _height: Option<f32>) -> f32 {
        let columns = self.columns(storage);
        let tracks = sum_or_unbounded(columns.iter().map(|t| t.max));
        if columns.is_empty() || tracks >= f32::MAX {
            return f32::MAX;
        }
        self.base.padding().horizontal() + tracks + Self::gaps(columns.len(), self.hgap)
    }

    fn compute_max_height<S: NodeAccess>(&self, storage: &S, _width: Option<f32>) -> f32 {
        let rows = self.rows(storage);
        let tracks = sum_or_unbounded(rows.iter().map(|t| t.max));
        if rows.is_empty() || tracks >= f32::MAX {
            return f32::MAX;
        }
        self.base.padding().vertical() + tracks + Self::gaps(rows.len(), self.vgap)
    }

    fn layout_children<S: NodeAccess>(&self, storage: &mut S) {
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        let content = self.base.content_rect();

        let columns = self.columns(&*storage);
        let rows = self.rows(&*storage);
        let column_gaps = Self::gaps(columns.len(), self.hgap);
        let row_gaps = Self::gaps(rows.len(), self.vgap);
        let widths = distribute(&columns, (content.width() - column_gaps).max(0.0));
        let heights = distribute(&rows, (content.height() - row_gaps).max(0.0));

        let used_width = widths.iter().sum::<f32>() + column_gaps;
        let used_height = heights.iter().sum::<f32>() + row_gaps;
        let xs = positions(
            &widths,
            self.hgap,
            content.left() + x_offset(content.width(), used_width, self.alignment.hpos()).max(0.0),
        );
        let ys = positions(
            &heights,
            self.vgap,
            content.top() + y_offset(content.height(), used_height, self.alignment.vpos()).max(0.0),
        );

        tracing::trace!(
            target: targets::LAYOUT,
            columns = widths.len(),
            rows = heights.len(),
            used_width,
            used_height,
            "grid pane layout"
        );

        let cells: Vec<(NodeId, GridConstraints)> = self.base.managed(&*storage).map(|(node, _, c)| (node, *c)).collect();
        for (node, c) in cells {
            let column_end = (c.column + c.column_span).min(widths.len());
            let row_end = (c.row + c.row_span).min(heights.len());
            let (Some(&x), Some(&y)) = (xs.get(c.column), ys.get(c.row)) else {
                continue;
            };
            let width = spanned_extent(widths[c.column..column_end].iter().copied(), column_end - c.column, self.hgap);
            let height = spanned_extent(heights[c.row..row_end].iter().copied(), row_end - c.row, self.vgap);

            let column = self.column_constraints.get(c.column);
            let row = self.row_constraints.get(c.row);
            let placement = AreaPlacement {
                margin: c.margin,
                fill_width: c.fill_width.unwrap_or(column.is_none_or(|col| col.fill_width)),
                fill_height: c.fill_height.unwrap_or(row.is_none_or(|r| r.fill_height)),
                hpos: c.halignment.or(column.and_then(|col| col.halignment)).unwrap_or(HPos::Left),
                vpos: c.valignment.or(row.and_then(|r| r.valignment)).unwrap_or(VPos::Center),
            };
            layout_in_area(storage, node, Rect::new(x, y, width, height), placement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SizeHint;
    use crate::layout::test_support::MockStorage;
    use horizon_controls_core::Size;

    #[test]
    fn test_tracks_take_largest_child() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(30.0, 10.0));
        let b = storage.add(Size::new(50.0, 20.0));
        let c = storage.add(Size::new(20.0, 15.0));
        let mut grid = GridPane::new().with_gaps(5.0, 2.0);
        grid.add(a, 0, 0);
        grid.add(b, 0, 1);
        grid.add(c, 1, 0);

        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.compute_pref_width(&storage, None), 75.0);
        assert_eq!(grid.compute_pref_height(&storage, None), 37.0);

        grid.layout(&mut storage, Rect::new(0.0, 0.0, 75.0, 37.0));
        assert_eq!(storage.bounds_of(c), Rect::new(55.0, 0.0, 20.0, 15.0));
        assert_eq!(storage.bounds_of(b), Rect::new(0.0, 17.0, 50.0, 20.0));
    }

    #[test]
    fn test_always_column_takes_surplus() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(20.0, 10.0));
        let b = storage.add(Size::new(20.0, 10.0));
        let c = storage.add(Size::new(20.0, 10.0));
        let mut grid = GridPane::new();
        grid.add(a, 0, 0);
        grid.add(b, 1, 0);
        grid.add(c, 2, 0);
        grid.set_column_constraints(1, ColumnConstraints::new().with_grow(Priority::Sometimes));
        grid.set_column_constraints(2, ColumnConstraints::new().with_grow(Priority::Always));

        grid.layout(&mut storage, Rect::new(0.0, 0.0, 160.0, 10.0));
        assert_eq!(storage.bounds_of(b).width(), 20.0);
        assert_eq!(storage.bounds_of(c), Rect::new(40.0, 0.0, 120.0, 10.0));
    }

    #[test]
    fn test_sometimes_grows_when_nothing_is_always() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(20.0, 10.0));
        let b = storage.add(Size::new(20.0, 10.0));
        let mut grid = GridPane::new();
        grid.add_with(a, GridConstraints::at(0, 0).with_grow(Priority::Sometimes, Priority::Never));
        grid.add(b, 1, 0);
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(storage.bounds_of(a).width(), 80.0);
        assert_eq!(storage.bounds_of(b).left(), 80.0);
    }

    #[test]
    fn test_grow_respects_max() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(20.0, 10.0));
        let b = storage.add(Size::new(20.0, 10.0));
        let mut grid = GridPane::new();
        grid.add(a, 0, 0);
        grid.add(b, 1, 0);
        grid.set_column_constraints(
            0,
            ColumnConstraints::new()
                .with_grow(Priority::Always)
                .with_sizes(None, None, Some(30.0)),
        );
        grid.set_column_constraints(1, ColumnConstraints::new().with_grow(Priority::Always));
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(storage.bounds_of(a).width(), 30.0);
        assert_eq!(storage.bounds_of(b).width(), 70.0);
    }

    #[test]
    fn test_deficit_shrinks_toward_minimum() {
        let mut storage = MockStorage::new();
        let a = storage.add_hint(SizeHint::new(Size::new(60.0, 10.0)).with_min(Size::new(40.0, 0.0)));
        let b = storage.add_hint(SizeHint::new(Size::new(60.0, 10.0)).with_min(Size::new(20.0, 0.0)));
        let mut grid = GridPane::new();
        grid.add(a, 0, 0);
        grid.add(b, 1, 0);
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 90.0, 10.0));

        // 30px deficit split by shrink room (20 and 40).
        assert_eq!(storage.bounds_of(a).width(), 50.0);
        assert_eq!(storage.bounds_of(b).width(), 40.0);
        assert_eq!(grid.compute_min_width(&storage, None), 60.0);
    }

    #[test]
    fn test_percent_and_fixed_columns() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(10.0, 10.0));
        let b = storage.add(Size::new(10.0, 10.0));
        let mut grid = GridPane::new();
        grid.add(a, 0, 0);
        grid.add(b, 1, 0);
        grid.set_column_constraints(0, ColumnConstraints::new().with_percent(25.0));
        grid.set_column_constraints(1, ColumnConstraints::fixed(40.0));
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 200.0, 10.0));

        assert_eq!(storage.bounds_of(a).width(), 50.0);
        assert_eq!(storage.bounds_of(b), Rect::new(50.0, 0.0, 40.0, 10.0));
        assert_eq!(grid.compute_max_width(&storage, None), f32::MAX);
    }

    #[test]
    fn test_spanning_child_widens_tracks() {
        let mut storage = MockStorage::new();
        let a = storage.add(Size::new(10.0, 10.0));
        let b = storage.add(Size::new(10.0, 10.0));
        let wide = storage.add(Size::new(60.0, 10.0));
        let mut grid = GridPane::new();
        grid.add(a, 0, 0);
        grid.add(b, 1, 0);
        grid.add_spanning(wide, 0, 1, 2, 1);

        assert_eq!(grid.compute_pref_width(&storage, None), 60.0);
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 60.0, 20.0));
        assert_eq!(storage.bounds_of(b).left(), 30.0);
        assert_eq!(storage.bounds_of(wide), Rect::new(0.0, 10.0, 60.0, 10.0));
    }

    #[test]
    fn test_cell_alignment_and_container_alignment() {
        let mut storage = MockStorage::new();
        let small = storage.add_hint(SizeHint::fixed(Size::new(10.0, 10.0)));
        let big = storage.add(Size::new(40.0, 40.0));
        let mut grid = GridPane::new().with_alignment(Pos::BottomRight);
        grid.add(big, 0, 0);
        grid.add_with(small, GridConstraints::at(1, 0).with_alignment(HPos::Right, VPos::Bottom));
        grid.set_column_constraints(1, ColumnConstraints::fixed(30.0));
        grid.layout(&mut storage, Rect::new(0.0, 0.0, 100.0, 50.0));

        assert_eq!(storage.bounds_of(big), Rect::new(30.0, 10.0, 40.0, 40.0));
        assert_eq!(storage.bounds_of(small), Rect::new(90.0, 40.0, 10.0, 10.0));
    }
}
