//! The window of rows a virtualized control currently shows.
//!
//! The host reports which rows are visible; page navigation asks the
//! viewport for its target row and scrolls it when the lead row already sits
//! on the visible edge.

/// The visible rows `first..first + len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    first: usize,
    len: usize,
}

impl Viewport {
    /// A viewport showing `len` rows from the top.
    pub fn new(len: usize) -> Self {
        Self {
            first: 0,
            len: len.max(1),
        }
    }

    /// First visible row.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Number of rows that fit.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a viewport shows at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Record what the host shows.
    pub fn set(&mut self, first: usize, len: usize) {
        self.first = first;
        self.len = len.max(1);
    }

    /// Last visible row, given `row_count` rows of content.
    pub fn last_visible(&self, row_count: usize) -> Option<usize> {
        if row_count == 0 {
            return None;
        }
        Some((self.first + self.len - 1).min(row_count - 1))
    }

    /// Whether `row` is on screen.
    pub fn is_visible(&self, row: usize) -> bool {
        row >= self.first && row < self.first + self.len
    }

    /// Scroll the minimum amount that brings `row` on screen.
    pub fn reveal(&mut self, row: usize) {
        if row < self.first {
            self.first = row;
        } else if row >= self.first + self.len {
            self.first = row + 1 - self.len;
        }
    }

    /// Target of a page-down from `lead`: the last visible row, or when
    /// `lead` already sits there, the last row after scrolling one page.
    pub fn page_down(&mut self, lead: usize, row_count: usize) -> Option<usize> {
        let mut last = self.last_visible(row_count)?;
        if lead >= last {
            self.first = last.min(row_count.saturating_sub(self.len));
            last = self.last_visible(row_count)?;
        }
        Some(last)
    }

    /// Target of a page-up from `lead`: the first visible row, or when
    /// `lead` already sits there, the first row after scrolling one page.
    pub fn page_up(&mut self, lead: usize, row_count: usize) -> Option<usize> {
        if row_count == 0 {
            return None;
        }
        self.first = self.first.min(row_count - 1);
        if lead <= self.first {
            self.first = self.first.saturating_sub(self.len - 1);
        }
        Some(self.first)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(10)
    }
}
