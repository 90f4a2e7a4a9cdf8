//! Common pane state.
//!
//! `LayoutBase` holds what every pane shares: the ordered child list, each
//! child's pane-specific constraints, the pane geometry and its padding.

use horizon_controls_core::{Insets, Rect};
use slotmap::SecondaryMap;

use super::traits::{NodeAccess, NodeId, SizeHint};

/// Common base for pane implementations.
///
/// Panes include this as a field and delegate child management to it.
/// `P` is the per-child constraint record (margin, alignment, anchors, ...).
#[derive(Debug, Clone)]
pub struct LayoutBase<P> {
    /// Children in insertion order.
    children: Vec<NodeId>,

    /// Per-child constraints.
    constraints: SecondaryMap<NodeId, P>,

    /// The pane's bounds.
    geometry: Rect,

    /// Space between the pane's edges and its content.
    padding: Insets,

    /// Whether the pane changed since the last layout.
    dirty: bool,
}

impl<P: Default> LayoutBase<P> {
    /// Create an empty base.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            constraints: SecondaryMap::new(),
            geometry: Rect::ZERO,
            padding: Insets::EMPTY,
            dirty: true,
        }
    }

    // =========================================================================
    // Child Management
    // =========================================================================

    /// Append a child with default constraints.
    ///
    /// Returns `false` if the child is already present.
    pub fn add_child(&mut self, node: NodeId) -> bool {
        self.add_child_with(node, P::default())
    }

    /// Append a child with the given constraints.
    pub fn add_child_with(&mut self, node: NodeId, constraints: P) -> bool {
        if self.contains(node) {
            return false;
        }
        self.children.push(node);
        self.constraints.insert(node, constraints);
        self.invalidate();
        true
    }

    /// Insert a child at `index` (clamped to the child count).
    pub fn insert_child(&mut self, index: usize, node: NodeId) -> bool {
        if self.contains(node) {
            return false;
        }
        let index = index.min(self.children.len());
        self.children.insert(index, node);
        self.constraints.insert(node, P::default());
        self.invalidate();
        true
    }

    /// Remove a child, returning its constraints.
    pub fn remove_child(&mut self, node: NodeId) -> Option<P> {
        let index = self.children.iter().position(|&child| child == node)?;
        self.children.remove(index);
        self.invalidate();
        self.constraints.remove(node)
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.children.clear();
        self.constraints.clear();
        self.invalidate();
    }

    /// Whether `node` is a child.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.constraints.contains_key(node)
    }

    /// Children in insertion order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the pane has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// A child's constraints.
    pub fn constraints(&self, node: NodeId) -> Option<&P> {
        self.constraints.get(node)
    }

    /// A child's constraints, mutably. Marks the pane dirty.
    pub fn constraints_mut(&mut self, node: NodeId) -> Option<&mut P> {
        if self.contains(node) {
            self.dirty = true;
        }
        self.constraints.get_mut(node)
    }

    /// Children the host knows, with their size hints and constraints.
    pub fn managed<'a, S: NodeAccess>(&'a self, storage: &'a S) -> impl Iterator<Item = (NodeId, SizeHint, &'a P)> + 'a {
        self.children.iter().filter_map(move |&node| {
            let hint = storage.size_hint(node)?;
            let constraints = self.constraints.get(node)?;
            Some((node, hint, constraints))
        })
    }

    // =========================================================================
    // Geometry & Padding
    // =========================================================================

    /// The pane's bounds.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the pane's bounds.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.invalidate();
        }
    }

    /// The padding.
    #[inline]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Set the padding.
    pub fn set_padding(&mut self, padding: Insets) {
        if self.padding != padding {
            self.padding = padding;
            self.invalidate();
        }
    }

    /// The content box: geometry minus padding.
    pub fn content_rect(&self) -> Rect {
        self.geometry.inset(self.padding)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Mark the pane as needing layout.
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the pane needs layout.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl<P: Default> Default for LayoutBase<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_add_remove_children() {
        let nodes = ids(3);
        let mut base: LayoutBase<u8> = LayoutBase::new();
        assert!(base.add_child(nodes[0]));
        assert!(base.add_child_with(nodes[1], 7));
        assert!(!base.add_child(nodes[0]));
        assert!(base.insert_child(0, nodes[2]));

        assert_eq!(base.children(), &[nodes[2], nodes[0], nodes[1]]);
        assert_eq!(base.remove_child(nodes[1]), Some(7));
        assert_eq!(base.remove_child(nodes[1]), None);
        assert_eq!(base.child_count(), 2);
    }

    #[test]
    fn test_content_rect_and_dirty() {
        let mut base: LayoutBase<()> = LayoutBase::new();
        base.set_geometry(Rect::new(0.0, 0.0, 100.0, 50.0));
        base.set_padding(Insets::new(5.0, 10.0, 5.0, 10.0));
        assert_eq!(base.content_rect(), Rect::new(10.0, 5.0, 80.0, 40.0));

        base.mark_clean();
        base.set_padding(Insets::new(5.0, 10.0, 5.0, 10.0));
        assert!(!base.is_dirty());
        base.set_geometry(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(base.is_dirty());
    }
}
