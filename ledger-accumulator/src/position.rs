//! Node addressing for the accumulator's conceptual complete binary tree.
//!
//! Nodes are numbered in-order. Leaf `i` is `2i`, and the node at `level` with
//! index `k` (counting from the left at that level) is
//! `(k << (level + 1)) | ((1 << level) - 1)`:
//!
//! ```text
//!                  7
//!          3               11
//!      1       5       9       13
//!    0   2   4   6   8   10  12  14
//! ```
//!
//! The level of a node is the number of trailing one bits, so every
//! parent/sibling/child query is a handful of shifts and masks.

/// Maximum accumulator height. A proof never has more siblings than this.
pub const MAX_ACCUMULATOR_PROOF_DEPTH: usize = 63;

/// Maximum number of leaves an accumulator can address.
pub const MAX_ACCUMULATOR_LEAVES: u64 = 1 << MAX_ACCUMULATOR_PROOF_DEPTH;

/// In-order position of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u64);

impl Position {
    /// Wrap a raw in-order index.
    pub fn from_inorder_index(index: u64) -> Self {
        Position(index)
    }

    /// The raw in-order index.
    pub fn to_inorder_index(self) -> u64 {
        self.0
    }

    /// Position of leaf `leaf_index`.
    ///
    /// `leaf_index` must be below [`MAX_ACCUMULATOR_LEAVES`].
    pub fn from_leaf_index(leaf_index: u64) -> Self {
        Self::from_level_and_index(0, leaf_index)
    }

    /// Position of the `index`-th node (from the left) at `level`.
    ///
    /// `level` must be at most [`MAX_ACCUMULATOR_PROOF_DEPTH`] and `index`
    /// below `2^(63 - level)`.
    pub fn from_level_and_index(level: u32, index: u64) -> Self {
        debug_assert!(
            level as usize <= MAX_ACCUMULATOR_PROOF_DEPTH,
            "level {} above the maximum accumulator height",
            level
        );
        debug_assert!(
            index < 1u64 << (MAX_ACCUMULATOR_PROOF_DEPTH as u32 - level),
            "index {} out of range at level {}",
            index,
            level
        );
        let level_ones = (1u64 << level) - 1;
        let shifted = index.checked_shl(level + 1).unwrap_or(0);
        Position(shifted | level_ones)
    }

    /// Height above the leaves; leaves are at level 0.
    pub fn level(self) -> u32 {
        self.0.trailing_ones()
    }

    /// Index of this node among the nodes of its level, counting from the
    /// left.
    pub fn index_at_level(self) -> u64 {
        self.0.checked_shr(self.level() + 1).unwrap_or(0)
    }

    /// Whether this is a leaf.
    pub fn is_leaf(self) -> bool {
        self.0 & 1 == 0
    }

    /// Whether this node is the left child of its parent.
    pub fn is_left_child(self) -> bool {
        self.index_at_level() & 1 == 0
    }

    /// Whether this node is the right child of its parent.
    pub fn is_right_child(self) -> bool {
        !self.is_left_child()
    }

    /// The parent node.
    ///
    /// A node at [`MAX_ACCUMULATOR_PROOF_DEPTH`] is the largest possible root
    /// and has no parent.
    pub fn parent(self) -> Self {
        Self::from_level_and_index(self.level() + 1, self.index_at_level() >> 1)
    }

    /// The other child of this node's parent.
    pub fn sibling(self) -> Self {
        Self::from_level_and_index(self.level(), self.index_at_level() ^ 1)
    }

    /// Left child, or `None` for a leaf.
    pub fn left_child(self) -> Option<Self> {
        self.child(0)
    }

    /// Right child, or `None` for a leaf.
    pub fn right_child(self) -> Option<Self> {
        self.child(1)
    }

    fn child(self, side: u64) -> Option<Self> {
        if self.is_leaf() {
            return None;
        }
        Some(Self::from_level_and_index(
            self.level() - 1,
            (self.index_at_level() << 1) | side,
        ))
    }

    /// Number of leaves spanned by this subtree.
    pub fn leaf_count(self) -> u64 {
        1u64 << self.level()
    }

    /// Index of the leftmost leaf under this node.
    pub fn first_leaf_index(self) -> u64 {
        self.index_at_level() << self.level()
    }

    /// Index of the rightmost leaf under this node.
    pub fn last_leaf_index(self) -> u64 {
        self.first_leaf_index() + (self.leaf_count() - 1)
    }

    /// Whether every leaf under this node exists in an accumulator of
    /// `num_leaves` leaves. Such a subtree never changes again and its root
    /// may be cached ("frozen").
    pub fn is_freezable(self, num_leaves: u64) -> bool {
        self.last_leaf_index() < num_leaves
    }

    /// Whether no leaf under this node exists yet; its hash is the
    /// accumulator placeholder.
    pub fn is_placeholder(self, num_leaves: u64) -> bool {
        self.first_leaf_index() >= num_leaves
    }

    /// Root position of an accumulator with `num_leaves` leaves.
    pub fn root_from_num_leaves(num_leaves: u64) -> Self {
        Self::from_level_and_index(root_level(num_leaves), 0)
    }
}

/// Height of the root of an accumulator with `num_leaves` leaves.
///
/// This is also the sibling count of every inclusion proof against that root.
/// Zero for empty and single-leaf accumulators. Exceeds
/// [`MAX_ACCUMULATOR_PROOF_DEPTH`] only when `num_leaves` exceeds
/// [`MAX_ACCUMULATOR_LEAVES`].
pub fn root_level(num_leaves: u64) -> u32 {
    if num_leaves <= 1 {
        0
    } else {
        u64::BITS - (num_leaves - 1).leading_zeros()
    }
}

/// Maximal aligned subtrees covering leaves `[first, end)`, left to right.
///
/// Each returned subtree is as large as alignment and `end` allow. Every one
/// is fully populated once the accumulator holds `end` leaves.
pub fn aligned_subtrees(first: u64, end: u64) -> Vec<Position> {
    let mut subtrees = Vec::new();
    let mut next = first;
    while next < end {
        let remaining = end - next;
        let mut level = next.trailing_zeros().min(MAX_ACCUMULATOR_PROOF_DEPTH as u32);
        while (1u64 << level) > remaining {
            level -= 1;
        }
        subtrees.push(Position::from_level_and_index(level, next >> level));
        next += 1u64 << level;
    }
    subtrees
}

/// Frozen subtree roots of an accumulator with `num_leaves` leaves, largest
/// first: one per set bit of `num_leaves`.
pub fn frozen_subtree_roots(num_leaves: u64) -> Vec<Position> {
    aligned_subtrees(0, num_leaves)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_inorder_layout() {
        assert_eq!(Position::from_leaf_index(0).to_inorder_index(), 0);
        assert_eq!(Position::from_leaf_index(3).to_inorder_index(), 6);
        assert_eq!(Position::from_level_and_index(1, 0).to_inorder_index(), 1);
        assert_eq!(Position::from_level_and_index(1, 2).to_inorder_index(), 9);
        assert_eq!(Position::from_level_and_index(2, 1).to_inorder_index(), 11);
        assert_eq!(Position::from_level_and_index(3, 0).to_inorder_index(), 7);
    }

    #[test]
    fn test_level_and_index() {
        let pos = Position::from_inorder_index(11);
        assert_eq!(pos.level(), 2);
        assert_eq!(pos.index_at_level(), 1);
        assert!(!pos.is_leaf());
        assert!(Position::from_inorder_index(10).is_leaf());
    }

    #[test]
    fn test_parent_sibling_children() {
        let leaf2 = Position::from_leaf_index(2);
        assert!(leaf2.is_left_child());
        assert_eq!(leaf2.sibling(), Position::from_leaf_index(3));
        assert_eq!(leaf2.parent().to_inorder_index(), 5);
        assert_eq!(leaf2.parent().parent().to_inorder_index(), 3);
        assert!(leaf2.parent().is_right_child());

        let node = Position::from_inorder_index(3);
        assert_eq!(node.left_child(), Some(Position::from_inorder_index(1)));
        assert_eq!(node.right_child(), Some(Position::from_inorder_index(5)));
        assert_eq!(leaf2.left_child(), None);
        assert_eq!(leaf2.right_child(), None);
    }

    #[test]
    fn test_leaf_span() {
        let node = Position::from_level_and_index(2, 1);
        assert_eq!(node.first_leaf_index(), 4);
        assert_eq!(node.last_leaf_index(), 7);
        assert_eq!(node.leaf_count(), 4);
        assert!(node.is_freezable(8));
        assert!(!node.is_freezable(7));
        assert!(node.is_placeholder(4));
        assert!(!node.is_placeholder(5));
    }

    #[test]
    fn test_root_level() {
        assert_eq!(root_level(0), 0);
        assert_eq!(root_level(1), 0);
        assert_eq!(root_level(2), 1);
        assert_eq!(root_level(3), 2);
        assert_eq!(root_level(4), 2);
        assert_eq!(root_level(5), 3);
        assert_eq!(root_level(8), 3);
        assert_eq!(root_level(9), 4);
        assert_eq!(root_level(MAX_ACCUMULATOR_LEAVES), 63);
        assert_eq!(root_level(MAX_ACCUMULATOR_LEAVES + 1), 64);
    }

    #[test]
    fn test_root_position_at_max_height() {
        let root = Position::root_from_num_leaves(MAX_ACCUMULATOR_LEAVES);
        assert_eq!(root.level(), 63);
        assert_eq!(root.first_leaf_index(), 0);
        assert_eq!(root.last_leaf_index(), MAX_ACCUMULATOR_LEAVES - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_leaf_beyond_capacity_panics() {
        Position::from_leaf_index(MAX_ACCUMULATOR_LEAVES);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "above the maximum accumulator height")]
    fn test_parent_of_max_root_panics() {
        Position::root_from_num_leaves(MAX_ACCUMULATOR_LEAVES).parent();
    }

    #[test]
    fn test_last_addressable_leaf() {
        let last = Position::from_leaf_index(MAX_ACCUMULATOR_LEAVES - 1);
        assert_eq!(last.to_inorder_index(), u64::MAX - 1);
        assert!(last.is_right_child());
        assert_eq!(last.sibling(), Position::from_leaf_index(MAX_ACCUMULATOR_LEAVES - 2));
    }

    #[test]
    fn test_frozen_subtree_roots() {
        assert!(frozen_subtree_roots(0).is_empty());
        let roots: Vec<(u32, u64)> = frozen_subtree_roots(11)
            .into_iter()
            .map(|p| (p.level(), p.first_leaf_index()))
            .collect();
        assert_eq!(roots, vec![(3, 0), (1, 8), (0, 10)]);
    }

    #[test]
    fn test_aligned_subtrees() {
        let tiles: Vec<(u32, u64)> = aligned_subtrees(3, 13)
            .into_iter()
            .map(|p| (p.level(), p.first_leaf_index()))
            .collect();
        assert_eq!(tiles, vec![(0, 3), (2, 4), (2, 8), (0, 12)]);
        assert!(aligned_subtrees(5, 5).is_empty());
    }

    proptest! {
        #[test]
        fn test_parent_of_children(level in 1u32..40, index in 0u64..1_000_000) {
            let node = Position::from_level_and_index(level, index);
            let left = node.left_child().expect("internal node");
            let right = node.right_child().expect("internal node");
            prop_assert_eq!(left.parent(), node);
            prop_assert_eq!(right.parent(), node);
            prop_assert_eq!(left.sibling(), right);
            prop_assert_eq!(right.sibling(), left);
            prop_assert!(left.is_left_child());
            prop_assert!(right.is_right_child());
            prop_assert_eq!(left.first_leaf_index(), node.first_leaf_index());
            prop_assert_eq!(right.last_leaf_index(), node.last_leaf_index());
        }

        #[test]
        fn test_aligned_subtrees_tile_exactly(first in 0u64..5_000, len in 0u64..5_000) {
            let end = first + len;
            let mut next = first;
            for tile in aligned_subtrees(first, end) {
                prop_assert_eq!(tile.first_leaf_index(), next);
                prop_assert!(tile.is_freezable(end));
                next = tile.last_leaf_index() + 1;
            }
            prop_assert_eq!(next, end);
        }
    }
}
