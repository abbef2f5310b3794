//! Node identifiers and child slots of the partition tree.

use crate::SplitDecision;

/// Handle to an internal node of a [`PartitionTree`](super::PartitionTree).
///
/// Identifiers index into the tree's node arena and are only meaningful for
/// the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// Which side of a split a child occupies.
///
/// `Left` is the half below the split coordinate, `Right` the half at and
/// above it. Leaves enumerate processors in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    #[inline]
    pub(super) fn index(self) -> usize {
        match self {
            Branch::Left => 0,
            Branch::Right => 1,
        }
    }
}

/// A child slot of an internal node.
///
/// Either the region is subdivided further (`Split`) or it is terminal and
/// owned by a single processor (`Leaf`). The two states are an explicit
/// variant so consumers must handle both exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// Terminal region, owned by one processor.
    Leaf,
    /// Further subdivided region.
    Split(NodeId),
}

/// Arena storage for one internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SplitNode {
    pub(super) split: SplitDecision,
    pub(super) children: [Option<NodeId>; 2],
}

impl SplitNode {
    pub(super) fn new(split: SplitDecision) -> Self {
        Self { split, children: [None, None] }
    }
}
