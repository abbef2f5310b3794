//! The partition tree container.

use crate::SplitDecision;

use super::node::{Branch, Child, NodeId, SplitNode};

/// The binary tree of split decisions produced by a partitioning run.
///
/// Internal nodes carry a [`SplitDecision`]; absent children are terminal
/// regions, one per processor, enumerated left-to-right. For `P`
/// processors the tree holds exactly `P - 1` internal nodes and every
/// root-to-leaf path has length `log2(P)`. For `P = 1` the tree is empty
/// and the root slot itself is the single terminal region.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; the tree is
/// built incrementally by inserting a decision at a `(parent, branch)`
/// slot. The tree is plain data, cheap to clone, and suitable for
/// broadcast to the participants of a distributed reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionTree {
    nodes: Vec<SplitNode>,
}

impl PartitionTree {
    /// Creates an empty tree (a single terminal region).
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Returns `true` if the tree holds no splits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of internal nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The root slot: `Leaf` for an empty tree, otherwise the root split.
    pub fn root(&self) -> Child {
        if self.nodes.is_empty() { Child::Leaf } else { Child::Split(NodeId(0)) }
    }

    /// The split decision held by a node.
    #[inline]
    pub fn split(&self, id: NodeId) -> SplitDecision {
        self.nodes[id.0].split
    }

    /// The child slot of a node on the given branch.
    pub fn child(&self, id: NodeId, branch: Branch) -> Child {
        match self.nodes[id.0].children[branch.index()] {
            Some(child) => Child::Split(child),
            None => Child::Leaf,
        }
    }

    /// Inserts a new internal node at the `(parent, branch)` slot.
    ///
    /// With `parent == None` the node becomes the root of an empty tree.
    /// Returns the id of the new node.
    ///
    /// # Panics (debug builds only)
    /// Panics if the root already exists, or if the parent slot is
    /// already occupied.
    pub fn add(&mut self, parent: Option<NodeId>, branch: Branch, split: SplitDecision) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SplitNode::new(split));

        match parent {
            None => {
                debug_assert_eq!(id.0, 0, "root inserted into a non-empty tree");
            }
            Some(parent) => {
                let slot = &mut self.nodes[parent.0].children[branch.index()];
                debug_assert!(slot.is_none(), "child slot already occupied");
                *slot = Some(id);
            }
        }

        id
    }

    /// Number of terminal regions (processors). One more than the node count.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len() + 1
    }

    /// Length of the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        fn depth_of(tree: &PartitionTree, child: Child) -> usize {
            match child {
                Child::Leaf => 0,
                Child::Split(id) => {
                    let left = depth_of(tree, tree.child(id, Branch::Left));
                    let right = depth_of(tree, tree.child(id, Branch::Right));
                    1 + left.max(right)
                }
            }
        }
        depth_of(self, self.root())
    }
}
