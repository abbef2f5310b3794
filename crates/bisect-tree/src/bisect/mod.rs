//! Recursive bisection of a volume and its line set over `2^k` processors.
//!
//! The partitioner drives an explicit worklist of pending sub-volumes.
//! Each popped sub-volume is cut by the best split found for its own lines
//! and bounds (see [`find_split`](crate::find_split)), the decision
//! is inserted into the [`PartitionTree`], and the two halves go back on
//! the worklist until every root-to-leaf path reaches depth `log2(P)`.
//!
//! # Example
//!
//! ```ignore
//! use bisect_tree::{partition_bisection, Volume, DEFAULT_EPSILON};
//!
//! let volume = Volume::unit_voxels([64, 64, 64]);
//! let lines = /* scanner geometry */;
//! let tree = partition_bisection(&lines, &volume, 8, DEFAULT_EPSILON)?;
//! assert_eq!(tree.leaf_count(), 8);
//! ```
//!
//! # Architecture
//!
//! - [`PartitionTree`]: arena-backed binary tree of split decisions
//! - [`NodeId`] / [`Branch`] / [`Child`]: node addressing and child slots
//! - [`partition_bisection`]: the worklist driver
//! - [`Bisection`]: tree plus per-leaf line subsets

mod node;
mod partition;
mod tree;

pub use node::{Branch, Child, NodeId};
pub use partition::{Bisection, partition_bisection, partition_bisection_with_lines};
pub use tree::PartitionTree;
