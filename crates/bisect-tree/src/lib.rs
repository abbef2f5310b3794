//! Recursive spatial bisectioning of a voxel volume and its ray set.
//!
//! Distributes a reconstruction volume and the projection lines crossing it
//! over `2^k` compute nodes by building a binary tree of axis-aligned cuts.
//! Cuts are chosen to balance line-crossing weight between the two halves
//! while keeping the number of lines duplicated across the boundary small.

mod bisect;
mod bounds;
mod error;
mod events;
mod geometry;
mod line;
mod split;
mod volume;
mod weight;

pub use bisect::{
    Bisection, Branch, Child, NodeId, PartitionTree, partition_bisection,
    partition_bisection_with_lines,
};
pub use bounds::VoxelBox;
pub use error::PartitionError;
pub use events::{COORD_EPSILON, CrossingEvent, crossing_events};
pub use geometry::Geometry;
pub use line::Line;
pub use split::{DEFAULT_EPSILON, SplitDecision, find_split};
pub use volume::Volume;
pub use weight::{WeightField, hit_counts, voxel_weights};
