//! Error types for partitioning runs.

use thiserror::Error;

/// Errors that abort a partitioning run before any tree node is created.
///
/// Degraded-but-valid situations (a line missing a sub-box it was expected
/// to cross, no split satisfying the imbalance tolerance) are reported as
/// `tracing` diagnostics instead and never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The requested processor count is not a power of two.
    ///
    /// The bisection tree is a complete binary tree, so only `2^k`-way
    /// partitionings are representable. Zero processors is also invalid.
    #[error("processor count must be a power of two, got {0}")]
    InvalidProcessorCount(usize),
}
