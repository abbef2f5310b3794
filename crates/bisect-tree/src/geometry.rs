//! Acquisition geometry: the source of projection lines.
//!
//! The partitioner only needs a lazy, finite, restartable sequence of lines
//! in physical coordinates. Concrete scanner geometries (parallel beam,
//! cone beam, ...) live with the reconstruction code; here they appear only
//! behind this seam.

use crate::Line;

/// A source of projection lines.
///
/// Implementations must yield the same lines in the same order on every
/// call to [`lines`](Geometry::lines); the partitioner relies on this for
/// deterministic results. The geometry is borrowed read-only and must
/// outlive the partitioning run that consumes it.
pub trait Geometry {
    /// Returns a fresh iterator over all lines, in physical coordinates.
    fn lines(&self) -> impl Iterator<Item = Line> + '_;
}

impl Geometry for [Line] {
    fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.iter().copied()
    }
}

impl Geometry for Vec<Line> {
    fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.iter().copied()
    }
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        (**self).lines()
    }
}
