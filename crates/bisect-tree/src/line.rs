//! Oriented line segments and axis-aligned box clipping.

use nalgebra::{Point3, Vector3};

/// An oriented segment through the reconstruction volume.
///
/// A line represents one measured projection path. Lines are created in
/// physical coordinates by a [`Geometry`](crate::Geometry) and are immutable
/// once clipped to a volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Entry endpoint.
    pub start: Point3<f32>,
    /// Exit endpoint.
    pub end: Point3<f32>,
}

impl Line {
    /// Creates a line from its two endpoints.
    #[inline]
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }

    /// Returns the (unnormalized) direction vector `end - start`.
    #[inline]
    pub fn delta(&self) -> Vector3<f32> {
        self.end - self.start
    }

    /// Returns the segment length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.delta().norm()
    }

    /// Clips the segment to the axis-aligned box `[lo, hi]`.
    ///
    /// Uses the slab method: intersects the segment's parameter interval
    /// `[0, 1]` with the half-space interval of each axis in turn.
    ///
    /// Returns `None` if the segment lies entirely outside the box. Callers
    /// must handle the absence branch explicitly; a line that was expected
    /// to cross a box but does not is a diagnostic condition, not a panic.
    pub fn clip(&self, lo: Point3<f32>, hi: Point3<f32>) -> Option<Line> {
        let delta = self.delta();

        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;

        for d in 0..3 {
            if delta[d].abs() < f32::EPSILON {
                // Parallel to this slab: either fully inside it or fully out.
                if self.start[d] < lo[d] || self.start[d] > hi[d] {
                    return None;
                }
            } else {
                let inv = 1.0 / delta[d];
                let mut t0 = (lo[d] - self.start[d]) * inv;
                let mut t1 = (hi[d] - self.start[d]) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(Line::new(self.start + delta * t_min, self.start + delta * t_max))
    }
}
