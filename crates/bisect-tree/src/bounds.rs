//! Integer voxel-space boxes.

use nalgebra::Point3;

/// An axis-aligned sub-region of the voxel grid.
///
/// Each axis holds a half-open integer interval `[lo, hi)`. Boxes live in
/// voxel coordinates; continuous line coordinates compare directly against
/// them after a line has been clipped to the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelBox {
    /// Inclusive lower corner, per axis.
    pub lo: [i32; 3],
    /// Exclusive upper corner, per axis.
    pub hi: [i32; 3],
}

impl VoxelBox {
    /// Creates a box from its corners.
    ///
    /// # Panics (debug builds only)
    /// Panics if any axis interval is empty or inverted.
    pub fn new(lo: [i32; 3], hi: [i32; 3]) -> Self {
        debug_assert!(
            (0..3).all(|d| lo[d] < hi[d]),
            "VoxelBox intervals must be non-empty"
        );
        Self { lo, hi }
    }

    /// The box covering a full grid of the given extents, `[0, extent)` per axis.
    pub fn full(extents: [usize; 3]) -> Self {
        Self::new([0; 3], [extents[0] as i32, extents[1] as i32, extents[2] as i32])
    }

    /// Interval length along `axis`.
    #[inline]
    pub fn extent(&self, axis: usize) -> i32 {
        self.hi[axis] - self.lo[axis]
    }

    /// Integer midpoint of the interval along `axis`.
    #[inline]
    pub fn midpoint(&self, axis: usize) -> i32 {
        (self.lo[axis] + self.hi[axis]) / 2
    }

    /// Total number of voxels in the box.
    pub fn voxel_count(&self) -> usize {
        (0..3).map(|d| self.extent(d) as usize).product()
    }

    /// The lower corner as a physical point in voxel coordinates.
    #[inline]
    pub fn lo_point(&self) -> Point3<f32> {
        Point3::new(self.lo[0] as f32, self.lo[1] as f32, self.lo[2] as f32)
    }

    /// The upper corner as a physical point in voxel coordinates.
    #[inline]
    pub fn hi_point(&self) -> Point3<f32> {
        Point3::new(self.hi[0] as f32, self.hi[1] as f32, self.hi[2] as f32)
    }

    /// Splits the box at `coordinate` along `axis`.
    ///
    /// Returns `(left, right)` where the left box ends at the coordinate and
    /// the right box starts there. A coordinate at an end of the interval
    /// produces an empty half: this is the degraded outcome of a fallback
    /// split on a one-voxel-wide axis, and the empty half simply owns no
    /// voxels and no lines.
    ///
    /// # Panics (debug builds only)
    /// Panics if the coordinate lies outside the axis interval.
    pub fn split_at(&self, axis: usize, coordinate: i32) -> (VoxelBox, VoxelBox) {
        debug_assert!(
            coordinate >= self.lo[axis] && coordinate <= self.hi[axis],
            "split coordinate must lie inside the box"
        );

        let mut left = *self;
        left.hi[axis] = coordinate;

        let mut right = *self;
        right.lo[axis] = coordinate;

        (left, right)
    }
}
