//! The reconstruction volume: voxel extents plus physical placement.

use nalgebra::Point3;

use crate::{Line, VoxelBox};

/// The reconstruction volume.
///
/// Couples the voxel grid extents with the physical axis-aligned box the
/// grid discretizes. Lines arrive in physical coordinates; the volume maps
/// them into continuous voxel coordinates (component values in
/// `[0, voxels[d]]`) so that integer voxel bounds compare directly against
/// line coordinates during partitioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    voxels: [usize; 3],
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Volume {
    /// Creates a volume with the given voxel extents over a physical box.
    ///
    /// # Panics (debug builds only)
    /// Panics if any extent is zero or the physical box is degenerate.
    pub fn new(voxels: [usize; 3], min: Point3<f32>, max: Point3<f32>) -> Self {
        debug_assert!(voxels.iter().all(|&n| n > 0), "voxel extents must be positive");
        debug_assert!(
            (0..3).all(|d| max[d] > min[d]),
            "physical box must have positive size"
        );
        Self { voxels, min, max }
    }

    /// A volume whose physical coordinates coincide with voxel coordinates:
    /// `voxels[d]` voxels of unit size per axis, anchored at the origin.
    pub fn unit_voxels(voxels: [usize; 3]) -> Self {
        let max = Point3::new(voxels[0] as f32, voxels[1] as f32, voxels[2] as f32);
        Self::new(voxels, Point3::origin(), max)
    }

    /// Voxel-grid extents per axis.
    #[inline]
    pub fn voxels(&self) -> [usize; 3] {
        self.voxels
    }

    /// The box covering the whole voxel grid.
    #[inline]
    pub fn full_box(&self) -> VoxelBox {
        VoxelBox::full(self.voxels)
    }

    /// Maps a physical point into continuous voxel coordinates.
    pub fn to_voxel_space(&self, p: Point3<f32>) -> Point3<f32> {
        let mut out = Point3::origin();
        for d in 0..3 {
            out[d] = (p[d] - self.min[d]) / (self.max[d] - self.min[d]) * self.voxels[d] as f32;
        }
        out
    }

    /// Clips a physical-coordinate line to the volume and maps it into
    /// voxel coordinates.
    ///
    /// Returns `None` when the line misses the volume entirely; such lines
    /// carry no weight and take no part in the partitioning.
    pub fn clip_line(&self, line: &Line) -> Option<Line> {
        let mapped = Line::new(self.to_voxel_space(line.start), self.to_voxel_space(line.end));
        let full = self.full_box();
        mapped.clip(full.lo_point(), full.hi_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_voxels_identity_mapping() {
        let v = Volume::unit_voxels([4, 4, 4]);
        let p = Point3::new(1.5, 2.0, 3.25);
        assert_eq!(v.to_voxel_space(p), p);
    }

    #[test]
    fn physical_mapping_scales_and_translates() {
        let v = Volume::new([10, 10, 10], Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let center = v.to_voxel_space(Point3::origin());
        assert_eq!(center, Point3::new(5.0, 5.0, 5.0));

        let corner = v.to_voxel_space(Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(corner, Point3::origin());
    }

    #[test]
    fn clip_line_crossing_volume() {
        let v = Volume::unit_voxels([4, 4, 4]);
        let line = Line::new(Point3::new(-2.0, 2.0, 2.0), Point3::new(6.0, 2.0, 2.0));
        let clipped = v.clip_line(&line).unwrap();

        assert_eq!(clipped.start, Point3::new(0.0, 2.0, 2.0));
        assert_eq!(clipped.end, Point3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn clip_line_missing_volume() {
        let v = Volume::unit_voxels([4, 4, 4]);
        let line = Line::new(Point3::new(-2.0, 8.0, 2.0), Point3::new(6.0, 8.0, 2.0));
        assert!(v.clip_line(&line).is_none());
    }

    #[test]
    fn full_box_matches_extents() {
        let v = Volume::unit_voxels([2, 3, 4]);
        assert_eq!(v.full_box(), VoxelBox::new([0, 0, 0], [2, 3, 4]));
    }
}
