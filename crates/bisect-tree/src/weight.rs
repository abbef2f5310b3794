//! Ray-crossing weight: per-voxel hit counts and the summed-volume table.
//!
//! Load balance is measured by how many ray samples fall in a region. The
//! per-voxel hit counts are folded into a 3D inclusive prefix-sum table
//! ([`WeightField`]) so the total weight of any sub-box is an O(1) query
//! via inclusion-exclusion, regardless of box size.

use crate::{Line, Volume, VoxelBox};

/// A summed-volume table over per-voxel ray hit counts.
///
/// Built once per partitioning run and read-only afterwards; queries take
/// `&self` and are safe to issue from multiple contexts concurrently.
#[derive(Debug, Clone)]
pub struct WeightField {
    sums: Vec<f32>,
    extents: [usize; 3],
}

impl WeightField {
    /// Builds the table from a dense hit-count grid.
    ///
    /// `counts` is indexed `x + extents[0] * (y + extents[1] * z)`. The
    /// build runs three sequential accumulation passes, one per axis, each
    /// adding the predecessor cell along that axis into the current cell.
    /// After the third pass every cell holds the sum over the sub-grid
    /// `[0, x] × [0, y] × [0, z]`.
    ///
    /// # Panics (debug builds only)
    /// Panics if `counts.len()` does not match the extents.
    pub fn build(counts: &[f32], extents: [usize; 3]) -> Self {
        let [nx, ny, nz] = extents;
        debug_assert_eq!(counts.len(), nx * ny * nz, "hit-count grid size mismatch");

        let mut sums = counts.to_vec();
        let idx = |x: usize, y: usize, z: usize| x + nx * (y + ny * z);

        // Accumulate along axis 0.
        for z in 0..nz {
            for y in 0..ny {
                for x in 1..nx {
                    sums[idx(x, y, z)] += sums[idx(x - 1, y, z)];
                }
            }
        }
        // Axis 1, over the axis-0 result.
        for z in 0..nz {
            for y in 1..ny {
                for x in 0..nx {
                    sums[idx(x, y, z)] += sums[idx(x, y - 1, z)];
                }
            }
        }
        // Axis 2, over the axis-0/1 result.
        for z in 1..nz {
            for y in 0..ny {
                for x in 0..nx {
                    sums[idx(x, y, z)] += sums[idx(x, y, z - 1)];
                }
            }
        }

        Self { sums, extents }
    }

    /// Voxel-grid extents the table was built over.
    #[inline]
    pub fn extents(&self) -> [usize; 3] {
        self.extents
    }

    /// Total hit weight inside `bounds`.
    ///
    /// Evaluates 3D inclusion-exclusion over the 8 corner lookups of the
    /// prefix table. Corner indices that fall below zero contribute zero,
    /// which handles boxes touching the grid origin. `bounds` must lie
    /// within the grid the table was built over: `hi` components are only
    /// guarded against the lower end, as in the partitioner every box is a
    /// subdivision of the full grid.
    ///
    /// # Panics
    /// Panics if `bounds.hi` exceeds the grid extents on any axis.
    pub fn query(&self, bounds: &VoxelBox) -> f32 {
        let mut total = 0.0;

        // Bit b of `corner` selects lo-1 (set) or hi-1 (clear) on axis b.
        for corner in 0..8u32 {
            let mut sign = 1.0_f32;
            let mut index = [0_i64; 3];
            for d in 0..3 {
                if corner & (1 << d) != 0 {
                    index[d] = i64::from(bounds.lo[d]) - 1;
                    sign = -sign;
                } else {
                    index[d] = i64::from(bounds.hi[d]) - 1;
                }
            }

            if index.iter().any(|&i| i < 0) {
                continue;
            }

            total += sign * self.at(index[0] as usize, index[1] as usize, index[2] as usize);
        }

        total
    }

    #[inline]
    fn at(&self, x: usize, y: usize, z: usize) -> f32 {
        let [nx, ny, _] = self.extents;
        self.sums[x + nx * (y + ny * z)]
    }
}

/// Samples per-voxel hit counts for a set of lines in voxel coordinates.
///
/// Nearest-voxel sampling: each line is walked in unit voxel-length steps
/// and each sample increments the voxel containing the sample point. Lines
/// must already be clipped to the grid.
pub fn hit_counts(lines: &[Line], extents: [usize; 3]) -> Vec<f32> {
    let [nx, ny, nz] = extents;
    let mut counts = vec![0.0_f32; nx * ny * nz];

    for line in lines {
        let length = line.length();
        let steps = (length.ceil() as usize).max(1);
        let delta = line.delta();

        for step in 0..steps {
            let t = (step as f32 + 0.5) / steps as f32;
            let p = line.start + delta * t;

            let x = (p[0].floor() as i64).clamp(0, nx as i64 - 1) as usize;
            let y = (p[1].floor() as i64).clamp(0, ny as i64 - 1) as usize;
            let z = (p[2].floor() as i64).clamp(0, nz as i64 - 1) as usize;
            counts[x + nx * (y + ny * z)] += 1.0;
        }
    }

    counts
}

/// Builds the weight field for a set of clipped, voxel-coordinate lines.
pub fn voxel_weights(lines: &[Line], volume: &Volume) -> WeightField {
    let extents = volume.voxels();
    WeightField::build(&hit_counts(lines, extents), extents)
}
