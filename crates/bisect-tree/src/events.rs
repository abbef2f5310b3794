//! Crossing events: where lines enter and leave a sub-box.

use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::{Line, VoxelBox};

/// Tolerance for comparing line coordinates against box bounds.
pub const COORD_EPSILON: f32 = 1e-5;

/// One endpoint of a line's passage through a sub-box.
///
/// Every line intersecting a box produces two events: one at the entry
/// point with `direction = sign(exit - entry)` per axis, one at the exit
/// point with the opposite sign. A zero component marks the line as
/// tangential on that axis (no progress along it). Events are ephemeral,
/// recomputed for each sub-box under consideration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    /// Event position in continuous voxel coordinates.
    pub point: Point3<f32>,
    /// Index of the originating line in the sub-box's line list.
    pub line_index: usize,
    /// Per-axis travel sign from this event onward: +1, -1, or 0.
    pub direction: [i32; 3],
}

/// Per-axis sign of a vector, with tangential tolerance.
fn sign(v: Vector3<f32>) -> [i32; 3] {
    let mut s = [0; 3];
    for d in 0..3 {
        if v[d] > COORD_EPSILON {
            s[d] = 1;
        } else if v[d] < -COORD_EPSILON {
            s[d] = -1;
        }
    }
    s
}

/// Computes entry/exit events for all lines against a box.
///
/// Lines were subdivided from a parent region and are expected to cross
/// the box; one that does not is logged and excluded from this box's event
/// set only. It stays in the line list, so it is still handed to one side
/// when the box is split. Emission order is unspecified; callers sort.
pub fn crossing_events(lines: &[Line], bounds: &VoxelBox) -> Vec<CrossingEvent> {
    let mut events = Vec::with_capacity(lines.len() * 2);
    let lo = bounds.lo_point();
    let hi = bounds.hi_point();

    for (line_index, line) in lines.iter().enumerate() {
        match line.clip(lo, hi) {
            Some(clipped) => {
                let travel = clipped.end - clipped.start;
                events.push(CrossingEvent {
                    point: clipped.start,
                    line_index,
                    direction: sign(travel),
                });
                events.push(CrossingEvent {
                    point: clipped.end,
                    line_index,
                    direction: sign(-travel),
                });
            }
            None => {
                warn!(line_index, ?bounds, "line expected to cross sub-box does not");
            }
        }
    }

    events
}
