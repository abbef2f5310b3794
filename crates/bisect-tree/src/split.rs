//! Split search: sweeping crossing events to choose the best cut.

use std::collections::BTreeSet;

use tracing::warn;

use crate::events::{COORD_EPSILON, crossing_events};
use crate::{Line, VoxelBox, WeightField};

/// Default tolerance on how far a cut may deviate from the midpoint.
pub const DEFAULT_EPSILON: f32 = 0.2;

/// A single cut: an axis and an integer voxel coordinate along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDecision {
    /// Axis perpendicular to the cut plane.
    pub axis: usize,
    /// Voxel coordinate of the cut along `axis`.
    pub coordinate: i32,
}

/// Normalized deviation of `coordinate` from the midpoint of the interval,
/// in `[0, 0.5]` for coordinates inside a non-empty interval. An empty
/// interval (the degenerate half of an earlier fallback split) has no
/// acceptable coordinate at all.
fn imbalance(bounds: &VoxelBox, axis: usize, coordinate: i32) -> f32 {
    let lo = bounds.lo[axis] as f32;
    let hi = bounds.hi[axis] as f32;
    if hi == lo {
        return f32::INFINITY;
    }
    (0.5 - (coordinate as f32 - lo) / (hi - lo)).abs()
}

/// Finds the best cut of `bounds` for the given lines and subdivides them.
///
/// For each axis the crossing events are sorted by coordinate and swept in
/// order, tracking `overlap`: the number of lines spanning the sweep
/// position. Whenever the integer coordinate advances, the midpoint between
/// the previous and current coordinate becomes a candidate cut; it is
/// accepted if it strictly reduces overlap while its imbalance stays under
/// `max_epsilon`, or ties the best overlap with strictly smaller imbalance.
/// The best candidate across all three axes wins.
///
/// If no axis produces a candidate under the tolerance, the cut falls back
/// to the midpoint of axis 0, with a diagnostic. This is a degraded but
/// deterministic outcome; the partitioning still completes.
///
/// Returns the decision plus the left and right line subsets. A line
/// spanning the cut appears in both subsets so that each side fully covers
/// its region.
pub fn find_split(
    lines: &[Line],
    bounds: &VoxelBox,
    weights: &WeightField,
    max_epsilon: f32,
) -> (SplitDecision, Vec<Line>, Vec<Line>) {
    let mut crossings = crossing_events(lines, bounds);

    let mut best_imbalance = max_epsilon;
    let mut best_overlap = i32::MAX;
    let mut best: Option<SplitDecision> = None;

    for axis in 0..3 {
        crossings.sort_by(|a, b| a.point[axis].total_cmp(&b.point[axis]));

        // Lines already touching the lower face span every candidate on
        // this axis; count them up front without applying their direction.
        let lower = bounds.lo[axis] as f32;
        let mut overlap = 0_i32;
        let mut current = 0_usize;
        while current < crossings.len()
            && (crossings[current].point[axis] - lower).abs() < COORD_EPSILON
        {
            overlap += 1;
            current += 1;
        }

        // Candidates appear only where the swept integer coordinate changes.
        let mut last_coordinate = bounds.lo[axis];
        for crossing in &crossings[current..] {
            let coordinate = crossing.point[axis] as i32;
            if coordinate != last_coordinate {
                let half = (last_coordinate + coordinate) / 2;
                last_coordinate = coordinate;

                let candidate_imbalance = imbalance(bounds, axis, half);
                if (overlap < best_overlap && candidate_imbalance < max_epsilon)
                    || (overlap == best_overlap && candidate_imbalance < best_imbalance)
                {
                    best_overlap = overlap;
                    best_imbalance = candidate_imbalance;
                    best = Some(SplitDecision { axis, coordinate: half });
                }
            }

            overlap += crossing.direction[axis];
        }
    }

    let decision = match best {
        Some(decision) => decision,
        None => {
            // Nothing under tolerance on any axis. Cut axis 0 down the
            // middle regardless of weight and carry on.
            warn!(
                ?bounds,
                events = crossings.len(),
                lines = lines.len(),
                weight = weights.query(bounds),
                "no split under imbalance tolerance, falling back to midpoint"
            );
            SplitDecision { axis: 0, coordinate: bounds.midpoint(0) }
        }
    };

    // Classify lines against the chosen cut by replaying the sweep up to it.
    let axis = decision.axis;
    crossings.sort_by(|a, b| a.point[axis].total_cmp(&b.point[axis]));

    let mut indices_left: BTreeSet<usize> = BTreeSet::new();
    let mut indices_right: BTreeSet<usize> = (0..lines.len()).collect();

    for crossing in &crossings {
        if crossing.point[axis] > decision.coordinate as f32 {
            break;
        }

        if crossing.direction[axis] > 0 {
            // Entered before the cut: the line reaches the left region.
            indices_left.insert(crossing.line_index);
        } else if crossing.direction[axis] < 0 {
            // Exited before the cut: the line never reaches the right region.
            indices_right.remove(&crossing.line_index);
        } else {
            // Tangential on the cut axis: confined to the left region.
            indices_left.insert(crossing.line_index);
            indices_right.remove(&crossing.line_index);
        }
    }

    let lines_left = indices_left.iter().map(|&i| lines[i]).collect();
    let lines_right = indices_right.iter().map(|&i| lines[i]).collect();

    (decision, lines_left, lines_right)
}
