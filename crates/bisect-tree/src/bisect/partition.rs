//! The worklist-driven bisection partitioner.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::split::find_split;
use crate::weight::voxel_weights;
use crate::{Geometry, Line, PartitionError, Volume, VoxelBox};

use super::node::{Branch, Child, NodeId};
use super::tree::PartitionTree;

/// A partitioning with its per-processor line subsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Bisection {
    /// The split tree.
    pub tree: PartitionTree,
    /// Lines owned by each terminal region, in left-to-right leaf order.
    /// A line crossing a cut plane appears in every region it touches.
    pub leaf_lines: Vec<Vec<Line>>,
}

/// A pending sub-volume on the worklist: its bounds, the tree slot its
/// split will occupy, the lines it owns, and its depth.
struct Subvolume {
    bounds: VoxelBox,
    parent: Option<NodeId>,
    branch: Branch,
    lines: Vec<Line>,
    depth: u32,
}

/// Partitions the volume and its line set over `processors` compute nodes.
///
/// Builds a binary tree of axis-aligned cuts of depth `log2(processors)`
/// such that each terminal region owns a balanced share of line-crossing
/// weight while the number of lines duplicated across region boundaries
/// stays small. `max_epsilon` bounds how far a cut may deviate from the
/// midpoint of its sub-volume (see [`DEFAULT_EPSILON`](crate::DEFAULT_EPSILON)).
///
/// The run is deterministic: identical geometry, volume, processor count,
/// and tolerance always produce a structurally identical tree, so
/// distributed participants can recompute the partitioning independently.
///
/// # Errors
/// [`PartitionError::InvalidProcessorCount`] if `processors` is zero or not
/// a power of two. The check runs before the geometry is consulted; no
/// partial tree is ever produced.
pub fn partition_bisection<G>(
    geometry: &G,
    volume: &Volume,
    processors: usize,
    max_epsilon: f32,
) -> Result<PartitionTree, PartitionError>
where
    G: Geometry + ?Sized,
{
    partition_bisection_with_lines(geometry, volume, processors, max_epsilon)
        .map(|bisection| bisection.tree)
}

/// Like [`partition_bisection`], additionally returning the line subset
/// owned by each terminal region.
#[instrument(skip(geometry, volume))]
pub fn partition_bisection_with_lines<G>(
    geometry: &G,
    volume: &Volume,
    processors: usize,
    max_epsilon: f32,
) -> Result<Bisection, PartitionError>
where
    G: Geometry + ?Sized,
{
    if processors == 0 || !processors.is_power_of_two() {
        return Err(PartitionError::InvalidProcessorCount(processors));
    }
    let depth = processors.trailing_zeros();

    // Clip to the volume and move into voxel coordinates. Lines missing
    // the volume carry no weight and are dropped here once.
    let all_lines: Vec<Line> = geometry
        .lines()
        .filter_map(|line| volume.clip_line(&line))
        .collect();
    debug!(lines = all_lines.len(), depth, "geometry clipped to volume");

    if depth == 0 {
        // Single processor: the whole volume is one terminal region.
        return Ok(Bisection { tree: PartitionTree::new(), leaf_lines: vec![all_lines] });
    }

    let weights = voxel_weights(&all_lines, volume);

    let mut tree = PartitionTree::new();
    let mut terminal: HashMap<NodeId, (Vec<Line>, Vec<Line>)> = HashMap::new();

    let mut worklist = vec![Subvolume {
        bounds: volume.full_box(),
        parent: None,
        branch: Branch::Left,
        lines: all_lines,
        depth: 0,
    }];

    while let Some(sub) = worklist.pop() {
        let (decision, left, right) = find_split(&sub.lines, &sub.bounds, &weights, max_epsilon);
        debug!(
            depth = sub.depth,
            axis = decision.axis,
            coordinate = decision.coordinate,
            left = left.len(),
            right = right.len(),
            "sub-volume split"
        );

        let node = tree.add(sub.parent, sub.branch, decision);

        if sub.depth + 1 < depth {
            let (bounds_left, bounds_right) = sub.bounds.split_at(decision.axis, decision.coordinate);
            worklist.push(Subvolume {
                bounds: bounds_left,
                parent: Some(node),
                branch: Branch::Left,
                lines: left,
                depth: sub.depth + 1,
            });
            worklist.push(Subvolume {
                bounds: bounds_right,
                parent: Some(node),
                branch: Branch::Right,
                lines: right,
                depth: sub.depth + 1,
            });
        } else {
            // Maximum depth: this node's two leaves are final regions.
            terminal.insert(node, (left, right));
        }
    }

    let mut leaf_lines = Vec::with_capacity(processors);
    if let Child::Split(root) = tree.root() {
        collect_leaf_lines(&tree, root, &mut terminal, &mut leaf_lines);
    }

    Ok(Bisection { tree, leaf_lines })
}

/// In-order walk gathering the terminal line subsets in left-to-right
/// leaf order.
fn collect_leaf_lines(
    tree: &PartitionTree,
    id: NodeId,
    terminal: &mut HashMap<NodeId, (Vec<Line>, Vec<Line>)>,
    out: &mut Vec<Vec<Line>>,
) {
    match (tree.child(id, Branch::Left), tree.child(id, Branch::Right)) {
        (Child::Split(left), Child::Split(right)) => {
            collect_leaf_lines(tree, left, terminal, out);
            collect_leaf_lines(tree, right, terminal, out);
        }
        _ => {
            let (left, right) = terminal.remove(&id).unwrap_or_default();
            out.push(left);
            out.push(right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPSILON;
    use nalgebra::Point3;

    fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
        Point3::new(x, y, z)
    }

    /// Eight z-parallel lines symmetrically crossing a 4x4x4 volume:
    /// four x positions by two y positions.
    fn symmetric_lines() -> Vec<Line> {
        let mut lines = Vec::new();
        for &x in &[0.5, 1.5, 2.5, 3.5] {
            for &y in &[1.0, 3.0] {
                lines.push(Line::new(p(x, y, 0.0), p(x, y, 4.0)));
            }
        }
        lines
    }

    /// Depth of every root-to-leaf path.
    fn leaf_depths(tree: &PartitionTree) -> Vec<usize> {
        fn walk(tree: &PartitionTree, child: Child, depth: usize, out: &mut Vec<usize>) {
            match child {
                Child::Leaf => out.push(depth),
                Child::Split(id) => {
                    walk(tree, tree.child(id, Branch::Left), depth + 1, out);
                    walk(tree, tree.child(id, Branch::Right), depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(tree, tree.root(), 0, &mut out);
        out
    }

    #[test]
    fn tree_shape_for_powers_of_two() {
        let lines = symmetric_lines();
        let volume = Volume::unit_voxels([16, 16, 16]);

        for k in 0..4_u32 {
            let processors = 1 << k;
            let tree =
                partition_bisection(&lines, &volume, processors, DEFAULT_EPSILON).unwrap();

            assert_eq!(tree.node_count(), processors - 1, "P = {processors}");
            assert_eq!(tree.leaf_count(), processors);
            assert!(leaf_depths(&tree).iter().all(|&d| d == k as usize), "P = {processors}");
        }
    }

    #[test]
    fn non_power_of_two_fails_fast() {
        struct UntouchableGeometry;
        impl Geometry for UntouchableGeometry {
            fn lines(&self) -> impl Iterator<Item = Line> + '_ {
                std::iter::once_with(|| -> Line {
                    panic!("geometry must not be consulted on a precondition failure")
                })
            }
        }

        let volume = Volume::unit_voxels([4, 4, 4]);
        for processors in [0, 3, 6, 12] {
            let result =
                partition_bisection(&UntouchableGeometry, &volume, processors, DEFAULT_EPSILON);
            assert_eq!(result, Err(PartitionError::InvalidProcessorCount(processors)));
        }
    }

    #[test]
    fn single_processor_owns_everything() {
        let lines = symmetric_lines();
        let volume = Volume::unit_voxels([4, 4, 4]);

        let bisection =
            partition_bisection_with_lines(&lines, &volume, 1, DEFAULT_EPSILON).unwrap();

        assert!(bisection.tree.is_empty());
        assert_eq!(bisection.leaf_lines.len(), 1);
        assert_eq!(bisection.leaf_lines[0].len(), 8);
    }

    #[test]
    fn symmetric_scenario_four_processors() {
        let lines = symmetric_lines();
        let volume = Volume::unit_voxels([4, 4, 4]);

        let bisection =
            partition_bisection_with_lines(&lines, &volume, 4, DEFAULT_EPSILON).unwrap();
        let tree = &bisection.tree;

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 2);

        // The first cut bisects an axis the lines do not span.
        let Child::Split(root) = tree.root() else {
            panic!("tree must have a root split");
        };
        assert_eq!(tree.split(root).coordinate, 2);

        // Four regions of two lines each; nothing crosses a cut plane here,
        // so no line is duplicated.
        assert_eq!(bisection.leaf_lines.len(), 4);
        for leaf in &bisection.leaf_lines {
            assert!((2..=4).contains(&leaf.len()), "leaf holds {} lines", leaf.len());
        }
        let total: usize = bisection.leaf_lines.iter().map(Vec::len).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn every_line_reaches_at_least_one_leaf() {
        let lines = symmetric_lines();
        let volume = Volume::unit_voxels([4, 4, 4]);

        for processors in [2, 4, 8] {
            let bisection =
                partition_bisection_with_lines(&lines, &volume, processors, DEFAULT_EPSILON)
                    .unwrap();

            for line in &lines {
                let clipped = volume.clip_line(line).unwrap();
                let hits = bisection
                    .leaf_lines
                    .iter()
                    .filter(|leaf| leaf.contains(&clipped))
                    .count();
                assert!(hits >= 1, "line {line:?} missing from all leaves at P = {processors}");
            }
        }
    }

    #[test]
    fn duplication_only_for_boundary_crossing_lines() {
        // Two x-parallel bundles separable by a y cut, plus one y-spanning
        // line. Every acceptable cut crosses the spanning line, so it must
        // end up on both sides; the bundles stay on one side each.
        let lines = vec![
            Line::new(p(0.0, 0.5, 2.0), p(4.0, 0.5, 2.0)),
            Line::new(p(0.0, 1.0, 2.0), p(4.0, 1.0, 2.0)),
            Line::new(p(0.0, 3.0, 2.0), p(4.0, 3.0, 2.0)),
            Line::new(p(0.0, 3.5, 2.0), p(4.0, 3.5, 2.0)),
            Line::new(p(2.0, 0.0, 2.0), p(2.0, 4.0, 2.0)),
        ];
        let spanning = lines[4];

        let volume = Volume::unit_voxels([4, 4, 4]);
        let bisection =
            partition_bisection_with_lines(&lines, &volume, 2, DEFAULT_EPSILON).unwrap();
        assert_eq!(bisection.leaf_lines.len(), 2);

        let hits = |line: &Line| {
            bisection
                .leaf_lines
                .iter()
                .filter(|leaf| leaf.contains(line))
                .count()
        };

        assert_eq!(hits(&spanning), 2, "a cut-crossing line belongs to both sides");
        for line in &lines[..4] {
            assert_eq!(hits(line), 1, "line {line:?} must stay on one side");
        }
    }

    #[test]
    fn identical_inputs_give_identical_trees() {
        let lines = symmetric_lines();
        let volume = Volume::unit_voxels([8, 8, 8]);

        let a = partition_bisection_with_lines(&lines, &volume, 8, DEFAULT_EPSILON).unwrap();
        let b = partition_bisection_with_lines(&lines, &volume, 8, DEFAULT_EPSILON).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn narrow_axis_fallback_completes_with_empty_regions() {
        // Axis 0 is one voxel wide, so every fallback split there lands on
        // the bound and leaves an empty half. The run must still produce a
        // complete tree of the required depth, not abort.
        let lines: Vec<Line> = Vec::new();
        let volume = Volume::unit_voxels([1, 4, 4]);

        let bisection =
            partition_bisection_with_lines(&lines, &volume, 4, DEFAULT_EPSILON).unwrap();

        assert_eq!(bisection.tree.node_count(), 3);
        assert_eq!(bisection.tree.depth(), 2);
        assert_eq!(bisection.leaf_lines.len(), 4);
        assert!(bisection.leaf_lines.iter().all(Vec::is_empty));
    }

    #[test]
    fn lineless_volume_still_partitions_via_fallback() {
        let lines: Vec<Line> = Vec::new();
        let volume = Volume::unit_voxels([8, 8, 8]);

        let tree = partition_bisection(&lines, &volume, 4, DEFAULT_EPSILON).unwrap();

        // Every split is the fallback midpoint on axis 0.
        assert_eq!(tree.node_count(), 3);
        let Child::Split(root) = tree.root() else {
            panic!("tree must have a root split");
        };
        assert_eq!(tree.split(root), crate::SplitDecision { axis: 0, coordinate: 4 });
    }
}
