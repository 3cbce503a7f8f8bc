// src/branching/mod.rs

//! Pruned enumeration of diagonal drift paths through the infiltration grid.
//!
//! A particle entering at a surface column moves one layer down per step,
//! drifting one column left or right. Each step is weighted by the occupancy
//! probability of the destination cell, and a partial path dies as soon as
//! its accumulated probability falls under the caller's threshold or it
//! would leave the grid. The surviving terminal paths form the branch set
//! drawn over the heatmap figures.
//!
//! The weighting is asymmetric and data-driven: left and right steps take
//! the destination cell's value from the probability map rather than a
//! fixed split. An empty branch set is a legitimate outcome, not an error.

use crate::core::constants::{grid, SURFACE_VISIBILITY};
use crate::core::QsoilError;
use crate::infiltration::ProbabilityMap;

/// One surviving drift path, surface to its deepest reached layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchPath {
    /// Visited cells as `(layer, column)`, starting at layer 0.
    pub steps: Vec<(usize, usize)>,
    /// Accumulated probability: surface value times every step value.
    pub probability: f64,
}

impl BranchPath {
    /// The deepest layer this path reached.
    pub fn deepest_layer(&self) -> usize {
        self.steps.last().map(|(layer, _)| *layer).unwrap_or(0)
    }
}

/// The complete set of surviving paths from one enumeration run.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSet {
    paths: Vec<BranchPath>,
    surface_probability: f64,
    start_column: usize,
}

impl BranchSet {
    /// All surviving paths, in enumeration order (right before left at each
    /// fork, depth first).
    pub fn paths(&self) -> &[BranchPath] {
        &self.paths
    }

    /// Number of surviving branches.
    pub fn branch_count(&self) -> usize {
        self.paths.len()
    }

    /// `true` when nothing survived (e.g. an invisible surface cell).
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Deepest layer reached by any surviving path, `None` when empty.
    pub fn deepest_layer(&self) -> Option<usize> {
        self.paths.iter().map(BranchPath::deepest_layer).max()
    }

    /// Occupancy probability of the starting surface cell.
    pub fn surface_probability(&self) -> f64 {
        self.surface_probability
    }

    /// The surface column enumeration started from.
    pub fn start_column(&self) -> usize {
        self.start_column
    }
}

/// Enumerates every surviving drift path from `start_column` over `map`.
///
/// A partial path is extended into a neighbouring cell only while that cell
/// stays inside the grid and its map value exceeds `min_probability`; the
/// path itself terminates once its accumulated probability falls below
/// `min_probability` or the bottom layer is reached. Raising the threshold
/// can only shrink the returned set.
///
/// # Errors
/// `InvalidArgument` when `start_column` lies outside the grid or
/// `min_probability` is not in `[0, 1)`.
pub fn enumerate_paths(
    map: &ProbabilityMap,
    start_column: usize,
    min_probability: f64,
) -> Result<BranchSet, QsoilError> {
    if start_column >= grid::WIDTH {
        return Err(QsoilError::InvalidArgument {
            message: format!(
                "start column {} is outside the grid (width {})",
                start_column,
                grid::WIDTH
            ),
        });
    }
    if !(0.0..1.0).contains(&min_probability) || min_probability.is_nan() {
        return Err(QsoilError::InvalidArgument {
            message: format!("pruning threshold {} is outside [0, 1)", min_probability),
        });
    }

    let surface_probability = map.get(0, start_column);
    let mut set = BranchSet {
        paths: Vec::new(),
        surface_probability,
        start_column,
    };

    // An invisible surface cell produces no branches at all.
    if surface_probability < SURFACE_VISIBILITY {
        return Ok(set);
    }

    explore(
        map,
        min_probability,
        0,
        start_column,
        &[],
        surface_probability,
        &mut set.paths,
    );
    Ok(set)
}

/// Depth-first descent; depth is bounded by the grid height, so the call
/// stack stays shallow.
fn explore(
    map: &ProbabilityMap,
    min_probability: f64,
    layer: usize,
    column: usize,
    path: &[(usize, usize)],
    probability: f64,
    out: &mut Vec<BranchPath>,
) {
    let mut steps = path.to_vec();
    steps.push((layer, column));

    // Terminal: bottom layer reached or the path has decayed away.
    if layer >= grid::DEPTH - 1 || probability < min_probability {
        out.push(BranchPath { steps, probability });
        return;
    }

    // Candidate moves, right then left; a destination is viable only inside
    // the grid and above the threshold.
    let mut moves: Vec<(usize, f64)> = Vec::with_capacity(2);
    let right = column + 1;
    if right < grid::WIDTH {
        let value = map.get(layer + 1, right);
        if value > min_probability {
            moves.push((right, value));
        }
    }
    if let Some(left) = column.checked_sub(1) {
        let value = map.get(layer + 1, left);
        if value > min_probability {
            moves.push((left, value));
        }
    }

    if moves.is_empty() {
        out.push(BranchPath { steps, probability });
        return;
    }

    for (next_column, value) in moves {
        explore(
            map,
            min_probability,
            layer + 1,
            next_column,
            &steps,
            probability * value,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A uniform field with a chosen surface value, for hand-checkable trees.
    fn uniform_map(surface: f64, body: f64) -> ProbabilityMap {
        let mut map = ProbabilityMap::zeroed();
        for layer in 0..grid::DEPTH {
            for column in 0..grid::WIDTH {
                map.set(layer, column, if layer == 0 { surface } else { body });
            }
        }
        map
    }

    #[test]
    fn invisible_surface_yields_empty_set() {
        let map = uniform_map(0.005, 0.5);
        let set = enumerate_paths(&map, 7, 0.001).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.branch_count(), 0);
        assert_eq!(set.deepest_layer(), None);
    }

    #[test]
    fn rejects_out_of_grid_column() {
        let map = uniform_map(0.5, 0.5);
        assert!(matches!(
            enumerate_paths(&map, grid::WIDTH, 0.001),
            Err(QsoilError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let map = uniform_map(0.5, 0.5);
        assert!(matches!(
            enumerate_paths(&map, 7, 1.0),
            Err(QsoilError::InvalidArgument { .. })
        ));
        assert!(matches!(
            enumerate_paths(&map, 7, -0.1),
            Err(QsoilError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn accumulated_probability_is_step_product() {
        // Body value 0.5: a path entering layer n carries surface * 0.5^n.
        let map = uniform_map(0.9, 0.5);
        let set = enumerate_paths(&map, 7, 0.05).unwrap();
        assert!(!set.is_empty());
        for path in set.paths() {
            let mut expected = set.surface_probability();
            for (layer, column) in path.steps.iter().skip(1) {
                expected *= map.get(*layer, *column);
            }
            assert!(
                (path.probability - expected).abs() < 1e-12,
                "path probability must be the product of its steps"
            );
        }
        // 0.9 * 0.5^4 = 0.05625 >= 0.05 > 0.9 * 0.5^5: termination on
        // entering layer 5, full binary tree minus nothing (column 7 is far
        // from both walls), so 2^5 leaves.
        assert_eq!(set.branch_count(), 32);
        assert_eq!(set.deepest_layer(), Some(5));
    }

    #[test]
    fn edge_column_prunes_outward_moves() {
        let map = uniform_map(0.9, 0.5);
        let set = enumerate_paths(&map, 0, 0.2).unwrap();
        // From column 0 the leftward move is off-grid, so layer 1 is only
        // entered at column 1; accumulated probability 0.9 * 0.5^3 = 0.1125
        // < 0.2 terminates every path on entering layer 3. That leaves the
        // forks (2,2)->{(3,3),(3,1)} and (2,0)->(3,1): three branches.
        assert_eq!(set.branch_count(), 3);
        assert_eq!(set.deepest_layer(), Some(3));
        for path in set.paths() {
            assert_eq!(path.steps[0], (0, 0));
            assert_eq!(path.steps[1], (1, 1));
            for (_, column) in &path.steps {
                assert!(*column < grid::WIDTH);
            }
        }
    }

    #[test]
    fn raising_threshold_never_grows_the_set() {
        let map = uniform_map(0.9, 0.4);
        let mut previous = usize::MAX;
        for threshold in [0.0005, 0.005, 0.05, 0.5] {
            let count = enumerate_paths(&map, 7, threshold).unwrap().branch_count();
            assert!(count <= previous, "pruning must be monotonic");
            previous = count;
        }
    }

    #[test]
    fn enumeration_is_deterministic() {
        let map = uniform_map(0.9, 0.35);
        let a = enumerate_paths(&map, 9, 0.01).unwrap();
        let b = enumerate_paths(&map, 9, 0.01).unwrap();
        assert_eq!(a, b);
    }
}
