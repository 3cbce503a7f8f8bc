// src/infiltration/map.rs

//! Per-cell occupancy probabilities of the infiltration grid.

use crate::core::constants::{grid, tolerance};
use crate::core::{QsoilError, RegisterState};
use crate::validation::check_normalization;

/// Occupancy probability for every (layer, column) cell of the 10×16 grid.
///
/// Row 0 is the surface. Values are accumulated Born probabilities, not a
/// distribution: a basis state contributes to every layer whose occupancy
/// bit it sets, so rows need not sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    values: Vec<f64>, // row-major, DEPTH rows of WIDTH columns
}

impl ProbabilityMap {
    /// An all-zero map; useful as a starting point for synthetic fields.
    pub fn zeroed() -> Self {
        Self { values: vec![0.0; grid::DEPTH * grid::WIDTH] }
    }

    /// Reads the ladder register's final state into a map.
    ///
    /// The basis index is read most-significant-first: the top four bits
    /// select the drift column, the remaining ten bits carry one occupancy
    /// flag per layer (layer 0 first). Basis states below the amplitude
    /// floor are skipped.
    pub fn from_state(state: &RegisterState) -> Result<Self, QsoilError> {
        let expected_dim = 1usize << grid::TOTAL_QUBITS;
        if state.dim() != expected_dim {
            return Err(QsoilError::SimulationError {
                message: format!(
                    "Ladder state has dimension {}, expected {}",
                    state.dim(),
                    expected_dim
                ),
            });
        }
        check_normalization(state, None)?;

        let mut map = Self::zeroed();
        for (k, amplitude) in state.vector().iter().enumerate() {
            let probability = amplitude.norm_sqr();
            if probability < tolerance::AMPLITUDE_FLOOR {
                continue;
            }
            let column = k >> grid::LAYER_QUBITS;
            for layer in 0..grid::DEPTH {
                if (k >> (grid::LAYER_QUBITS - 1 - layer)) & 1 == 1 {
                    map.values[layer * grid::WIDTH + column] += probability;
                }
            }
        }
        Ok(map)
    }

    /// Occupancy probability at (layer, column). Panics on out-of-grid
    /// indices, which indicate a caller bug rather than bad data.
    pub fn get(&self, layer: usize, column: usize) -> f64 {
        assert!(layer < grid::DEPTH && column < grid::WIDTH, "cell ({}, {}) outside grid", layer, column);
        self.values[layer * grid::WIDTH + column]
    }

    /// Overwrites one cell; synthetic-field construction for tests and
    /// custom sources.
    pub fn set(&mut self, layer: usize, column: usize, value: f64) {
        assert!(layer < grid::DEPTH && column < grid::WIDTH, "cell ({}, {}) outside grid", layer, column);
        self.values[layer * grid::WIDTH + column] = value;
    }

    /// The surface row (layer 0).
    pub fn surface(&self) -> &[f64] {
        &self.values[0..grid::WIDTH]
    }

    /// Mean occupancy over all cells.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Maximum occupancy over all cells.
    pub fn max(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    /// Iterates `(layer, column, value)` over the whole grid.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (i / grid::WIDTH, i % grid::WIDTH, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_map_has_grid_shape() {
        let map = ProbabilityMap::zeroed();
        assert_eq!(map.surface().len(), grid::WIDTH);
        assert_eq!(map.cells().count(), grid::WIDTH * grid::DEPTH);
        assert_eq!(map.max(), 0.0);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut map = ProbabilityMap::zeroed();
        map.set(3, 11, 0.25);
        assert_eq!(map.get(3, 11), 0.25);
        assert_eq!(map.get(3, 10), 0.0);
        assert!((map.mean() - 0.25 / 160.0).abs() < 1e-15);
    }

    #[test]
    #[should_panic]
    fn get_outside_grid_panics() {
        let map = ProbabilityMap::zeroed();
        map.get(0, grid::WIDTH);
    }
}
