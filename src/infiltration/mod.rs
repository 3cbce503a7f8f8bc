// src/infiltration/mod.rs

//! The 14-qubit infiltration ladder: circuit construction, occupancy-map
//! readout and drift-path enumeration for one heavy metal.

pub mod features;
mod map;
mod metal;

pub use map::ProbabilityMap;
pub use metal::{Metal, SiteConditions};

use crate::branching::{enumerate_paths, BranchSet};
use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::constants::grid;
use crate::core::{QsoilError, QubitId};
use crate::operations::{excitation_angle, Operation};
use crate::simulation::Simulator;

/// One metal's infiltration simulation over the 16×10 grid.
///
/// Qubits 0..3 encode the drift column (superposed and chained), qubit 4 is
/// the surface runoff flag and qubits 5..13 the nine deeper layers, each
/// rotated by the metal's step probability and entangled with the layer
/// above.
#[derive(Debug, Clone, PartialEq)]
pub struct InfiltrationModel {
    step_probability: f64,
    runoff_probability: f64,
    label: String,
}

impl InfiltrationModel {
    /// Model for a metal under explicit site conditions.
    pub fn new(metal: Metal, conditions: SiteConditions) -> Self {
        Self {
            step_probability: metal.step_probability(&conditions),
            runoff_probability: conditions.runoff_probability(),
            label: metal.label().to_string(),
        }
    }

    /// Model from a bare per-layer step probability (full surface runoff).
    ///
    /// # Errors
    /// `InvalidArgument` when the probability is outside [0, 1].
    pub fn with_step_probability(step_probability: f64) -> Result<Self, QsoilError> {
        if !(0.0..=1.0).contains(&step_probability) || step_probability.is_nan() {
            return Err(QsoilError::InvalidArgument {
                message: format!("step probability {} is outside [0, 1]", step_probability),
            });
        }
        Ok(Self {
            step_probability,
            runoff_probability: 1.0,
            label: format!("step p = {}", step_probability),
        })
    }

    /// The per-layer step probability in use.
    pub fn step_probability(&self) -> f64 {
        self.step_probability
    }

    /// Display label of the modelled metal or parameter.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Builds the 14-qubit ladder circuit.
    pub fn circuit(&self) -> Circuit {
        let mut builder = CircuitBuilder::new();

        // Column register: superpose, then chain into correlated positions.
        for i in 0..grid::COLUMN_QUBITS {
            builder = builder.add_op(Operation::Superpose { target: QubitId(i as u64) });
        }
        for i in 0..grid::COLUMN_QUBITS - 1 {
            builder = builder.add_op(Operation::Entangle {
                control: QubitId(i as u64),
                target: QubitId((i + 1) as u64),
            });
        }

        // Surface layer: runoff rotation.
        builder = builder.add_op(Operation::Rotate {
            target: QubitId(grid::COLUMN_QUBITS as u64),
            theta: excitation_angle(self.runoff_probability),
        });

        // Deeper layers: step rotation, entangled with the layer above.
        let theta_step = excitation_angle(self.step_probability);
        for layer in 1..grid::LAYER_QUBITS {
            let qubit = (grid::COLUMN_QUBITS + layer) as u64;
            builder = builder
                .add_op(Operation::Rotate { target: QubitId(qubit), theta: theta_step })
                .add_op(Operation::Entangle {
                    control: QubitId(qubit - 1),
                    target: QubitId(qubit),
                });
        }

        builder.build()
    }

    /// Simulates the ladder and reads the occupancy map from its final
    /// state.
    pub fn probability_map(&self) -> Result<ProbabilityMap, QsoilError> {
        let circuit = self.circuit();
        let result = Simulator::new().run(&circuit)?;
        let state = result.final_state().ok_or_else(|| QsoilError::SimulationError {
            message: "Ladder simulation produced no final state".to_string(),
        })?;
        ProbabilityMap::from_state(state)
    }

    /// Enumerates surviving drift paths from `start_column`.
    pub fn enumerate(&self, start_column: usize, min_probability: f64) -> Result<BranchSet, QsoilError> {
        let map = self.probability_map()?;
        enumerate_paths(&map, start_column, min_probability)
    }
}

/// Enumerates drift paths for a bare step probability: builds the ladder,
/// simulates it and prunes the resulting field.
///
/// This is the scalar-parameter entry point; the Lead reference call
/// `enumerate(7, 0.246, 0.001)` yields 3 branches reaching layer 2 from a
/// surface probability of ≈ 0.0545.
///
/// # Errors
/// `InvalidArgument` on an out-of-grid column or out-of-range probability.
pub fn enumerate(
    start_column: usize,
    step_probability: f64,
    min_probability: f64,
) -> Result<BranchSet, QsoilError> {
    InfiltrationModel::with_step_probability(step_probability)?.enumerate(start_column, min_probability)
}

/// Picks the most probable surface column within `columns`, the heuristic
/// the survey uses to start branching in the middle of the grid.
pub fn best_start_column(
    map: &ProbabilityMap,
    columns: impl IntoIterator<Item = usize>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for column in columns {
        if column >= grid::WIDTH {
            continue;
        }
        let value = map.get(0, column);
        if best.map(|(_, b)| value > b).unwrap_or(true) {
            best = Some((column, value));
        }
    }
    best.map(|(column, _)| column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_circuit_has_expected_shape() {
        let model = InfiltrationModel::new(Metal::Lead, SiteConditions::default());
        let circuit = model.circuit();
        assert_eq!(circuit.qubits().len(), grid::TOTAL_QUBITS);
        // 4 H + 3 CX + 1 runoff Ry + 9 * (Ry + CX)
        assert_eq!(circuit.len(), 4 + 3 + 1 + 18);
    }

    #[test]
    fn with_step_probability_validates_range() {
        assert!(InfiltrationModel::with_step_probability(1.2).is_err());
        assert!(InfiltrationModel::with_step_probability(-0.1).is_err());
        assert!(InfiltrationModel::with_step_probability(0.246).is_ok());
    }

    #[test]
    fn best_start_column_picks_maximum() {
        let mut map = ProbabilityMap::zeroed();
        map.set(0, 6, 0.01);
        map.set(0, 7, 0.05);
        map.set(0, 8, 0.03);
        assert_eq!(best_start_column(&map, 6..=10), Some(7));
        assert_eq!(best_start_column(&map, std::iter::empty()), None);
    }
}
