// src/optimizer/grover.rs

//! Grover amplification over the formulation index register.
//!
//! The oracle marks the indices of the leading candidates; the standard
//! iteration count then concentrates nearly all probability mass on them,
//! which the screen reports as confirmation of its classical ranking.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{QsoilError, QubitId, RegisterState};
use crate::operations::Operation;
use crate::simulation::Simulator;
use std::f64::consts::PI;

/// Register width of the index search; 2^8 = 256 states cover the 51
/// candidates with room for growth.
pub const SEARCH_QUBITS: usize = 8;

/// Optimal Grover iteration count, `⌊π/4 · √(N/M)⌋`.
///
/// Zero when nothing (or everything) is marked, where amplification is
/// meaningless.
pub fn optimal_iterations(n_states: usize, n_solutions: usize) -> usize {
    if n_solutions == 0 || n_solutions >= n_states {
        return 0;
    }
    (PI / 4.0 * ((n_states as f64) / (n_solutions as f64)).sqrt()) as usize
}

/// Builds the amplification circuit: uniform superposition followed by
/// `iterations` oracle/diffusion rounds over the given marked values.
pub fn amplification_circuit(register_width: usize, marked: &[u64], iterations: usize) -> Circuit {
    let register: Vec<QubitId> = (0..register_width as u64).map(QubitId).collect();
    let mut builder = CircuitBuilder::new();

    for q in &register {
        builder = builder.add_op(Operation::Superpose { target: *q });
    }
    for _ in 0..iterations {
        builder = builder
            .add_op(Operation::MarkPhase {
                register: register.clone(),
                states: marked.to_vec(),
            })
            .add_op(Operation::Diffuse { register: register.clone() });
    }

    builder.build()
}

/// Outcome of one amplification run.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplificationOutcome {
    /// Iterations applied.
    pub iterations: usize,
    /// Total probability mass on the marked values after amplification.
    pub marked_probability: f64,
    /// The most probable register value.
    pub best_value: u64,
}

/// Runs the amplification for the given marked values and reads the
/// resulting distribution.
///
/// # Errors
/// `InvalidArgument` when a marked value does not fit the register.
pub fn amplify(marked: &[u64]) -> Result<AmplificationOutcome, QsoilError> {
    let n_states = 1usize << SEARCH_QUBITS;
    for value in marked {
        if *value >= n_states as u64 {
            return Err(QsoilError::InvalidArgument {
                message: format!("marked value {} does not fit a {}-qubit register", value, SEARCH_QUBITS),
            });
        }
    }

    let iterations = optimal_iterations(n_states, marked.len());
    let circuit = amplification_circuit(SEARCH_QUBITS, marked, iterations);
    let result = Simulator::new().run(&circuit)?;
    let state = result.final_state().ok_or_else(|| QsoilError::SimulationError {
        message: "Amplification run produced no final state".to_string(),
    })?;

    Ok(AmplificationOutcome {
        iterations,
        marked_probability: marked_mass(state, marked),
        best_value: most_probable_value(state),
    })
}

fn marked_mass(state: &RegisterState, marked: &[u64]) -> f64 {
    marked.iter().map(|value| state.probability(*value as usize)).sum()
}

fn most_probable_value(state: &RegisterState) -> u64 {
    let mut best = 0usize;
    let mut best_probability = -1.0;
    for k in 0..state.dim() {
        let p = state.probability(k);
        if p > best_probability {
            best_probability = p;
            best = k;
        }
    }
    best as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_count_matches_formula() {
        assert_eq!(optimal_iterations(256, 5), 5);
        assert_eq!(optimal_iterations(8, 1), 2);
        assert_eq!(optimal_iterations(256, 0), 0);
        assert_eq!(optimal_iterations(4, 4), 0);
    }

    #[test]
    fn five_marked_states_absorb_the_mass() -> Result<(), QsoilError> {
        let outcome = amplify(&[3, 17, 40, 41, 50])?;
        assert_eq!(outcome.iterations, 5);
        assert!(
            (outcome.marked_probability - 0.999190766).abs() < 1e-6,
            "marked mass {}",
            outcome.marked_probability
        );
        assert!([3u64, 17, 40, 41, 50].contains(&outcome.best_value));
        Ok(())
    }

    #[test]
    fn rejects_oversized_marked_value() {
        assert!(matches!(
            amplify(&[256]),
            Err(QsoilError::InvalidArgument { .. })
        ));
    }
}
