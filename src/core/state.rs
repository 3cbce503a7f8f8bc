// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// The joint statevector of all qubits in a running simulation.
///
/// The dimension is 2^N for N qubits; amplitude `k` belongs to the
/// computational basis state whose bit `i` is the value of qubit index `i`
/// (low-order assignment, see the engine).
///
/// `Complex<f64>` is used even though every circuit in this crate built from
/// `Superpose`/`Rotate`/`Entangle` stays real-valued: `PhaseRotate` in the
/// optimizer's trial wavefunction introduces genuine phases.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct RegisterState {
    /// Amplitudes over the computational basis.
    state_vector: Vec<Complex<f64>>,
}

impl RegisterState {
    /// Creates a new register state from a given amplitude vector.
    /// Validation (normalization) happens during simulation, not here.
    pub(crate) fn new(initial_vector: Vec<Complex<f64>>) -> Self {
        Self { state_vector: initial_vector }
    }

    /// Provides read-only access to the internal state vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.state_vector
    }

    /// Provides mutable access for the simulation engine to modify the state.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.state_vector
    }

    /// Gets the dimension (number of basis states) represented.
    pub fn dim(&self) -> usize {
        self.state_vector.len()
    }

    /// Born-rule probability of the basis state `k`.
    pub fn probability(&self, k: usize) -> f64 {
        self.state_vector.get(k).map(|c| c.norm_sqr()).unwrap_or(0.0)
    }
}

impl fmt::Display for RegisterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[")?;
        for (i, c) in self.state_vector.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// A resolved, definite outcome for a qubit after a `Measure` operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MeasuredState {
    /// The sampled classical bit for the measured qubit.
    Outcome(u64),
}

impl MeasuredState {
    /// Helper to extract the numerical value from a measured outcome.
    pub fn value(&self) -> Option<u64> {
        match self {
            MeasuredState::Outcome(val) => Some(*val),
        }
    }
}

impl fmt::Display for MeasuredState {
     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasuredState::Outcome(val) => write!(f, "Measured({})", val),
        }
    }
}
