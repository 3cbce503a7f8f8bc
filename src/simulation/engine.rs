// src/simulation/engine.rs
use crate::core::{MeasuredState, QsoilError, QubitId, RegisterState};
use crate::operations::Operation;
// NOTE: Does not directly use Circuit, operates on ops passed from Simulator
use crate::simulation::SimulationResult;
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// The statevector engine behind `Simulator`.
///
/// Qubit ids are mapped to bit positions of the basis index in sorted order,
/// with the *first* id on the *lowest* bit. The infiltration readout
/// convention (column from the top nibble of the index) depends on this
/// low-order assignment.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their bit position (0..N-1) in the basis index.
    qubit_indices: HashMap<QubitId, usize>,
    /// The joint statevector of all simulated qubits, dimension 2^N.
    global_state: RegisterState,
}

impl SimulationEngine {
    /// Initializes the engine for a given set of qubits in the `|0...0⟩`
    /// baseline state.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, QsoilError> {
        if qubit_ids.is_empty() {
            return Err(QsoilError::InvalidOperation {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }

        let num_qubits = qubit_ids.len();
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| QsoilError::SimulationError {
            message: "Number of qubits too large, state vector dimension overflows usize".to_string(),
        })?;

        // Sort ids so index assignment is deterministic regardless of
        // HashSet iteration order.
        let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
        sorted_ids.sort();
        let mut qubit_indices = HashMap::with_capacity(num_qubits);
        for (index, qubit_id) in sorted_ids.into_iter().enumerate() {
            qubit_indices.insert(qubit_id, index);
        }

        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::new(1.0, 0.0);
        let global_state = RegisterState::new(initial_vec);

        Ok(Self {
            qubit_indices,
            global_state,
        })
    }

    /// Read access for the simulator and tests.
    pub(crate) fn state(&self) -> &RegisterState {
        &self.global_state
    }

    /// Hands the final state to the result once the run is over.
    pub(crate) fn into_state(self) -> RegisterState {
        self.global_state
    }

    // Crate-visible state override for engine-level tests.
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: RegisterState) -> Result<(), QsoilError> {
        if state.dim() != self.global_state.dim() {
            Err(QsoilError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.global_state.dim()
                ),
            })
        } else {
            self.global_state = state;
            Ok(())
        }
    }

    /// Applies a single non-measurement operation to the global state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), QsoilError> {
        match op {
            Operation::Superpose { target } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &superpose_matrix());
            }
            Operation::Rotate { target, theta } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &rotate_matrix(*theta));
            }
            Operation::PhaseRotate { target, theta } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &phase_rotate_matrix(*theta));
            }
            Operation::Flip { target } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &flip_matrix());
            }
            Operation::Entangle { control, target } => {
                let control_idx = self.qubit_index(control)?;
                let target_idx = self.qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(QsoilError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for an entangling operation".to_string(),
                    });
                }
                self.apply_controlled_flip(control_idx, target_idx);
            }
            Operation::MarkPhase { register, states } => {
                let positions = self.register_positions(register)?;
                self.apply_mark_phase(&positions, states);
            }
            Operation::Diffuse { register } => {
                let positions = self.register_positions(register)?;
                self.apply_diffuse(&positions);
            }
            Operation::Measure { .. } => {
                return Err(QsoilError::InvalidOperation {
                    message: "Measure should not be passed directly to apply_operation".to_string(),
                });
            }
        };
        Ok(())
    }

    /// Sampling collapse of the listed qubits.
    ///
    /// One basis state is drawn from the Born distribution with a PRNG seeded
    /// from a hash of the current amplitudes, the global state collapses onto
    /// it, and the classical bit of every target is recorded. Hash seeding
    /// makes repeated runs of an identical circuit reproducible.
    pub(crate) fn measure(&mut self, targets: &[QubitId], result: &mut SimulationResult) -> Result<(), QsoilError> {
        if targets.is_empty() {
            return Ok(()); // Nothing to measure
        }

        let dim = self.global_state.dim();
        let state_vector = self.global_state.vector();

        // 1. Collect outcomes with non-negligible probability.
        let mut outcomes: Vec<(usize, f64)> = Vec::with_capacity(dim);
        let mut total_probability = 0.0;
        for (k, amplitude) in state_vector.iter().enumerate() {
            let probability = amplitude.norm_sqr();
            if probability > 1e-12 {
                outcomes.push((k, probability));
                total_probability += probability;
            }
        }

        if outcomes.is_empty() || total_probability < 1e-12 {
            return Err(QsoilError::SimulationError {
                message: "Measurement failed: state carries no probability mass".to_string(),
            });
        }

        // 2. Deterministic seeding from the amplitude bytes.
        let seed = {
            let mut hasher = DefaultHasher::new();
            for complex_val in state_vector {
                complex_val.re.to_ne_bytes().hash(&mut hasher);
                complex_val.im.to_ne_bytes().hash(&mut hasher);
            }
            hasher.finish()
        };
        let mut rng = StdRng::seed_from_u64(seed);

        // 3. Weighted draw over the surviving outcomes.
        let p_sample: f64 = rng.random::<f64>() * total_probability;
        let mut cumulative = 0.0;
        let mut chosen_index: usize = outcomes.last().map(|(idx, _)| *idx).unwrap_or(0);
        for (index, probability) in &outcomes {
            cumulative += *probability;
            if p_sample < cumulative {
                chosen_index = *index;
                break;
            }
        }

        // 4. Collapse onto the chosen basis state.
        let mut new_state_vec = vec![Complex::zero(); dim];
        new_state_vec[chosen_index] = Complex::new(1.0, 0.0);
        self.global_state = RegisterState::new(new_state_vec);

        // 5. Record the classical bits for the targeted qubits.
        for target_qubit_id in targets {
            if let Some(target_idx) = self.qubit_indices.get(target_qubit_id) {
                let outcome_bit = (chosen_index >> *target_idx) & 1;
                result.record_measurement(*target_qubit_id, MeasuredState::Outcome(outcome_bit as u64));
            } else {
                return Err(QsoilError::InvalidOperation {
                    message: format!("Qubit {} targeted for measurement not found in simulation context", target_qubit_id),
                });
            }
        }

        Ok(())
    }

    /// Helper to get a qubit's bit position, with a specific error if absent.
    fn qubit_index(&self, qubit_id: &QubitId) -> Result<usize, QsoilError> {
        self.qubit_indices
            .get(qubit_id)
            .copied()
            .ok_or_else(|| QsoilError::InvalidOperation {
                message: format!("Qubit {} not found in simulation context", qubit_id),
            })
    }

    /// Resolves a register of qubit ids to distinct bit positions.
    fn register_positions(&self, register: &[QubitId]) -> Result<Vec<usize>, QsoilError> {
        if register.is_empty() {
            return Err(QsoilError::InvalidOperation {
                message: "Register operation applied to an empty register".to_string(),
            });
        }
        let mut positions = Vec::with_capacity(register.len());
        for qubit_id in register {
            let pos = self.qubit_index(qubit_id)?;
            if positions.contains(&pos) {
                return Err(QsoilError::InvalidOperation {
                    message: format!("Qubit {} appears twice in a register operation", qubit_id),
                });
            }
            positions.push(pos);
        }
        Ok(positions)
    }

    // --- State manipulation helpers ---
    // The basis index carries qubit `i` on bit `i`; every loop below walks
    // the subspace where the affected bits are zero and updates the pair or
    // block of amplitudes it anchors.

    /// Applies a 2x2 matrix to a single qubit within the global state vector.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k_mask = 1usize << target_idx;
        let dim = self.global_state.dim();
        let vec = self.global_state.vector_mut();

        for i0 in 0..dim {
            if i0 & k_mask != 0 {
                continue; // visit each |...0...⟩ / |...1...⟩ pair once
            }
            let i1 = i0 | k_mask;
            let psi_0 = vec[i0];
            let psi_1 = vec[i1];
            vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Applies a controlled flip (CNOT) with the given control/target bit
    /// positions: swaps the target pair inside the control-is-one subspace.
    fn apply_controlled_flip(&mut self, control_idx: usize, target_idx: usize) {
        let c_mask = 1usize << control_idx;
        let t_mask = 1usize << target_idx;
        let dim = self.global_state.dim();
        let vec = self.global_state.vector_mut();

        for i in 0..dim {
            if i & c_mask == 0 || i & t_mask != 0 {
                continue; // anchor on |control=1, target=0⟩
            }
            vec.swap(i, i | t_mask);
        }
    }

    /// Oracle phase flip: negates every basis amplitude whose register value
    /// (register\[0\] as the low bit) is listed in `states`.
    fn apply_mark_phase(&mut self, positions: &[usize], states: &[u64]) {
        let marked: HashSet<u64> = states.iter().copied().collect();
        let vec = self.global_state.vector_mut();

        for (i, amplitude) in vec.iter_mut().enumerate() {
            let mut value: u64 = 0;
            for (j, pos) in positions.iter().enumerate() {
                value |= (((i >> pos) & 1) as u64) << j;
            }
            if marked.contains(&value) {
                *amplitude = -*amplitude;
            }
        }
    }

    /// Grover diffusion: inverts the register amplitudes about their mean,
    /// independently for every assignment of the remaining qubits.
    fn apply_diffuse(&mut self, positions: &[usize]) {
        let reg_len = positions.len();
        let block = 1usize << reg_len;
        let mask: usize = positions.iter().map(|p| 1usize << p).sum();
        let dim = self.global_state.dim();
        let vec = self.global_state.vector_mut();

        // Scatters a register value onto its bit positions in the index.
        let scatter = |value: usize| -> usize {
            let mut bits = 0usize;
            for (j, pos) in positions.iter().enumerate() {
                bits |= ((value >> j) & 1) << pos;
            }
            bits
        };

        for base in 0..dim {
            if base & mask != 0 {
                continue; // one pass per assignment of the non-register qubits
            }
            let mut mean = Complex::zero();
            for v in 0..block {
                mean += vec[base | scatter(v)];
            }
            mean /= block as f64;
            for v in 0..block {
                let idx = base | scatter(v);
                vec[idx] = 2.0 * mean - vec[idx];
            }
        }
    }

}

// --- Gate matrices ---

/// Hadamard: equal-weight superposition.
fn superpose_matrix() -> [[Complex<f64>; 2]; 2] {
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// RY(theta): excitation rotation, `P(|1⟩) = sin²(θ/2)` from `|0⟩`.
fn rotate_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let half = theta / 2.0;
    let cos_a = Complex::new(half.cos(), 0.0);
    let sin_a = Complex::new(half.sin(), 0.0);
    [[cos_a, -sin_a], [sin_a, cos_a]]
}

/// RZ(theta): `diag(e^(-iθ/2), e^(iθ/2))`.
fn phase_rotate_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let half = theta / 2.0;
    [
        [Complex::new(half.cos(), -half.sin()), Complex::zero()],
        [Complex::zero(), Complex::new(half.cos(), half.sin())],
    ]
}

/// X: deterministic bit flip.
fn flip_matrix() -> [[Complex<f64>; 2]; 2] {
    let one = Complex::new(1.0, 0.0);
    [[Complex::zero(), one], [one, Complex::zero()]]
}
