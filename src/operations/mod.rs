// src/operations/mod.rs

//! Defines the operations a circuit can apply to its qubits.
//!
//! The set is a closed enum rather than a string-keyed pattern registry:
//! every gate the infiltration ladder and the formulation optimizer need is
//! listed here, and the engine rejects nothing at dispatch time except
//! genuinely inconsistent wiring (e.g. a two-qubit gate with control ==
//! target).

use crate::core::QubitId;

/// A single step in a circuit.
///
/// `MarkPhase` and `Diffuse` act on an explicit multi-qubit register so a
/// Grover pass can be written as ordinary circuit operations; all other
/// gates address one or two qubits.
#[derive(Debug, Clone, PartialEq)] // PartialEq useful for testing circuits; f64 comparison needs care.
pub enum Operation {
    /// Equal-weight superposition of one qubit (Hadamard).
    Superpose {
        /// The qubit placed into superposition.
        target: QubitId,
    },

    /// Excitation rotation of one qubit (RY).
    /// `theta` usually comes from [`excitation_angle`], which maps a
    /// probability of the `|1⟩` outcome to a rotation angle.
    Rotate {
        /// The rotated qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Phase rotation of one qubit (RZ). Leaves outcome probabilities
    /// untouched; the optimizer uses it to encode functional-group character
    /// into the trial wavefunction.
    PhaseRotate {
        /// The rotated qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Deterministic bit flip of one qubit (X).
    Flip {
        /// The flipped qubit.
        target: QubitId,
    },

    /// Controlled flip of `target` conditioned on `control` (CNOT).
    /// The ladder circuit uses it to couple adjacent depth layers.
    Entangle {
        /// The qubit whose value conditions the flip.
        control: QubitId,
        /// The conditionally flipped qubit.
        target: QubitId,
    },

    /// Oracle phase flip: negates the amplitude of every basis assignment of
    /// `register` listed in `states`. The value of an assignment is read with
    /// `register[0]` as its least significant bit.
    MarkPhase {
        /// The qubits forming the searched register, low bit first.
        register: Vec<QubitId>,
        /// Marked register values.
        states: Vec<u64>,
    },

    /// Grover diffusion: inversion of the `register` amplitudes about their
    /// mean, applied independently for every assignment of the remaining
    /// qubits.
    Diffuse {
        /// The qubits forming the searched register, low bit first.
        register: Vec<QubitId>,
    },

    /// Sampling collapse of the listed qubits. The engine draws one basis
    /// state from the Born distribution with a PRNG seeded from a hash of
    /// the current amplitudes, so repeated runs of the same circuit observe
    /// the same outcome.
    Measure {
        /// The qubits whose classical bits are recorded.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns all qubit ids directly mentioned in the operation's
    /// parameters. The circuit uses this to register qubits; the engine to
    /// size the state vector.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Superpose { target } => vec![*target],
            Operation::Rotate { target, .. } => vec![*target],
            Operation::PhaseRotate { target, .. } => vec![*target],
            Operation::Flip { target } => vec![*target],
            Operation::Entangle { control, target } => vec![*control, *target],
            Operation::MarkPhase { register, .. } => register.clone(),
            Operation::Diffuse { register } => register.clone(),
            Operation::Measure { targets } => targets.clone(),
        }
    }
}

/// Converts a `|1⟩` outcome probability into the matching `Rotate` angle.
///
/// For RY: `P(|1⟩) = sin²(θ/2)`, so `θ = 2·asin(√p)`. The input is clamped
/// into [0,1] first; model code feeds this with computed feature values that
/// can overshoot by rounding.
pub fn excitation_angle(probability: f64) -> f64 {
    let p = probability.clamp(0.0, 1.0);
    2.0 * p.sqrt().asin()
}
