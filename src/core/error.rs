//! Error handling logic

use std::fmt;

/// Unique identifier for a qubit within a circuit.
/// Uniqueness is context-dependent: the simulation engine assigns basis-index
/// bit positions from the sorted set of ids appearing in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types for simulation, enumeration and rendering failures.
///
/// Invalid caller input is always `InvalidArgument`; an empty branch set is a
/// legitimate enumeration outcome and is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum QsoilError {
    /// A caller-supplied parameter is outside its documented range
    /// (probability outside [0,1], column outside the grid, ...).
    InvalidArgument {
        /// InvalidArgument failure message
        message: String
    },

    /// An applied operation is inconsistent with the current circuit or state
    /// (duplicate control/target, register not part of the circuit, ...).
    InvalidOperation {
        /// InvalidOperation failure message
        message: String
    },

    /// The register state lost normalization beyond tolerance.
    Incoherence {
        /// Incoherence failure message
        message: String
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String
    },

    /// A figure could not be drawn or written.
    RenderFailure {
        /// RenderFailure failure message
        message: String
    },
}

impl fmt::Display for QsoilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QsoilError::InvalidArgument { message } => write!(f, "Invalid Argument: {}", message),
            QsoilError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            QsoilError::Incoherence { message } => write!(f, "Incoherence Violation: {}", message),
            QsoilError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
            QsoilError::RenderFailure { message } => write!(f, "Render Failure: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for QsoilError {}
