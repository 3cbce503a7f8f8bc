// src/simulation/mod.rs

//! Simulates the execution of `qsoil::circuits::Circuit`.
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` that evolves the joint statevector.

// Make engine module crate visible for tests
mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::QsoilError;
use crate::operations::Operation;
use crate::validation::check_normalization;
use engine::SimulationEngine;

/// The main simulator orchestrating the execution of circuits.
#[derive(Default)] // Allows Simulator::default() -> Simulator::new()
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// Executes the gate sequence, performs sampling collapse on every
    /// `Measure`, verifies the final state kept its normalization and
    /// returns the measured bits together with the final register state.
    ///
    /// # Arguments
    /// * `circuit` - The `Circuit` definition to simulate.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with measured bits and the final state.
    /// * `Err(QsoilError)` when an operation is inconsistent with the
    ///   circuit or the state loses coherence.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, QsoilError> {
        // Handle empty circuit case
        if circuit.is_empty() {
            return Ok(SimulationResult::new());
        }

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut result = SimulationResult::new();

        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => {
                    engine.measure(targets, &mut result)?;
                }
                _ => {
                    engine.apply_operation(op)?;
                }
            }
        }

        // Unitary gates and collapse both preserve the norm; a deviation
        // here means the engine itself misbehaved.
        check_normalization(engine.state(), None)?;

        result.record_final_state(engine.into_state());
        Ok(result)
    }
}
