// src/simulation/results.rs
use crate::core::{MeasuredState, QubitId, RegisterState};
use std::collections::HashMap;
use std::fmt;

/// Holds the results of a circuit simulation.
///
/// Carries the measured classical bits *and* the final register state, so
/// consumers that read probabilities directly (the infiltration map, the
/// QMC energy expectation) do not need to measure at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Maps measured qubit ids to their sampled classical bit.
    measurements: HashMap<QubitId, MeasuredState>,
    /// The register state after the last operation (`None` for an empty
    /// circuit, which never instantiates an engine).
    final_state: Option<RegisterState>,
}

impl SimulationResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            measurements: HashMap::new(),
            final_state: None,
        }
    }

    /// Records a measured bit for a qubit. (Internal visibility)
    pub(crate) fn record_measurement(&mut self, qubit_id: QubitId, state: MeasuredState) {
        self.measurements.insert(qubit_id, state);
    }

    /// Attaches the post-run register state. (Internal visibility)
    pub(crate) fn record_final_state(&mut self, state: RegisterState) {
        self.final_state = Some(state);
    }

    /// Gets the measured bit for a specific qubit, if it was measured.
    pub fn get_measurement(&self, qubit_id: &QubitId) -> Option<&MeasuredState> {
        self.measurements.get(qubit_id)
    }

    /// All recorded measurements.
    pub fn all_measurements(&self) -> &HashMap<QubitId, MeasuredState> {
        &self.measurements
    }

    /// The register state after the last operation, when a run took place.
    pub fn final_state(&self) -> Option<&RegisterState> {
        self.final_state.as_ref()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measurements.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            // Sort by QubitId for consistent and readable output
            let mut sorted_outcomes: Vec<_> = self.measurements.iter().collect();
            sorted_outcomes.sort_by_key(|(id, _)| *id);
            writeln!(f, "  Measured bits:")?;
            for (id, state) in sorted_outcomes {
                writeln!(f, "    {}: {}", id, state)?;
            }
        }
        if let Some(state) = &self.final_state {
            writeln!(f, "  Final register dimension: {}", state.dim())?;
        }
        Ok(())
    }
}
