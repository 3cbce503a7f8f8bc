// src/optimizer/mod.rs

//! The chemical formulation screen: QMC evaluation of every candidate,
//! property scoring against the optimal targets, competing-ion analysis and
//! Grover confirmation of the leading set.

pub mod chemistry;
mod formulation;
pub mod grover;
mod ions;
mod qmc;
mod properties;

pub use chemistry::{BaseChemical, CompetingIonKind, FunctionalGroupKind, Properties, PropertyKind, PROPERTY_KINDS};
pub use formulation::{standard_formulations, Formulation, MAX_COORDINATION_SITES};
pub use ions::IonCompetition;
pub use properties::{derive_properties, fitness, percent_to_ideal, score_properties, PropertyScores};
pub use qmc::{QmcEngine, QmcOutcome, TRIAL_QUBITS};

use crate::core::QsoilError;
use crate::infiltration::Metal;

/// How many leading candidates the Grover pass confirms.
const CONFIRMED_CANDIDATES: usize = 5;

/// Everything the screen learned about one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulationOutcome {
    /// Position of the candidate in the generated list.
    pub index: usize,
    /// The candidate itself.
    pub formulation: Formulation,
    /// QMC energies and factors.
    pub qmc: QmcOutcome,
    /// Derived post-modification properties.
    pub properties: Properties,
    /// Percent-to-ideal per property.
    pub scores: PropertyScores,
    /// Competing-ion interference for the scenario.
    pub competition: IonCompetition,
    /// Overall fitness in [0, 1].
    pub fitness: f64,
}

/// Result of screening one base chemical in one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    /// The screened base chemical.
    pub base_chemical: BaseChemical,
    /// Its target metal.
    pub target_metal: Metal,
    /// All candidates, best fitness first.
    pub ranked: Vec<FormulationOutcome>,
    /// Grover iterations applied to the index register.
    pub grover_iterations: usize,
    /// Probability mass concentrated on the confirmed set.
    pub amplified_probability: f64,
}

impl OptimizationReport {
    /// The winning candidate.
    pub fn best(&self) -> &FormulationOutcome {
        &self.ranked[0]
    }
}

/// Drives the full screen for one base chemical.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionOptimizer {
    qmc: QmcEngine,
}

impl SolutionOptimizer {
    /// Creates an optimizer with the standard QMC engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Screens every standard formulation of `base_chemical` under the
    /// given competing-ion scenario and confirms the leading set with a
    /// Grover pass.
    pub fn optimize(
        &self,
        base_chemical: BaseChemical,
        competing_ions: &[(CompetingIonKind, f64)],
    ) -> Result<OptimizationReport, QsoilError> {
        let target_metal = base_chemical.target_metal();
        let formulations = standard_formulations();

        let mut ranked = Vec::with_capacity(formulations.len());
        for (index, formulation) in formulations.into_iter().enumerate() {
            let qmc = self.qmc.simulate(&formulation)?;
            let properties = derive_properties(&formulation, base_chemical, &qmc);
            let scores = score_properties(&properties);
            let competition = ions::analyze(&formulation, target_metal, competing_ions);
            let fitness = properties::fitness(&scores);

            ranked.push(FormulationOutcome {
                index,
                formulation,
                qmc,
                properties,
                scores,
                competition,
                fitness,
            });
        }

        // Best fitness first; ties keep generation order.
        ranked.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal));

        let marked: Vec<u64> = ranked
            .iter()
            .take(CONFIRMED_CANDIDATES)
            .map(|outcome| outcome.index as u64)
            .collect();
        let amplification = grover::amplify(&marked)?;

        Ok(OptimizationReport {
            base_chemical,
            target_metal,
            ranked,
            grover_iterations: amplification.iterations,
            amplified_probability: amplification.marked_probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_ranks_all_candidates() -> Result<(), QsoilError> {
        let scenario = [(CompetingIonKind::Calcium, 60.0), (CompetingIonKind::Carbonate, 50.0)];
        let report = SolutionOptimizer::new().optimize(BaseChemical::PhosphoricAcid, &scenario)?;

        assert_eq!(report.ranked.len(), 51);
        assert_eq!(report.target_metal, Metal::Lead);
        for pair in report.ranked.windows(2) {
            assert!(pair[0].fitness >= pair[1].fitness, "ranking must be sorted");
        }
        assert_eq!(report.grover_iterations, 5);
        assert!(report.amplified_probability > 0.99);
        Ok(())
    }

    #[test]
    fn screen_is_deterministic() -> Result<(), QsoilError> {
        let scenario = [(CompetingIonKind::Phosphate, 5.0)];
        let optimizer = SolutionOptimizer::new();
        let a = optimizer.optimize(BaseChemical::IronOxides, &scenario)?;
        let b = optimizer.optimize(BaseChemical::IronOxides, &scenario)?;
        assert_eq!(a.best().index, b.best().index);
        assert_eq!(a.best().fitness, b.best().fitness);
        Ok(())
    }
}
