// src/optimizer/ions.rs

//! Competing-ion interference analysis for a formulation in a given water
//! chemistry.

use super::chemistry::CompetingIonKind;
use super::formulation::{Formulation, MAX_COORDINATION_SITES};
use crate::infiltration::Metal;

/// Interference outcome for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct IonCompetition {
    /// Selectivity resistance per ion, percent.
    pub selectivity: Vec<(CompetingIonKind, f64)>,
    /// Binding capacity retained under interference, percent.
    pub capacity_retention: f64,
    /// Total interference level, percent.
    pub interference_level: f64,
}

/// Evaluates how well a formulation holds its target metal against the
/// competing ions of a scenario (`(ion, concentration mg/L)` pairs).
pub fn analyze(
    formulation: &Formulation,
    target_metal: Metal,
    competing_ions: &[(CompetingIonKind, f64)],
) -> IonCompetition {
    let target_affinity = match target_metal {
        Metal::Lead => 0.95,
        Metal::Arsenic => 0.90,
    };
    let total_sites = formulation.total_coordination_sites();
    let site_advantage = (total_sites as f64 / MAX_COORDINATION_SITES as f64).sqrt();
    let group_bonus: f64 = formulation
        .groups
        .iter()
        .map(|(kind, count)| kind.data().electron_donating_power * *count as f64 * 0.05)
        .sum();

    let mut selectivity = Vec::with_capacity(competing_ions.len());
    let mut total_interference = 0.0;

    for (ion_kind, concentration) in competing_ions {
        let ion = ion_kind.data();
        let selectivity_coefficient =
            (target_affinity / (ion.affinity + 0.01)) * site_advantage * (1.0 + group_bonus);
        let resistance = (selectivity_coefficient * 50.0).min(95.0);
        selectivity.push((*ion_kind, resistance));
        total_interference += (1.0 - resistance / 100.0) * (concentration / 100.0);
    }

    IonCompetition {
        selectivity,
        capacity_retention: (100.0 - total_interference * 100.0).max(10.0),
        interference_level: total_interference * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::chemistry::FunctionalGroupKind::Amine;

    #[test]
    fn stronger_formulations_resist_better() {
        let weak = Formulation::new(vec![], 4);
        let strong = Formulation::new(vec![(Amine, 2)], 6);
        let ions = [(CompetingIonKind::Calcium, 80.0)];

        let weak_result = analyze(&weak, Metal::Lead, &ions);
        let strong_result = analyze(&strong, Metal::Lead, &ions);
        assert!(strong_result.selectivity[0].1 >= weak_result.selectivity[0].1);
        assert!(strong_result.capacity_retention >= weak_result.capacity_retention);
    }

    #[test]
    fn resistance_is_capped_at_ninety_five() {
        let strong = Formulation::new(vec![(Amine, 3)], 6);
        let ions = [(CompetingIonKind::Sulfate, 150.0)];
        let result = analyze(&strong, Metal::Lead, &ions);
        assert!(result.selectivity[0].1 <= 95.0);
    }

    #[test]
    fn retention_never_falls_below_floor() {
        let weak = Formulation::new(vec![], 4);
        let flood: Vec<(CompetingIonKind, f64)> = vec![
            (CompetingIonKind::Calcium, 10_000.0),
            (CompetingIonKind::Phosphate, 10_000.0),
        ];
        let result = analyze(&weak, Metal::Arsenic, &flood);
        assert_eq!(result.capacity_retention, 10.0);
        assert!(result.interference_level > 100.0);
    }
}
