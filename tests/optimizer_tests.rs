// tests/optimizer_tests.rs

// End-to-end behavior of the formulation screen.

use qsoil::optimizer::{
    derive_properties, standard_formulations, BaseChemical, CompetingIonKind, Formulation,
    FunctionalGroupKind, PropertyKind, QmcEngine, SolutionOptimizer, PROPERTY_KINDS,
};
use qsoil::{Metal, QsoilError};

#[test]
fn standard_candidate_list_is_stable() {
    let formulations = standard_formulations();
    assert_eq!(formulations.len(), 51);
    // Coordination cycles 4, 5, 6 within each group combination.
    assert_eq!(formulations[0].coordination, 4);
    assert_eq!(formulations[1].coordination, 5);
    assert_eq!(formulations[2].coordination, 6);
    // Every candidate respects the site cap.
    for f in &formulations {
        assert!(f.total_coordination_sites() <= 6);
    }
}

#[test]
fn qmc_energies_are_reproducible() -> Result<(), QsoilError> {
    let engine = QmcEngine::new();
    let formulation = Formulation::new(vec![(FunctionalGroupKind::Amine, 2)], 5);
    let first = engine.simulate(&formulation)?;
    let second = engine.simulate(&formulation)?;
    assert_eq!(first, second);
    assert!(first.vmc_energy < 0.0, "model Hamiltonian is bound");
    assert!(first.dmc_energy < first.vmc_energy, "DMC refines downward");
    Ok(())
}

#[test]
fn derived_properties_follow_the_qmc_factors() -> Result<(), QsoilError> {
    let engine = QmcEngine::new();
    let formulation = Formulation::new(vec![(FunctionalGroupKind::Hydroxyl, 2)], 4);
    let qmc = engine.simulate(&formulation)?;
    let properties = derive_properties(&formulation, BaseChemical::IronOxides, &qmc);

    let baseline = BaseChemical::IronOxides.baseline();
    assert!((properties.activation_barrier - (baseline.activation_barrier - qmc.barrier_reduction)).abs() < 1e-12);
    assert_eq!(properties.coordination_number, 6.0);
    // Two hydroxyls shift pKa by -1.0.
    assert!((properties.pka - (baseline.pka - 1.0)).abs() < 1e-12);
    Ok(())
}

#[test]
fn full_screen_for_every_chemical() -> Result<(), QsoilError> {
    let optimizer = SolutionOptimizer::new();
    let scenarios: [(BaseChemical, Vec<(CompetingIonKind, f64)>); 4] = [
        (
            BaseChemical::TrisodiumPhosphate,
            vec![
                (CompetingIonKind::Calcium, 80.0),
                (CompetingIonKind::Magnesium, 40.0),
                (CompetingIonKind::Phosphate, 2.0),
                (CompetingIonKind::Sulfate, 150.0),
            ],
        ),
        (
            BaseChemical::PhosphoricAcid,
            vec![(CompetingIonKind::Calcium, 60.0), (CompetingIonKind::Carbonate, 50.0)],
        ),
        (
            BaseChemical::IronOxides,
            vec![
                (CompetingIonKind::Phosphate, 5.0),
                (CompetingIonKind::Sulfate, 200.0),
                (CompetingIonKind::Carbonate, 40.0),
            ],
        ),
        (
            BaseChemical::FerricSulfate,
            vec![
                (CompetingIonKind::Phosphate, 3.0),
                (CompetingIonKind::Calcium, 100.0),
                (CompetingIonKind::Magnesium, 50.0),
            ],
        ),
    ];

    for (base, ions) in &scenarios {
        let report = optimizer.optimize(*base, ions)?;
        assert_eq!(report.base_chemical, *base);
        assert_eq!(report.ranked.len(), 51);
        assert!(report.best().fitness > 0.0 && report.best().fitness <= 1.0);
        for pair in report.ranked.windows(2) {
            assert!(pair[0].fitness >= pair[1].fitness);
        }
        assert_eq!(report.grover_iterations, 5);
        assert!(
            report.amplified_probability > 0.99,
            "Grover pass must concentrate the mass, got {}",
            report.amplified_probability
        );
        // Scores stay percentages.
        for outcome in &report.ranked {
            for kind in PROPERTY_KINDS {
                let score = outcome.scores.of(kind);
                assert!((0.0..=100.0).contains(&score), "{:?} score {}", kind, score);
            }
        }
    }
    Ok(())
}

#[test]
fn target_metals_follow_the_chemistry() {
    assert_eq!(BaseChemical::TrisodiumPhosphate.target_metal(), Metal::Lead);
    assert_eq!(BaseChemical::FerricSulfate.target_metal(), Metal::Arsenic);
}

#[test]
fn coordination_number_scoring_prefers_the_cap() {
    // Sites 5 and 6 sit inside the optimal range, 4 outside it.
    assert!(qsoil::optimizer::percent_to_ideal(PropertyKind::CoordinationNumber, 6.0) >= 80.0);
    assert!(qsoil::optimizer::percent_to_ideal(PropertyKind::CoordinationNumber, 5.0) >= 80.0);
    assert!(qsoil::optimizer::percent_to_ideal(PropertyKind::CoordinationNumber, 4.0) < 80.0);
}
