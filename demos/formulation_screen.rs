//! Formulation screen over the four base chemicals: QMC evaluation of every
//! candidate, property scoring, competing-ion analysis, Grover confirmation
//! and the fitness comparison figure.

use qsoil::optimizer::{BaseChemical, CompetingIonKind, PROPERTY_KINDS};
use qsoil::{render_fitness_chart, FigureStyle, QsoilError, SolutionOptimizer};
use std::fs;
use std::path::PathBuf;

fn main() {
    match run() {
        Ok(()) => println!("\nAll optimizations complete."),
        Err(e) => eprintln!("\nScreen failed: {}", e),
    }
}

fn run() -> Result<(), QsoilError> {
    println!("{}", "=".repeat(100));
    println!("QUANTUM CHEMICAL SOLUTION OPTIMIZER");
    println!("Statevector QMC trial wavefunctions + Grover confirmation");
    println!("{}", "=".repeat(100));

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

    let optimizer = SolutionOptimizer::new();
    let mut best_fitness = Vec::new();

    for (base, ions) in &scenarios {
        println!("\n{}", "-".repeat(100));
        println!("PROCESSING CHEMICAL: {}", base);
        println!("Target metal: {}", base.target_metal());
        println!("{}", "-".repeat(100));

        let report = optimizer.optimize(*base, ions)?;
        println!(
            "Screened {} formulations, Grover iterations: {}, amplified mass: {:.4}",
            report.ranked.len(),
            report.grover_iterations,
            report.amplified_probability
        );

        println!("\nTop candidates:");
        for outcome in report.ranked.iter().take(5) {
            println!(
                "  #{:<3} {}  fitness {:.3}  VMC {:.3} Ha  retention {:.1}%",
                outcome.index,
                outcome.formulation,
                outcome.fitness,
                outcome.qmc.vmc_energy,
                outcome.competition.capacity_retention
            );
        }

        let best = report.best();
        println!("\nBEST FORMULATION: {}", best.formulation);
        for kind in PROPERTY_KINDS {
            let (low, high) = kind.optimal_range();
            println!(
                "  {:<20} {:>9.2} {:<6} (target {:.1} to {:.1}, achievement {:.1}%)",
                kind.label(),
                kind.of(&best.properties),
                kind.unit(),
                low,
                high,
                best.scores.of(kind)
            );
        }
        println!("  Overall fitness: {:.3}", best.fitness);

        println!("\nCompeting-ion resistance:");
        for (ion, resistance) in &best.competition.selectivity {
            let data = ion.data();
            println!("  {:<10} ({:<6}) {:.1}%", data.name, data.formula, resistance);
        }
        println!(
            "  Capacity retention {:.1}%, interference level {:.1}%",
            best.competition.capacity_retention, best.competition.interference_level
        );

        best_fitness.push((base.label().to_string(), best.fitness));
    }

    let output_dir = PathBuf::from("results");
    fs::create_dir_all(&output_dir).map_err(|e| QsoilError::RenderFailure { message: e.to_string() })?;
    let chart = output_dir.join("formulation_fitness.png");
    render_fitness_chart(&best_fitness, &FigureStyle::default(), "Best Formulation Fitness", &chart)?;
    println!("\nSaved: {}", chart.display());

    Ok(())
}
