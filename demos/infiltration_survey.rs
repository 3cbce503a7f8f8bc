//! End-to-end infiltration survey: simulates both metals at the reference
//! site, enumerates their drift branches and renders the heatmap figures.

use qsoil::{
    infiltration::best_start_column, render_infiltration, FigureStyle, InfiltrationModel, Metal,
    QsoilError, SiteConditions,
};
use std::fs;
use std::path::PathBuf;

fn main() {
    match run() {
        Ok(()) => println!("\nSurvey complete."),
        Err(e) => eprintln!("\nSurvey failed: {}", e),
    }
}

fn run() -> Result<(), QsoilError> {
    println!("{}", "=".repeat(60));
    println!("QUANTUM INFILTRATION SURVEY");
    println!("{}", "=".repeat(60));

    let conditions = SiteConditions::default();
    println!("\nGrid: 16 columns x 10 layers, 14-qubit ladder per metal");
    println!("Site: soil index {}, pH {}, t = {}", conditions.soil_index, conditions.ph, conditions.time);
    println!("Surface runoff probability: {:.6}", conditions.runoff_probability());

    for metal in [Metal::Lead, Metal::Arsenic] {
        println!(
            "\n{} step probability: {:.6} (soil {:.2}% + pH {:.2}%)",
            metal,
            metal.step_probability(&conditions),
            metal.soil_weight() * 100.0,
            metal.ph_weight() * 100.0
        );
    }

    // Pick the best starting column from the lead surface, middle region
    // only so branches can fan out both ways.
    let lead_model = InfiltrationModel::new(Metal::Lead, conditions);
    let lead_map = lead_model.probability_map()?;
    let start = best_start_column(&lead_map, 6..=10).unwrap_or(8);
    println!(
        "\nBest starting column: {} (surface probability {:.4})",
        start,
        lead_map.get(0, start)
    );

    let output_dir = PathBuf::from("results");
    fs::create_dir_all(&output_dir).map_err(|e| QsoilError::RenderFailure { message: e.to_string() })?;
    let style = FigureStyle::default();

    for metal in [Metal::Lead, Metal::Arsenic] {
        println!("\n{}", "-".repeat(60));
        println!("SIMULATING {}", metal);
        println!("{}", "-".repeat(60));

        let model = InfiltrationModel::new(metal, conditions);
        let circuit = model.circuit();
        println!("Ladder circuit: {} qubits, {} operations", circuit.qubits().len(), circuit.len());

        let map = model.probability_map()?;
        let branches = model.enumerate(start, 0.001)?;

        println!("Average occupancy: {:.4}", map.mean());
        println!("Maximum occupancy: {:.4}", map.max());
        if branches.is_empty() {
            println!(
                "Surface probability {:.4} below visibility cutoff - no significant infiltration",
                branches.surface_probability()
            );
        } else {
            println!("Branches: {}", branches.branch_count());
            println!(
                "Deepest penetration: layer {}/{}",
                branches.deepest_layer().unwrap_or(0),
                10
            );
            for path in branches.paths() {
                println!("  depth {} probability {:.3e}", path.deepest_layer(), path.probability);
            }
        }

        let file = output_dir.join(match metal {
            Metal::Lead => "lead_infiltration.png",
            Metal::Arsenic => "arsenic_infiltration.png",
        });
        let title = format!("{} Infiltration - Branching Paths", model.label());
        render_infiltration(&map, &branches, &style, &title, &file)?;
        println!("Saved: {}", file.display());
    }

    Ok(())
}
