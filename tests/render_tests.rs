// tests/render_tests.rs

// Smoke tests for the figure renderers: files must appear and carry real
// image data.

use qsoil::{
    render_fitness_chart, render_infiltration, FigureStyle, InfiltrationModel, Metal, QsoilError,
    SiteConditions,
};
use std::fs;
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("qsoil_render_tests");
    fs::create_dir_all(&dir).expect("temp dir must be writable");
    dir.join(name)
}

#[test]
fn infiltration_figure_is_written() -> Result<(), QsoilError> {
    let model = InfiltrationModel::new(Metal::Lead, SiteConditions::default());
    let map = model.probability_map()?;
    let branches = model.enumerate(7, 0.001)?;

    let path = scratch_path("lead_infiltration.png");
    render_infiltration(&map, &branches, &FigureStyle::default(), "Lead (Pb) Infiltration", &path)?;

    let metadata = fs::metadata(&path).expect("figure file must exist");
    assert!(metadata.len() > 1_000, "png should carry image data, got {} bytes", metadata.len());
    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn fitness_chart_is_written() -> Result<(), QsoilError> {
    let entries = vec![
        ("TSP".to_string(), 0.81),
        ("H3PO4".to_string(), 0.74),
        ("FeOOH".to_string(), 0.69),
        ("Fe2(SO4)3".to_string(), 0.72),
    ];

    let path = scratch_path("fitness_chart.png");
    render_fitness_chart(&entries, &FigureStyle::default(), "Best Formulation Fitness", &path)?;

    let metadata = fs::metadata(&path).expect("chart file must exist");
    assert!(metadata.len() > 1_000, "png should carry image data, got {} bytes", metadata.len());
    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn fitness_chart_rejects_empty_input() {
    let path = scratch_path("never_written.png");
    let outcome = render_fitness_chart(&[], &FigureStyle::default(), "empty", &path);
    assert!(matches!(outcome, Err(QsoilError::InvalidArgument { .. })));
}

#[test]
fn empty_branch_set_renders_plain_heatmap() -> Result<(), QsoilError> {
    // A surface below the visibility cutoff yields no branches; the heatmap
    // must still render.
    let model = InfiltrationModel::with_step_probability(0.9)?;
    let map = model.probability_map()?;
    let branches = model.enumerate(7, 0.001)?;
    assert!(branches.is_empty(), "column 7 sits under the visibility cutoff at this step probability");

    let path = scratch_path("plain_heatmap.png");
    render_infiltration(&map, &branches, &FigureStyle::default(), "No Infiltration", &path)?;
    assert!(fs::metadata(&path).map(|m| m.len() > 1_000).unwrap_or(false));
    let _ = fs::remove_file(&path);
    Ok(())
}
