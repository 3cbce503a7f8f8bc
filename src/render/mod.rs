// src/render/mod.rs

//! Publication-figure rendering for infiltration maps, branch overlays and
//! screening results.
//!
//! Rendering is a collaborator of the simulation core: it consumes finished
//! maps and branch sets and draws PNG files with `plotters`. All styling
//! arrives through [`FigureStyle`].

mod style;

pub use style::FigureStyle;

use crate::branching::BranchSet;
use crate::core::constants::grid;
use crate::core::QsoilError;
use crate::infiltration::ProbabilityMap;
use plotters::prelude::*;
use std::path::Path;

/// Wraps any plotters failure into the crate's error type.
fn render_error<E: std::fmt::Display>(error: E) -> QsoilError {
    QsoilError::RenderFailure { message: error.to_string() }
}

/// Renders one metal's infiltration heatmap with its branch overlay.
///
/// The heat range adapts to the map's actual spread, the branch lines are
/// weighted and faded by their accumulated probability, and a badge notes
/// the branch count. Layer 0 is drawn at the top edge.
pub fn render_infiltration(
    map: &ProbabilityMap,
    branches: &BranchSet,
    style: &FigureStyle,
    title: &str,
    path: &Path,
) -> Result<(), QsoilError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let depth = grid::DEPTH as f64;
    let width = grid::WIDTH as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(46)
        .build_cartesian_2d(0.0..width, 0.0..depth)
        .map_err(render_error)?;

    // The vertical axis is flipped by hand: plotted y = depth - layer, and
    // the labels translate back to layer numbers.
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Horizontal Position")
        .y_desc("Depth Layer")
        .x_label_formatter(&|x| format!("{}", *x as i32))
        .y_label_formatter(&|y| format!("{}", (depth - y) as i32))
        .label_style(("sans-serif", 13))
        .draw()
        .map_err(render_error)?;

    // Adaptive heat range, stretched slightly past the observed extremes.
    let mut low = f64::MAX;
    let mut high = f64::MIN;
    for (_, _, value) in map.cells() {
        low = low.min(value);
        high = high.max(value);
    }
    let spread = high - low;
    let heat_min = (low - 0.1 * spread).max(0.0);
    let heat_max = high + 0.05 * spread;
    let heat_span = (heat_max - heat_min).max(f64::MIN_POSITIVE);

    chart
        .draw_series(map.cells().map(|(layer, column, value)| {
            let t = (value - heat_min) / heat_span;
            let color = style.gradient_sample(t);
            let x0 = column as f64;
            let y_top = depth - layer as f64;
            Rectangle::new([(x0, y_top - 1.0), (x0 + 1.0, y_top)], color.filled())
        }))
        .map_err(render_error)?;

    // Branch overlay: probability-weighted gold lines with node markers.
    for branch in branches.paths() {
        if branch.steps.len() < 2 {
            continue;
        }
        let points: Vec<(f64, f64)> = branch
            .steps
            .iter()
            .map(|(layer, column)| (*column as f64 + 0.5, depth - *layer as f64 - 0.5))
            .collect();
        let alpha = (branch.probability * 5.0).min(0.95);
        let weight = (branch.probability * 10.0).max(2.0) as u32;
        chart
            .draw_series(LineSeries::new(
                points.clone(),
                style.branch_color.mix(alpha).stroke_width(weight),
            ))
            .map_err(render_error)?;
        chart
            .draw_series(points.iter().map(|point| {
                Circle::new(*point, 4, style.marker_color.mix(0.9).filled())
            }))
            .map_err(render_error)?;
    }

    if !branches.is_empty() {
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{} branches", branches.branch_count()),
                (0.3, depth - 0.2),
                ("sans-serif", 16).into_font().color(&BLACK),
            )))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)
}

/// Renders a fitness bar chart, one bar per labelled entry in [0, 1].
pub fn render_fitness_chart(
    entries: &[(String, f64)],
    style: &FigureStyle,
    title: &str,
    path: &Path,
) -> Result<(), QsoilError> {
    if entries.is_empty() {
        return Err(QsoilError::InvalidArgument {
            message: "fitness chart needs at least one entry".to_string(),
        });
    }

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let count = entries.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(64)
        .y_label_area_size(46)
        .build_cartesian_2d(0.0..count, 0.0..1.0)
        .map_err(render_error)?;

    let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Fitness")
        .x_label_formatter(&|x| {
            let index = *x as usize;
            if *x >= 0.0 && (*x - index as f64 - 0.5).abs() < 0.25 {
                labels.get(index).copied().unwrap_or("").to_string()
            } else {
                String::new()
            }
        })
        .x_labels(entries.len() * 2)
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, (_, fitness))| {
            let x0 = i as f64 + 0.2;
            let x1 = i as f64 + 0.8;
            Rectangle::new([(x0, 0.0), (x1, fitness.clamp(0.0, 1.0))], style.bar_color.filled())
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)
}
