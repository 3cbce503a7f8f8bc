// src/validation/mod.rs

//! Consistency checks over register states, probability maps and branch
//! sets. The simulator runs the normalization check after every run; the
//! map and branch checks back the enumerator's documented properties and
//! are exercised by the integration tests.

use crate::branching::BranchSet;
use crate::core::constants::{grid, tolerance};
use crate::core::{QsoilError, RegisterState};
use crate::infiltration::ProbabilityMap;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = tolerance::NORM;
const DEFAULT_PRODUCT_TOLERANCE: f64 = 1e-9;

/// Checks that the state vector is normalized (sum of squared amplitudes
/// ≈ 1.0).
///
/// # Arguments
/// * `state` - The `RegisterState` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QsoilError::Incoherence)` if normalization fails.
pub fn check_normalization(state: &RegisterState, tolerance: Option<f64>) -> Result<(), QsoilError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QsoilError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that every cell of a probability map is a valid probability.
///
/// # Returns
/// * `Ok(())` when all cells lie in [0, 1].
/// * `Err(QsoilError::Incoherence)` naming the first offending cell.
pub fn check_probability_bounds(map: &ProbabilityMap) -> Result<(), QsoilError> {
    for (layer, column, value) in map.cells() {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(QsoilError::Incoherence {
                message: format!("Cell ({}, {}) holds invalid probability {}", layer, column, value),
            });
        }
    }
    Ok(())
}

/// Checks a branch set against the map it was enumerated from:
/// every path starts at the surface, moves one layer down and one column
/// sideways per step, stays inside the grid, and carries exactly the
/// product of its step values.
///
/// # Arguments
/// * `branches` - The enumerated branch set.
/// * `map` - The probability map the enumeration ran over.
/// * `tolerance` - Allowed product deviation; defaults to 1e-9.
pub fn check_branch_consistency(
    branches: &BranchSet,
    map: &ProbabilityMap,
    tolerance: Option<f64>,
) -> Result<(), QsoilError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_PRODUCT_TOLERANCE);

    for (i, path) in branches.paths().iter().enumerate() {
        let Some(first) = path.steps.first() else {
            return Err(QsoilError::Incoherence {
                message: format!("Branch {} is empty", i),
            });
        };
        if *first != (0, branches.start_column()) {
            return Err(QsoilError::Incoherence {
                message: format!("Branch {} does not start at the surface cell", i),
            });
        }

        let mut expected = map.get(0, branches.start_column());
        for window in path.steps.windows(2) {
            let (layer, column) = window[0];
            let (next_layer, next_column) = window[1];
            if next_layer != layer + 1 || column.abs_diff(next_column) != 1 {
                return Err(QsoilError::Incoherence {
                    message: format!(
                        "Branch {} makes an illegal move ({}, {}) -> ({}, {})",
                        i, layer, column, next_layer, next_column
                    ),
                });
            }
            if next_layer >= grid::DEPTH || next_column >= grid::WIDTH {
                return Err(QsoilError::Incoherence {
                    message: format!("Branch {} leaves the grid at ({}, {})", i, next_layer, next_column),
                });
            }
            expected *= map.get(next_layer, next_column);
        }

        if (path.probability - expected).abs() > effective_tolerance {
            return Err(QsoilError::Incoherence {
                message: format!(
                    "Branch {} carries probability {} but its steps multiply to {}",
                    i, path.probability, expected
                ),
            });
        }
    }
    Ok(())
}
