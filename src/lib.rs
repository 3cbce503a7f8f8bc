// src/lib.rs

//! `qsoil` - quantum-inspired simulation of heavy-metal transport in soils
//!
//! This library backs a research support package: small fixed-size
//! statevector circuits model the infiltration of lead and arsenic through
//! a layered 16×10 soil grid, a pruned enumeration extracts the surviving
//! drift paths, a QMC-style screen ranks remediation formulations, and a
//! rendering collaborator draws the publication figures.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod branching;
pub mod infiltration;
pub mod optimizer;
pub mod render;

// Re-export the most common types for easier top-level use
pub use core::{MeasuredState, QsoilError, QubitId, RegisterState};
pub use operations::{excitation_angle, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{SimulationResult, Simulator};
pub use branching::{enumerate_paths, BranchPath, BranchSet};
pub use infiltration::{enumerate, InfiltrationModel, Metal, ProbabilityMap, SiteConditions};
pub use optimizer::{BaseChemical, CompetingIonKind, Formulation, OptimizationReport, SolutionOptimizer};
pub use render::{render_fitness_chart, render_infiltration, FigureStyle};
pub use validation::{check_branch_consistency, check_normalization, check_probability_bounds};

// Example 1: Drift-path enumeration for the Lead reference parameters
// Builds the 14-qubit ladder from a bare step probability and prunes the
// resulting occupancy field.
/// ```
/// use qsoil::enumerate;
///
/// // Lead at the reference site: step probability 0.246, pruned at 0.001.
/// let branches = enumerate(7, 0.246, 0.001).expect("valid parameters");
///
/// assert_eq!(branches.branch_count(), 3);
/// assert_eq!(branches.deepest_layer(), Some(2));
/// assert!((branches.surface_probability() - 0.0545).abs() < 1e-3);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Driving the statevector engine directly
// A two-qubit entangling circuit whose final state is read without
// measurement.
/// ```
/// use qsoil::{CircuitBuilder, Operation, QubitId, Simulator};
///
/// let q0 = QubitId(0);
/// let q1 = QubitId(1);
/// let circuit = CircuitBuilder::new()
///     .add_op(Operation::Superpose { target: q0 })
///     .add_op(Operation::Entangle { control: q0, target: q1 })
///     .build();
///
/// let result = Simulator::new().run(&circuit).expect("simulation succeeds");
/// let state = result.final_state().expect("state attached after a run");
///
/// // A Bell pair: half the mass on |00>, half on |11>.
/// assert!((state.probability(0) - 0.5).abs() < 1e-9);
/// assert!((state.probability(3) - 0.5).abs() < 1e-9);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
