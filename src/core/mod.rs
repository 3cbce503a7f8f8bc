// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qsoil::core::TypeName`
pub use error::{QsoilError, QubitId};
pub use state::{MeasuredState, RegisterState};

pub mod constants;
pub use constants::SURFACE_VISIBILITY;
