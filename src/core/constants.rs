//! Fixed geometry and tolerances shared across the crate.

/// Grid geometry and register widths for the infiltration model.
pub mod grid {
    /// Horizontal drift columns.
    pub const WIDTH: usize = 16;
    /// Vertical depth layers (layer 0 is the surface).
    pub const DEPTH: usize = 10;
    /// Qubits encoding the 16 drift columns.
    pub const COLUMN_QUBITS: usize = 4;
    /// One qubit per depth layer.
    pub const LAYER_QUBITS: usize = 10;
    /// Total register width of the infiltration ladder.
    pub const TOTAL_QUBITS: usize = COLUMN_QUBITS + LAYER_QUBITS;
}

/// Numeric tolerances.
pub mod tolerance {
    /// Basis states below this probability are skipped during map readout.
    pub const AMPLITUDE_FLOOR: f64 = 1e-10;
    /// Allowed deviation of `sum |c_k|^2` from 1.
    pub const NORM: f64 = 1e-9;
}

/// A surface cell below this probability produces no visible infiltration;
/// enumeration over it returns the empty branch set.
pub const SURFACE_VISIBILITY: f64 = 0.01;
