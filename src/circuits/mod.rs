// src/circuits/mod.rs

//! Ordered sequences of operations (`qsoil::operations::Operation`).
//!
//! `Circuit` captures a specific pathway of gates (an infiltration ladder,
//! a trial wavefunction, a Grover pass) and renders itself as an ASCII
//! diagram for the circuit figures of the support package.

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered sequence of operations applied to a set of qubits.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of qubits involved across all operations.
    qubits: HashSet<QubitId>,

    /// The ordered gate sequence.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends a single operation, registering the qubits it involves.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit_id in op.involved_qubits() {
            self.qubits.insert(qubit_id);
        }
        self.operations.push(op);
    }

    /// Appends multiple operations from an iterator.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The set of unique qubit ids involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// The ordered gate sequence.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds `Circuit` instances with method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the construction and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "qsoil::Circuit[0 operations on 0 qubits]");
        }

        // --- Setup ---
        let ops = &self.operations;
        let num_ops = ops.len();

        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, qid)| (*qid, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|qid| format!("{}", qid).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] stores the gate/wire segment string
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time] stores the vertical connector char below this row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        // Fills every involved row with `symbol` and draws connectors through
        // the spanned rows, for register-wide operations.
        fn mark_register(
            rows: &[usize],
            t: usize,
            symbol: &str,
            op_grid: &mut [Vec<String>],
            v_connect: &mut [Vec<char>],
        ) {
            for r in rows {
                op_grid[*r][t] = format_gate(symbol);
            }
            if let (Some(r_min), Some(r_max)) = (rows.iter().min(), rows.iter().max()) {
                for row_vec in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        // --- Populate Grids ---
        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Superpose { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("H");
                    }
                }
                Operation::Rotate { target, .. } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("Ry");
                    }
                }
                Operation::PhaseRotate { target, .. } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("Rz");
                    }
                }
                Operation::Flip { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("X");
                    }
                }
                Operation::Entangle { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) = (qubit_to_row.get(control), qubit_to_row.get(target)) {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate("X");

                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::MarkPhase { register, .. } => {
                    let rows: Vec<usize> =
                        register.iter().filter_map(|q| qubit_to_row.get(q).copied()).collect();
                    mark_register(&rows, t, "Or", &mut op_grid, &mut v_connect);
                }
                Operation::Diffuse { register } => {
                    let rows: Vec<usize> =
                        register.iter().filter_map(|q| qubit_to_row.get(q).copied()).collect();
                    mark_register(&rows, t, "Df", &mut op_grid, &mut v_connect);
                }
                Operation::Measure { targets } => {
                    for target_qid in targets {
                        if let Some(r) = qubit_to_row.get(target_qid) {
                            op_grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(f, "qsoil::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
       fmt::Display::fmt(self, f)
    }
}
