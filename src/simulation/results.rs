// src/simulation/results.rs
use std::fmt;

/// Outcome of one create → transform-all → collapse run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    qubit_count: usize,
    outcome: usize,
    outcome_probability: f64,
    norm_before_collapse: f64,
}

impl SimulationResult {
    /// (Internal visibility)
    pub(crate) fn new(qubit_count: usize, outcome: usize, outcome_probability: f64, norm_before_collapse: f64) -> Self {
        Self { qubit_count, outcome, outcome_probability, norm_before_collapse }
    }

    /// Qubit count of the simulated register.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// The surviving basis index.
    pub fn outcome(&self) -> usize {
        self.outcome
    }

    /// Probability the surviving index carried just before the collapse.
    pub fn outcome_probability(&self) -> f64 {
        self.outcome_probability
    }

    /// Sum of squared amplitudes just before the collapse.
    pub fn norm_before_collapse(&self) -> f64 {
        self.norm_before_collapse
    }

    /// The outcome as a bit string, qubit 0 rightmost.
    pub fn bitstring(&self) -> String {
        format!("{:0width$b}", self.outcome, width = self.qubit_count)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Result:")?;
        writeln!(f, "  Qubits: {}", self.qubit_count)?;
        writeln!(f, "  Outcome: {} (|{}>)", self.outcome, self.bitstring())?;
        writeln!(f, "  Outcome Probability: {:.6}", self.outcome_probability)?;
        write!(f, "  Norm Before Collapse: {:.6}", self.norm_before_collapse)
    }
}
