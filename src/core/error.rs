//! Error handling logic

use std::fmt;

/// Errors raised by the register and its operators.
/// All of them are local and synchronous; nothing here is transient, so
/// retrying the same call with the same input fails the same way.
#[derive(Debug, Clone, PartialEq)] // PartialEq useful for testing error variants
pub enum QuantumError {
    /// The requested qubit count (or explicit vector length) cannot describe a register.
    InvalidDimension {
        /// InvalidDimension failure message
        message: String,
    },

    /// A transform targeted a bit position outside `[0, qubit_count - 1]`.
    InvalidQubitIndex {
        /// The rejected bit position
        target: usize,
        /// Qubit count of the register the transform was applied to
        qubit_count: usize,
    },

    /// Collapse was attempted on a vector carrying no probability mass.
    DegenerateState {
        /// DegenerateState failure message
        message: String,
    },

    /// The squared amplitudes do not sum to one within tolerance.
    /// Only produced by `validation`; the operators never enforce it.
    Unnormalized {
        /// Observed sum of squared amplitudes
        norm: f64,
        /// Allowed deviation from 1.0
        tolerance: f64,
    },
}

impl fmt::Display for QuantumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantumError::InvalidDimension { message } => write!(f, "Invalid Dimension: {}", message),
            QuantumError::InvalidQubitIndex { target, qubit_count } => write!(
                f,
                "Invalid Qubit Index: {} is outside [0, {}] for a {}-qubit register",
                target,
                qubit_count.saturating_sub(1),
                qubit_count
            ),
            QuantumError::DegenerateState { message } => write!(f, "Degenerate State: {}", message),
            QuantumError::Unnormalized { norm, tolerance } => write!(
                f,
                "Unnormalized State: Sum(a_i^2) = {} (Deviation > {})",
                norm, tolerance
            ),
        }
    }
}

impl std::error::Error for QuantumError {}
