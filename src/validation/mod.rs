// src/validation/mod.rs

//! Checks on a `Register`'s amplitudes that the operators themselves never enforce.

use crate::core::{DEFAULT_NORM_TOLERANCE, QuantumError, Register};

/// Checks if the register is normalized (sum of squared amplitudes ≈ 1.0).
///
/// The mixing transform does not preserve this sum, so a failure here is
/// informative rather than fatal; collapse renormalizes on its own.
///
/// # Arguments
/// * `register` - The `Register` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QuantumError::Unnormalized)` otherwise.
pub fn check_normalization(register: &Register, tolerance: Option<f64>) -> Result<(), QuantumError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm = register.total_probability();
    // Written so that a NaN norm fails the check
    if (norm - 1.0).abs() <= effective_tolerance {
        Ok(())
    } else {
        Err(QuantumError::Unnormalized { norm, tolerance: effective_tolerance })
    }
}
