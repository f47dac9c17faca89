// src/operations/mod.rs

//! The single-qubit mixing transform.
//!
//! Every source amplitude fans out to both members of its pair: the index
//! with the target bit flipped and the index itself. For a pair `(i0, i1)`
//! that differs only in the target bit, both results end up equal to
//! `(a[i0] - a[i1]) / sqrt(2)`. This is not a unitary Hadamard and does not
//! preserve the squared-amplitude sum in general; applying it twice to the
//! same qubit of `|0...0>` yields the zero vector.

use crate::core::register::zeroed_amplitudes;
use crate::core::{MIX_FACTOR, QuantumError, Register};
use tracing::debug;

/// Applies the mixing transform to qubit `target`.
///
/// The new vector is computed in full before it replaces the old one, so a
/// failed call or a reader between calls never sees a half-updated register.
///
/// # Errors
/// * `QuantumError::InvalidQubitIndex` if `target >= register.qubit_count()`;
///   the register is left unmodified.
/// * `QuantumError::InvalidDimension` if the replacement vector cannot be
///   allocated; the register is left unmodified.
pub fn apply_transform(register: &mut Register, target: usize) -> Result<(), QuantumError> {
    let qubit_count = register.qubit_count();
    if target >= qubit_count {
        return Err(QuantumError::InvalidQubitIndex { target, qubit_count });
    }

    let mask = 1usize << target;
    let old = register.amplitudes();
    let mut new_vec = zeroed_amplitudes(old.len())?;

    for (i, &amplitude) in old.iter().enumerate() {
        let bit = (i >> target) & 1;
        let sign = if bit == 0 { 1.0 } else { -1.0 };
        let contribution = amplitude * MIX_FACTOR * sign;

        let flipped = i ^ mask;
        new_vec[flipped] += contribution;
        new_vec[flipped ^ mask] += contribution;
    }

    register.replace_amplitudes(new_vec);
    debug!(qubit = target, qubit_count, norm = register.total_probability(), "applied transform");
    Ok(())
}

/// Applies the transform to every qubit `0..qubit_count`, in ascending order.
pub fn transform_all(register: &mut Register) -> Result<(), QuantumError> {
    for target in 0..register.qubit_count() {
        apply_transform(register, target)?;
    }
    Ok(())
}
