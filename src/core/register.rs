// src/core/register.rs

use super::error::QuantumError;
use num_traits::PrimInt;
use rand::Rng;
use std::fmt;

/// An `N`-qubit register: the ordered list of `2^N` real amplitudes over the
/// computational basis, together with its fixed qubit count.
///
/// Bit `k` of a basis index `i` is the value of qubit `k`, so qubit 0 is the
/// least significant bit.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point amplitudes
pub struct Register {
    /// Number of qubits (N), fixed at construction.
    qubit_count: usize,
    /// Amplitude per basis index, length `2^N`.
    amplitudes: Vec<f64>,
}

impl Register {
    /// Creates a register for `qubit_count` qubits with all mass on index 0.
    ///
    /// Accepts any primitive integer so that a caller holding a raw signed
    /// count gets an error instead of a wrapped value.
    ///
    /// # Errors
    /// * `QuantumError::InvalidDimension` if `qubit_count < 1`, or if `2^N`
    ///   amplitudes cannot be addressed or allocated on this platform.
    pub fn new<N>(qubit_count: N) -> Result<Self, QuantumError>
    where
        N: PrimInt + fmt::Display,
    {
        let num_qubits = qubit_count
            .to_usize()
            .filter(|n| *n >= 1)
            .ok_or_else(|| QuantumError::InvalidDimension {
                message: format!("qubit count must be at least 1, got {}", qubit_count),
            })?;

        let size = addressable_size(num_qubits).ok_or_else(|| QuantumError::InvalidDimension {
            message: format!("{} qubits need 2^{} amplitudes, which overflows the address space", num_qubits, num_qubits),
        })?;

        let mut amplitudes = zeroed_amplitudes(size)?;
        amplitudes[0] = 1.0;

        Ok(Self { qubit_count: num_qubits, amplitudes })
    }

    /// Builds a register over an explicit amplitude vector.
    ///
    /// The vector length must be a power of two and at least 2; the qubit
    /// count is derived from it. No normalization is applied.
    pub fn from_amplitudes(amplitudes: Vec<f64>) -> Result<Self, QuantumError> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QuantumError::InvalidDimension {
                message: format!("amplitude vector length must be a power of two >= 2, got {}", len),
            });
        }
        Ok(Self { qubit_count: len.trailing_zeros() as usize, amplitudes })
    }

    /// Number of qubits in the register.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Number of basis states, `2^qubit_count`.
    pub fn size(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitude vector.
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Sum of squared amplitudes.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a * a).sum()
    }

    /// Returns the surviving index if the register holds exactly one unit
    /// amplitude and zeros everywhere else.
    pub fn collapsed_index(&self) -> Option<usize> {
        let mut found = None;
        for (i, &a) in self.amplitudes.iter().enumerate() {
            if a == 1.0 && found.is_none() {
                found = Some(i);
            } else if a != 0.0 {
                return None;
            }
        }
        found
    }

    /// Applies the single-qubit mixing transform to `target`.
    /// See [`crate::operations::apply_transform`].
    pub fn apply_transform(&mut self, target: usize) -> Result<(), QuantumError> {
        crate::operations::apply_transform(self, target)
    }

    /// Collapses the whole register using `rng` and returns the surviving index.
    /// See [`crate::simulation::collapse_all`].
    pub fn collapse_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, QuantumError> {
        crate::simulation::collapse_all(self, rng)
    }

    /// Swaps in a fully computed amplitude vector of the same length.
    pub(crate) fn replace_amplitudes(&mut self, amplitudes: Vec<f64>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    /// Puts all mass on `index`.
    pub(crate) fn collapse_to(&mut self, index: usize) {
        self.amplitudes.iter_mut().for_each(|a| *a = 0.0);
        self.amplitudes[index] = 1.0;
    }
}

/// `2^num_qubits`, provided the resulting `f64` buffer fits in `isize::MAX` bytes.
fn addressable_size(num_qubits: usize) -> Option<usize> {
    let shift = u32::try_from(num_qubits).ok()?;
    let size = 1usize.checked_shl(shift)?;
    size.checked_mul(std::mem::size_of::<f64>())
        .filter(|bytes| *bytes <= isize::MAX as usize)
        .map(|_| size)
}

/// A zero-filled amplitude buffer of length `size`. Allocation failure is
/// reported instead of aborting the process.
pub(crate) fn zeroed_amplitudes(size: usize) -> Result<Vec<f64>, QuantumError> {
    let mut amplitudes = Vec::new();
    amplitudes.try_reserve_exact(size).map_err(|e| QuantumError::InvalidDimension {
        message: format!("cannot allocate {} amplitudes: {}", size, e),
    })?;
    amplitudes.resize(size, 0.0);
    Ok(amplitudes)
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[q={} |", self.qubit_count)?;
        for (i, a) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { " " }, a)?;
        }
        write!(f, "]")
    }
}
