//! Numeric constants shared by the register operators.

/// Constants used by the transform, collapse and validation code.
pub mod qdoor_constants {
    /// Mixing factor applied to every source amplitude by the transform.
    pub const MIX_FACTOR: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Default allowed deviation of the squared-amplitude sum from 1.0.
    pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
}
