// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod register;

// Re-export public types for convenient access via `qdoor::core::TypeName`
pub use error::QuantumError;
pub use register::Register;

pub mod constants;
pub use constants::qdoor_constants::{DEFAULT_NORM_TOLERANCE, MIX_FACTOR};
