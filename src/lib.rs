// src/lib.rs

//! `qdoor` - A minimal real-amplitude state-vector simulator
//!
//! A `Register` holds `2^N` real amplitudes for `N` qubits. The crate offers
//! exactly three things to do with it: create it, put one qubit through the
//! mixing transform, and collapse the whole register to a single basis index.
//! The `universe` and `host` modules hold the console program built on top.

pub mod core;
pub mod operations;
pub mod simulation;
pub mod validation;
pub mod universe;
pub mod host;

// Re-export the most common types for easier top-level use
pub use crate::core::{QuantumError, Register};
pub use crate::operations::{apply_transform, transform_all};
pub use crate::simulation::{collapse_all, SimulationResult, Simulator, SimulatorConfig};
pub use crate::validation::check_normalization;
pub use crate::universe::UniverseParams;

// Example 1: Transform then collapse a single qubit
// The transform takes |0> to an equal mix of |0> and |1>, so the collapse
// lands on either index with probability 1/2.
/// ```
/// use qdoor::{Register, QuantumError};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut register = Register::new(1)?;
/// register.apply_transform(0)?;
///
/// let amp = std::f64::consts::FRAC_1_SQRT_2;
/// assert!((register.amplitudes()[0] - amp).abs() < 1e-9);
/// assert!((register.amplitudes()[1] - amp).abs() < 1e-9);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let index = register.collapse_all(&mut rng)?;
/// assert!(index < 2);
/// assert_eq!(register.collapsed_index(), Some(index));
/// # Ok::<(), QuantumError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: The reference run through a seeded Simulator
/// ```
/// use qdoor::{Simulator, SimulatorConfig, QuantumError};
///
/// let mut simulator = Simulator::with_config(SimulatorConfig::seeded(42));
/// let result = simulator.run(3)?;
/// println!("{}", result);
///
/// assert_eq!(result.qubit_count(), 3);
/// assert!(result.outcome() < 8);
/// assert!((result.outcome_probability() - 0.125).abs() < 1e-9);
///
/// // Zero qubits cannot form a register
/// assert!(matches!(simulator.run(0), Err(QuantumError::InvalidDimension { .. })));
/// # Ok::<(), QuantumError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
