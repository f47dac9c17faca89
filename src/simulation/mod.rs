// src/simulation/mod.rs

//! Collapse of a `qdoor::core::Register` and the `Simulator` that owns the
//! entropy source used for it.
//!
//! The collapse itself lives in `engine`; `Simulator` adds configuration,
//! an owned RNG and the reference create → transform-all → collapse run.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use engine::{collapse_all, cumulative_distribution, select_outcome};
pub use results::SimulationResult;

use crate::core::{DEFAULT_NORM_TOLERANCE, QuantumError, Register};
use crate::operations::transform_all;
use crate::validation::check_normalization;
use engine::Collapse;
use num_traits::PrimInt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, warn};

/// Settings for a `Simulator`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Seed for the simulator's RNG. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Check the squared-amplitude sum before every collapse and log a
    /// warning when it drifts. The collapse proceeds either way.
    pub check_normalization: bool,
    /// Tolerance for the normalization check.
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            check_normalization: true,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    /// Default settings with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }
}

/// Owns the single entropy source used for collapses and drives the
/// reference run.
///
/// Registers are passed in by `&mut`, so a register can never be collapsed
/// and transformed at the same time.
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_config(SimulatorConfig::default())
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a new Simulator with default settings (entropy-seeded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Simulator from explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        debug!(seed = ?config.seed, "simulator initialized");
        Self { config, rng }
    }

    /// The settings this simulator was built with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The simulator's RNG, for callers that need further random choices
    /// from the same source.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Collapses `register` and returns the surviving index.
    ///
    /// # Errors
    /// * `QuantumError::DegenerateState` if the register carries no probability mass.
    pub fn collapse_all(&mut self, register: &mut Register) -> Result<usize, QuantumError> {
        self.collapse(register).map(|collapse| collapse.index)
    }

    /// Runs the reference sequence: create a register for `qubit_count`
    /// qubits, transform every qubit in ascending order, collapse once.
    ///
    /// # Errors
    /// * `QuantumError::InvalidDimension` for a qubit count below 1.
    pub fn run<N>(&mut self, qubit_count: N) -> Result<SimulationResult, QuantumError>
    where
        N: PrimInt + fmt::Display,
    {
        let mut register = Register::new(qubit_count)?;
        transform_all(&mut register)?;
        let collapse = self.collapse(&mut register)?;
        Ok(SimulationResult::new(register.qubit_count(), collapse.index, collapse.probability, collapse.total))
    }

    /// Collapses `trials` independent copies of `register` and returns how
    /// often each index survived. `register` itself is not modified.
    pub fn sample_counts(&mut self, register: &Register, trials: usize) -> Result<Vec<usize>, QuantumError> {
        let mut counts = vec![0; register.size()];
        for _ in 0..trials {
            let mut copy = register.clone();
            let index = engine::collapse_with(&mut copy, &mut self.rng)?.index;
            counts[index] += 1;
        }
        Ok(counts)
    }

    fn collapse(&mut self, register: &mut Register) -> Result<Collapse, QuantumError> {
        if self.config.check_normalization {
            if let Err(e) = check_normalization(register, Some(self.config.norm_tolerance)) {
                warn!(error = %e, "collapsing a register whose amplitudes are not normalized");
            }
        }
        engine::collapse_with(register, &mut self.rng)
    }
}
