// src/universe/mod.rs

//! Descriptive parameters for the universe a collapse may open a doorway to.
//! Nothing in here touches a `Register`; the host feeds `dimensions` to the
//! simulator as its qubit count.

use rand::Rng;
use rand::distr::{Distribution, Uniform};
use rand::seq::IndexedRandom;
use std::fmt;

/// Upper bound (inclusive) on the dimensions of a randomly generated universe.
pub const MAX_RANDOM_DIMENSIONS: usize = 10;

/// Particles a random universe may be built from.
pub const FUNDAMENTAL_PARTICLES: [&str; 12] = [
    "Electron",
    "Quark",
    "Neutrino",
    "Photon",
    "Gluon",
    "W boson",
    "Z boson",
    "Higgs boson",
    "Graviton",
    "Dark matter particle",
    "Dark energy particle",
    "Axion",
];

/// Laws a random universe may be governed by.
pub const FUNDAMENTAL_LAWS: [&str; 12] = [
    "Law of Conservation of Energy",
    "Law of Conservation of Momentum",
    "Law of Conservation of Mass-Energy",
    "Newton's Laws of Motion",
    "Maxwell's Equations of Electromagnetism",
    "Einstein's Theory of General Relativity",
    "Quantum Mechanics",
    "String Theory",
    "Standard Model of Particle Physics",
    "Big Bang Theory",
    "Entropy thermodynamics",
    "Chaos Theory",
];

/// Dimensions, laws and particles describing one universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseParams {
    /// Number of dimensions; doubles as the qubit count of the doorway register.
    pub dimensions: i64,
    /// Physical laws, free text.
    pub laws: String,
    /// Fundamental particles, free text.
    pub particles: String,
}

impl UniverseParams {
    /// Draws dimensions uniformly from `1..=MAX_RANDOM_DIMENSIONS` and one
    /// law and one particle uniformly from the fixed tables.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Bounds are constant and ordered, so construction cannot fail
        let dimensions = match Uniform::new_inclusive(1, MAX_RANDOM_DIMENSIONS as i64) {
            Ok(range) => range.sample(rng),
            Err(_) => 1,
        };
        let laws = FUNDAMENTAL_LAWS.choose(rng).copied().unwrap_or(FUNDAMENTAL_LAWS[0]);
        let particles = FUNDAMENTAL_PARTICLES.choose(rng).copied().unwrap_or(FUNDAMENTAL_PARTICLES[0]);

        Self {
            dimensions,
            laws: laws.to_string(),
            particles: particles.to_string(),
        }
    }
}

impl fmt::Display for UniverseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dimensions: {}", self.dimensions)?;
        writeln!(f, "Physical laws: {}", self.laws)?;
        write!(f, "Fundamental particles: {}", self.particles)
    }
}
