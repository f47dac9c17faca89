// src/simulation/engine.rs
use crate::core::{QuantumError, Register};
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::debug;

/// What a single collapse observed before overwriting the register.
/// (Internal visibility)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Collapse {
    /// Surviving basis index.
    pub(crate) index: usize,
    /// Probability the index carried just before the collapse.
    pub(crate) probability: f64,
    /// Sum of squared amplitudes just before the collapse. May be infinite for
    /// very large amplitudes; `probability` is computed from the scaled cdf.
    pub(crate) total: f64,
}

/// Largest amplitude magnitude, the scale every squared amplitude is taken
/// relative to.
///
/// # Errors
/// * `QuantumError::DegenerateState` if every amplitude is zero or any
///   amplitude is NaN or infinite.
fn peak_magnitude(amplitudes: &[f64]) -> Result<f64, QuantumError> {
    if let Some(bad) = amplitudes.iter().find(|a| !a.is_finite()) {
        return Err(QuantumError::DegenerateState {
            message: format!("cannot collapse: amplitude {} is not finite", bad),
        });
    }
    let peak = amplitudes.iter().fold(0.0f64, |m, a| m.max(a.abs()));
    if peak == 0.0 {
        return Err(QuantumError::DegenerateState {
            message: "cannot collapse: every amplitude is zero".to_string(),
        });
    }
    Ok(peak)
}

/// Builds the cumulative distribution `cdf[i] = Σ_{j<=i} a_j^2 / total`,
/// in index order.
///
/// Squares are taken of `a / max|a|`, so very large or very small amplitudes
/// neither overflow nor underflow the total.
///
/// # Errors
/// * `QuantumError::DegenerateState` if every amplitude is zero or any
///   amplitude is not finite, since no outcome is defined.
pub fn cumulative_distribution(amplitudes: &[f64]) -> Result<Vec<f64>, QuantumError> {
    let peak = peak_magnitude(amplitudes)?;
    let total: f64 = amplitudes.iter().map(|a| (a / peak).powi(2)).sum();

    let mut cumulative = 0.0;
    Ok(amplitudes
        .iter()
        .map(|a| {
            cumulative += (a / peak).powi(2) / total;
            cumulative
        })
        .collect())
}

/// Picks the smallest index whose cumulative probability reaches `r`.
///
/// Indices that carry no probability mass (where the cdf does not rise) are
/// never selected. If `r` lies above every entry, which only happens through
/// rounding at the top of the range, the last index carrying mass wins. This
/// deliberately narrows the plain "last index" fallback: the two agree for a
/// strictly increasing cdf, but trailing zero-mass indices are passed over so
/// the fallback never yields an outcome of probability zero.
///
/// `cdf` must be non-empty and non-decreasing.
pub fn select_outcome(cdf: &[f64], r: f64) -> usize {
    let mut previous = 0.0;
    let mut last_with_mass = cdf.len().saturating_sub(1);
    for (i, &c) in cdf.iter().enumerate() {
        if c > previous {
            if r <= c {
                return i;
            }
            last_with_mass = i;
        }
        previous = c;
    }
    debug!(r, fallback = last_with_mass, "sample above cumulative distribution, using fallback");
    last_with_mass
}

/// Collapses `register` using the already drawn uniform sample `r` in `[0, 1)`.
/// The register is only overwritten once an outcome has been selected.
pub(crate) fn collapse_with_sample(register: &mut Register, r: f64) -> Result<Collapse, QuantumError> {
    let amplitudes = register.amplitudes();
    let cdf = cumulative_distribution(amplitudes)?;
    let total = register.total_probability();

    let index = select_outcome(&cdf, r);
    let previous = if index == 0 { 0.0 } else { cdf[index - 1] };
    let probability = cdf[index] - previous;

    register.collapse_to(index);
    debug!(index, probability, total, "collapsed register");
    Ok(Collapse { index, probability, total })
}

/// Draws one uniform sample from `rng` and collapses `register` with it.
pub(crate) fn collapse_with<R: Rng + ?Sized>(register: &mut Register, rng: &mut R) -> Result<Collapse, QuantumError> {
    let r: f64 = StandardUniform.sample(rng);
    collapse_with_sample(register, r)
}

/// Collapses the whole register and returns the surviving index.
///
/// Derives the distribution from the squared amplitudes, draws one value
/// from `rng`, selects an index (see [`select_outcome`]) and overwrites the
/// register so that index holds amplitude 1 and every other index holds 0.
/// A second call without an intervening transform returns the same index.
///
/// # Errors
/// * `QuantumError::DegenerateState` if every amplitude is zero; the register
///   is left untouched.
pub fn collapse_all<R: Rng + ?Sized>(register: &mut Register, rng: &mut R) -> Result<usize, QuantumError> {
    collapse_with(register, rng).map(|collapse| collapse.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn assert_collapsed_to(register: &Register, index: usize) {
        for (i, &a) in register.amplitudes().iter().enumerate() {
            let expected = if i == index { 1.0 } else { 0.0 };
            assert_eq!(a, expected, "Amplitude mismatch at index {} after collapse to {}", i, index);
        }
    }

    #[test]
    fn test_cumulative_distribution() -> Result<(), QuantumError> {
        // Unnormalized on purpose: total = 0.5, probabilities 0.5 / 0 / 0 / 0.5 after scaling
        let cdf = cumulative_distribution(&[0.5, 0.0, 0.0, -0.5])?;
        let expected = [0.5, 0.5, 0.5, 1.0];
        for (c, e) in cdf.iter().zip(expected) {
            assert!((c - e).abs() < TEST_TOLERANCE, "cdf entry {} != {}", c, e);
        }
        Ok(())
    }

    #[test]
    fn test_degenerate_state_is_rejected() -> Result<(), QuantumError> {
        let mut register = Register::from_amplitudes(vec![0.0; 4])?;
        let mut rng = StdRng::seed_from_u64(7);
        let err = collapse_all(&mut register, &mut rng).unwrap_err();
        assert!(matches!(err, QuantumError::DegenerateState { .. }));
        assert_eq!(register.amplitudes(), &[0.0; 4]);

        assert!(cumulative_distribution(&[f64::NAN, 0.0]).is_err());
        Ok(())
    }

    #[test]
    fn test_huge_amplitudes_collapse() -> Result<(), QuantumError> {
        // Squaring 1e200 overflows; the distribution must not
        let cdf = cumulative_distribution(&[1e200, 1e200])?;
        assert!((cdf[0] - 0.5).abs() < TEST_TOLERANCE);
        assert!((cdf[1] - 1.0).abs() < TEST_TOLERANCE);

        let mut register = Register::from_amplitudes(vec![1e200, 1e200])?;
        let collapse = collapse_with_sample(&mut register, 0.75)?;
        assert_eq!(collapse.index, 1);
        assert!((collapse.probability - 0.5).abs() < TEST_TOLERANCE);
        assert_collapsed_to(&register, 1);

        let mut register = Register::from_amplitudes(vec![1e200, 1e200])?;
        let mut rng = StdRng::seed_from_u64(3);
        let index = collapse_all(&mut register, &mut rng)?;
        assert_collapsed_to(&register, index);

        // Tiny amplitudes whose squares underflow to zero still collapse
        let cdf = cumulative_distribution(&[0.0, 3e-200, 4e-200, 0.0])?;
        assert!((cdf[1] - 0.36).abs() < TEST_TOLERANCE);
        assert!((cdf[3] - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_non_finite_amplitudes_are_rejected() {
        assert!(matches!(
            cumulative_distribution(&[f64::INFINITY, 1.0]),
            Err(QuantumError::DegenerateState { .. })
        ));
        assert!(matches!(
            cumulative_distribution(&[0.5, f64::NEG_INFINITY]),
            Err(QuantumError::DegenerateState { .. })
        ));
    }

    #[test]
    fn test_select_outcome_boundaries() {
        let cdf = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(select_outcome(&cdf, 0.0), 0);
        assert_eq!(select_outcome(&cdf, 0.25), 0); // r <= cdf[i] is inclusive
        assert_eq!(select_outcome(&cdf, 0.250_000_1), 1);
        assert_eq!(select_outcome(&cdf, 0.75), 2);
        assert_eq!(select_outcome(&cdf, 0.999_999), 3);
    }

    #[test]
    fn test_select_outcome_skips_zero_mass() {
        // Index 0 and 2 carry no mass; a zero draw must still land on index 1
        let cdf = [0.0, 0.4, 0.4, 1.0];
        assert_eq!(select_outcome(&cdf, 0.0), 1);
        assert_eq!(select_outcome(&cdf, 0.4), 1);
        assert_eq!(select_outcome(&cdf, 0.41), 3);
    }

    #[test]
    fn test_select_outcome_rounding_fallback() {
        // Top of the distribution short of 1.0, as left behind by rounding
        let cdf = [0.2, 0.5, 0.999_999_9];
        assert_eq!(select_outcome(&cdf, 0.999_999_95), 2);

        // Trailing zero-mass indices are not picked by the fallback, unlike
        // a plain "last index" rule which would return 2 here
        let cdf = [0.3, 0.999_999_9, 0.999_999_9];
        assert_eq!(select_outcome(&cdf, 0.999_999_95), 1);
    }

    #[test]
    fn test_collapse_with_sample_picks_and_overwrites() -> Result<(), QuantumError> {
        let mut register = Register::from_amplitudes(vec![0.6, 0.0, 0.0, 0.8])?;
        let collapse = collapse_with_sample(&mut register, 0.5)?;
        assert_eq!(collapse.index, 3);
        assert!((collapse.probability - 0.64).abs() < TEST_TOLERANCE);
        assert!((collapse.total - 1.0).abs() < TEST_TOLERANCE);
        assert_collapsed_to(&register, 3);

        let mut register = Register::from_amplitudes(vec![0.6, 0.0, 0.0, 0.8])?;
        assert_eq!(collapse_with_sample(&mut register, 0.36)?.index, 0);
        assert_collapsed_to(&register, 0);
        Ok(())
    }

    #[test]
    fn test_repeated_collapse_is_stable() -> Result<(), QuantumError> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut register = Register::from_amplitudes(vec![0.5; 8])?;
        let first = collapse_all(&mut register, &mut rng)?;
        assert_collapsed_to(&register, first);
        for _ in 0..100 {
            assert_eq!(collapse_all(&mut register, &mut rng)?, first);
        }
        // Even a zero draw cannot move the outcome off the surviving index
        assert_eq!(collapse_with_sample(&mut register, 0.0)?.index, first);
        Ok(())
    }
}
