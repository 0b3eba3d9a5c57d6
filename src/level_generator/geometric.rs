//! Geometric level generator.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::LevelGenerator;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n + 1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the maximum number of levels allowed.
#[derive(Debug)]
pub struct Geometric {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is promoted to the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// The generator is seeded from operating system entropy, so the sequence
    /// of levels is not reproducible across constructions.
    ///
    /// # Errors
    ///
    /// `total` must be greater or equal to 1, and `p` must be strictly between
    /// 0 and 1.
    ///
    /// # Panics
    ///
    /// Panics if the operating system fails to provide entropy to seed the
    /// random number generator.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric {
            total,
            p,
            rng: SmallRng::from_os_rng(),
        })
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    /// Generate a level for a new node by repeated coin flips.
    ///
    /// Starting from level 0, the level is incremented while a uniform draw
    /// in `$[0, 1)$` falls below `$p$`, truncating at the maximum level. This
    /// gives `$P(\text{level} \geq n) = p^n$`.
    #[inline]
    fn level(&mut self) -> usize {
        let mut level = 0;
        while level + 1 < self.total && self.rng.random::<f64>() < self.p {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Geometric, GeometricError, LevelGenerator};

    #[test]
    fn invalid_max() {
        assert_eq!(Geometric::new(0, 0.5).err(), Some(GeometricError::ZeroMax));
    }

    #[test]
    fn invalid_p() {
        assert_eq!(
            Geometric::new(1, 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, 1.0).err(),
            Some(GeometricError::InvalidProbability)
        );
    }

    #[rstest]
    fn in_range(#[values(1, 2, 8, 16)] n: usize, #[values(0.1, 0.5, 0.9)] p: f64) -> Result<()> {
        let mut generator = Geometric::new(n, p)?;
        assert_eq!(generator.total(), n);
        for _ in 0..10_000 {
            let level = generator.level();
            assert!((0..n).contains(&level));
        }
        Ok(())
    }

    #[test]
    fn reaches_extremes() -> Result<()> {
        let mut generator = Geometric::new(4, 0.5)?;
        let mut seen = [false; 4];
        for _ in 0..100_000 {
            seen[generator.level()] = true;
        }
        assert_eq!(seen, [true; 4]);
        Ok(())
    }

    #[test]
    fn distribution() -> Result<()> {
        let draws = 100_000_u32;
        let mut generator = Geometric::new(16, 0.5)?;
        let mut at_zero = 0_u32;
        for _ in 0..draws {
            if generator.level() == 0 {
                at_zero += 1;
            }
        }
        // Half the draws stay at level 0; allow a wide margin.
        let fraction = f64::from(at_zero) / f64::from(draws);
        assert!((0.45..0.55).contains(&fraction));
        Ok(())
    }
}
