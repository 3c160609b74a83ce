//! Jitter strategies for retry delays
//!
//! This module transforms a raw computed delay into the final delay that is
//! actually slept, using one of four algorithms. Jitter spreads out the
//! retries of many clients that failed at the same moment, avoiding
//! synchronized retry storms.

use rand::Rng;

/// Strategy for randomizing a computed retry delay.
///
/// Every variant caps its output at `max_ms`; the cap is the last step, so no
/// strategy can ever produce a delay above it.
///
/// # Example
///
/// ```rust
/// use resolute::Jitter;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(42);
///
/// // Full jitter: anywhere in [0, capped raw delay]
/// let delay = Jitter::Full.apply(200, 100, 0, 1_000, &mut rng);
/// assert!(delay <= 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jitter {
    /// No randomization: the capped raw delay is used as-is.
    #[default]
    None,
    /// Uniform over `[0, capped raw delay]`. Can return 0.
    Full,
    /// `half + uniform [0, half]` where `half` is half the capped raw delay.
    /// Never below half the capped raw delay.
    Equal,
    /// Uniform between `base_ms` and `previous_ms * 3` (whichever order),
    /// capped afterwards. Ignores the raw delay entirely; each draw depends
    /// on the delay actually chosen for the prior retry.
    Decorrelated,
}

impl Jitter {
    /// Apply this strategy to a raw delay, producing the final delay.
    ///
    /// # Arguments
    ///
    /// * `raw_ms` - Raw exponential delay in milliseconds (ignored by
    ///   `Decorrelated`)
    /// * `base_ms` - Configured base delay (used by `Decorrelated`)
    /// * `previous_ms` - Delay chosen for the prior retry, 0 before the
    ///   first retry (used by `Decorrelated`)
    /// * `max_ms` - Hard cap applied to every variant
    /// * `rng` - Random number generator
    ///
    /// # Returns
    ///
    /// Final delay in milliseconds, always `<= max_ms`.
    pub fn apply<R: Rng>(
        &self,
        raw_ms: u64,
        base_ms: u64,
        previous_ms: u64,
        max_ms: u64,
        rng: &mut R,
    ) -> u64 {
        match self {
            Jitter::None => raw_ms.min(max_ms),
            Jitter::Full => {
                let capped = raw_ms.min(max_ms);
                rng.random_range(0..=capped)
            }
            Jitter::Equal => {
                let half = raw_ms.min(max_ms) / 2;
                half + rng.random_range(0..=half)
            }
            Jitter::Decorrelated => {
                let spread = previous_ms.saturating_mul(3);
                let (lo, hi) = if base_ms <= spread {
                    (base_ms, spread)
                } else {
                    (spread, base_ms)
                };
                // Cap after sampling; the sampled range itself is unclamped.
                rng.random_range(lo..=hi).min(max_ms)
            }
        }
    }
}
