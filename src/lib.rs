//! Resolute - retry policy engine with backoff, jitter, and failure
//! classification
//!
//! This crate runs a fallible operation until it succeeds, a non-retryable
//! failure occurs, or the attempt budget is exhausted, inserting a computed,
//! optionally randomized delay between attempts. Exactly one attempt is ever
//! in flight; the loop is strictly sequential.
//!
//! # Features
//!
//! - **Four jitter strategies**: none, full, equal, and decorrelated
//! - **Failure classification**: retry by failure kind (with subsumption
//!   hierarchies) or by arbitrary predicate
//! - **Mockable collaborators**: the suspend call and the random source are
//!   both substitutable for deterministic tests
//! - **no_std compatible**: delay computation and jitter work without std
//!
//! # Example
//!
//! ```rust
//! use resolute::{Backoff, Jitter};
//!
//! let backoff = Backoff::new()
//!     .base_delay_ms(5)
//!     .multiplier(2.0)
//!     .max_delay_ms(1_000)
//!     .jitter(Jitter::None);
//!
//! // Retry index is zero-based: 0 is the delay before the second attempt.
//! assert_eq!(backoff.delay_ms(0, 0), 5);
//! assert_eq!(backoff.delay_ms(2, 0), 20);
//! ```
//!
//! The attempt loop itself lives in [`RetryPolicy`]; see the `retry` module
//! for a full example with classification.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", feature = "alloc"))]
pub mod classify;
#[cfg(feature = "std")]
pub mod dsl;
pub mod jitter;
#[cfg(any(feature = "std", feature = "alloc"))]
pub mod registry;
#[cfg(feature = "std")]
pub mod retry;
pub mod sleep;

#[cfg(any(feature = "std", feature = "alloc"))]
pub use classify::{Classifier, Failure, FailureKind};
#[cfg(feature = "std")]
pub use dsl::{DslError, policy_for, retry_with_backoff};
pub use jitter::Jitter;
#[cfg(any(feature = "std", feature = "alloc"))]
pub use registry::BackoffRegistry;
#[cfg(feature = "std")]
pub use registry::{
    clear_global_backoffs, get_global_backoff, list_global_backoffs, register_global_backoff,
    remove_global_backoff,
};
#[cfg(feature = "std")]
pub use retry::RetryPolicy;
#[cfg(feature = "std")]
pub use sleep::{RecordingSleeper, StdSleeper};
pub use sleep::{FnSleeper, Sleeper};

#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use rand::rngs::StdRng;

use rand::Rng;

/// Delay configuration: exponential growth plus a jitter strategy.
///
/// Delays grow as `base_delay_ms * multiplier^retry_index`, truncated toward
/// zero, then pass through the configured [`Jitter`]; every strategy caps the
/// result at `max_delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    /// Delay in milliseconds before the first retry, prior to jitter.
    pub base_delay_ms: u64,

    /// Hard delay cap in milliseconds, applied after jitter.
    pub max_delay_ms: u64,

    /// Exponential growth factor per retry.
    pub multiplier: f64,

    /// Jitter strategy applied to every computed delay.
    pub jitter: Jitter,
}

impl Backoff {
    /// Create a backoff with default values
    ///
    /// # Default values
    ///
    /// - `base_delay_ms`: 100
    /// - `max_delay_ms`: 10_000
    /// - `multiplier`: 2.0
    /// - `jitter`: [`Jitter::None`]
    pub fn new() -> Self {
        Self {
            base_delay_ms: 100,
            max_delay_ms: 10_000,
            multiplier: 2.0,
            jitter: Jitter::None,
        }
    }

    /// Set the base delay in milliseconds.
    pub fn base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Set the maximum delay cap in milliseconds.
    pub fn max_delay_ms(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Set the exponential multiplier. Negative values clamp to 0.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(0.0);
        self
    }

    /// Set the jitter strategy.
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Compute the delay before the next attempt, using an OS-seeded random
    /// source.
    ///
    /// # Arguments
    ///
    /// * `retry_index` - Zero-based retry index (0 = delay before the second
    ///   attempt)
    /// * `previous_delay_ms` - Delay chosen for the prior retry, 0 before
    ///   the first retry
    ///
    /// # Example
    ///
    /// ```rust
    /// use resolute::Backoff;
    ///
    /// let backoff = Backoff::new().base_delay_ms(4).max_delay_ms(10);
    /// // 4, 8, then capped at 10
    /// assert_eq!(backoff.delay_ms(1, 0), 8);
    /// assert_eq!(backoff.delay_ms(3, 0), 10);
    /// ```
    #[cfg(feature = "std")]
    pub fn delay_ms(&self, retry_index: u32, previous_delay_ms: u64) -> u64 {
        let mut rng = StdRng::from_os_rng();
        self.delay_ms_with_rng(retry_index, previous_delay_ms, &mut rng)
    }

    /// Compute the delay before the next attempt with a provided RNG.
    ///
    /// Useful for deterministic testing, `no_std` environments with custom
    /// RNG sources, or reusing one generator across a whole run.
    ///
    /// The exponential product truncates toward zero; fractional growth is
    /// dropped, not rounded.
    pub fn delay_ms_with_rng<R: Rng>(
        &self,
        retry_index: u32,
        previous_delay_ms: u64,
        rng: &mut R,
    ) -> u64 {
        let raw = (self.base_delay_ms as f64) * self.multiplier.powi(retry_index as i32);
        let raw_ms = raw as u64;

        self.jitter.apply(
            raw_ms,
            self.base_delay_ms,
            previous_delay_ms,
            self.max_delay_ms,
            rng,
        )
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_backoff_default() {
        let backoff = Backoff::default();
        assert_eq!(backoff.base_delay_ms, 100);
        assert_eq!(backoff.max_delay_ms, 10_000);
        assert_eq!(backoff.multiplier, 2.0);
        assert_eq!(backoff.jitter, Jitter::None);
    }

    #[test]
    fn test_none_jitter_delay_sequence() {
        let backoff = Backoff::new()
            .base_delay_ms(5)
            .multiplier(2.0)
            .max_delay_ms(1_000);

        let mut rng = SmallRng::seed_from_u64(42);
        let delays: Vec<u64> = (0..4)
            .map(|i| backoff.delay_ms_with_rng(i, 0, &mut rng))
            .collect();

        assert_eq!(delays, vec![5, 10, 20, 40]);
    }

    #[test]
    fn test_cap_applies_to_raw_delay() {
        let backoff = Backoff::new()
            .base_delay_ms(4)
            .multiplier(2.0)
            .max_delay_ms(10);

        let mut rng = SmallRng::seed_from_u64(42);
        let delays: Vec<u64> = (0..4)
            .map(|i| backoff.delay_ms_with_rng(i, 0, &mut rng))
            .collect();

        assert_eq!(delays, vec![4, 8, 10, 10]);
    }

    #[test]
    fn test_fractional_growth_truncates_toward_zero() {
        let backoff = Backoff::new()
            .base_delay_ms(5)
            .multiplier(1.5)
            .max_delay_ms(1_000);

        let mut rng = SmallRng::seed_from_u64(42);
        let delays: Vec<u64> = (0..4)
            .map(|i| backoff.delay_ms_with_rng(i, 0, &mut rng))
            .collect();

        // 5, 7.5, 11.25, 16.875 truncated, never rounded
        assert_eq!(delays, vec![5, 7, 11, 16]);
    }

    #[test]
    fn test_full_jitter_stays_within_capped_raw() {
        let backoff = Backoff::new()
            .base_delay_ms(100)
            .multiplier(2.0)
            .max_delay_ms(1_000)
            .jitter(Jitter::Full);

        let mut rng = SmallRng::seed_from_u64(42);

        for retry_index in 0..10 {
            let raw = 100u64.saturating_mul(1 << retry_index);
            let delay = backoff.delay_ms_with_rng(retry_index, 0, &mut rng);
            assert!(delay <= raw.min(1_000));
        }
    }

    #[test]
    fn test_equal_jitter_stays_in_upper_half() {
        let backoff = Backoff::new()
            .base_delay_ms(100)
            .multiplier(2.0)
            .max_delay_ms(1_000)
            .jitter(Jitter::Equal);

        let mut rng = SmallRng::seed_from_u64(42);

        for retry_index in 0..10 {
            let raw = 100u64.saturating_mul(1 << retry_index);
            let half = raw.min(1_000) / 2;
            let delay = backoff.delay_ms_with_rng(retry_index, 0, &mut rng);
            assert!(delay >= half && delay <= 2 * half);
        }
    }

    #[test]
    fn test_multiplier_one_holds_delay_flat() {
        let backoff = Backoff::new()
            .base_delay_ms(100)
            .multiplier(1.0)
            .max_delay_ms(10_000);

        let mut rng = SmallRng::seed_from_u64(42);

        for retry_index in 0..5 {
            assert_eq!(backoff.delay_ms_with_rng(retry_index, 0, &mut rng), 100);
        }
    }

    #[test]
    fn test_negative_multiplier_clamps_to_zero() {
        let backoff = Backoff::new().base_delay_ms(100).multiplier(-3.0);

        let mut rng = SmallRng::seed_from_u64(42);

        // multiplier 0: first retry is base * 0^0 = base, later ones are 0
        assert_eq!(backoff.delay_ms_with_rng(0, 0, &mut rng), 100);
        assert_eq!(backoff.delay_ms_with_rng(1, 0, &mut rng), 0);
    }
}
