//! Retry policy engine
//!
//! [`RetryPolicy`] drives the attempt loop: invoke the operation, classify a
//! failure, compute the next delay, suspend, and try again until the attempt
//! budget runs out or a terminal failure surfaces.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Backoff;
use crate::classify::{Classifier, Failure};
use crate::sleep::{Sleeper, StdSleeper};

/// Retry engine: backoff configuration, failure classifier, and suspend
/// collaborator.
///
/// The policy itself is immutable; all loop state (attempt number, previous
/// delay) is local to one [`run`](RetryPolicy::run) call, so sequential runs
/// on the same policy are independent.
///
/// # Example
///
/// ```rust
/// use resolute::{Failure, FailureKind, Jitter, RetryPolicy};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind {
///     Timeout,
///     NotFound,
/// }
/// impl FailureKind for Kind {}
///
/// #[derive(Debug)]
/// struct ApiError(Kind);
/// impl Failure for ApiError {
///     type Kind = Kind;
///     fn kind(&self) -> Kind {
///         self.0
///     }
/// }
///
/// let policy: RetryPolicy<ApiError> = RetryPolicy::new()
///     .base_delay_ms(1)
///     .multiplier(2.0)
///     .max_delay_ms(50)
///     .jitter(Jitter::None)
///     .retry_on([Kind::Timeout]);
///
/// let mut calls = 0;
/// let result = policy.run(3, |_attempt| {
///     calls += 1;
///     if calls < 2 {
///         Err(ApiError(Kind::Timeout))
///     } else {
///         Ok("done")
///     }
/// });
/// assert_eq!(result.unwrap(), "done");
/// assert_eq!(calls, 2);
/// ```
#[derive(Debug)]
pub struct RetryPolicy<E: Failure, S = StdSleeper> {
    backoff: Backoff,
    classifier: Classifier<E>,
    sleeper: S,
}

impl<E: Failure> RetryPolicy<E, StdSleeper> {
    /// Create a policy with default backoff, a retry-everything classifier,
    /// and the blocking standard-library sleeper.
    pub fn new() -> Self {
        Self {
            backoff: Backoff::new(),
            classifier: Classifier::always(),
            sleeper: StdSleeper,
        }
    }
}

impl<E: Failure> Default for RetryPolicy<E, StdSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Failure, S: Sleeper> RetryPolicy<E, S> {
    /// Replace the whole backoff configuration.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the base delay in milliseconds.
    pub fn base_delay_ms(mut self, ms: u64) -> Self {
        self.backoff = self.backoff.base_delay_ms(ms);
        self
    }

    /// Set the maximum delay cap in milliseconds.
    pub fn max_delay_ms(mut self, ms: u64) -> Self {
        self.backoff = self.backoff.max_delay_ms(ms);
        self
    }

    /// Set the exponential multiplier.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.backoff = self.backoff.multiplier(multiplier);
        self
    }

    /// Set the jitter strategy.
    pub fn jitter(mut self, jitter: crate::Jitter) -> Self {
        self.backoff = self.backoff.jitter(jitter);
        self
    }

    /// Install an arbitrary classifier.
    pub fn classifier(mut self, classifier: Classifier<E>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Retry only failures whose kind is subsumed by one of `kinds`.
    pub fn retry_on(self, kinds: impl IntoIterator<Item = E::Kind>) -> Self {
        self.classifier(Classifier::kinds(kinds))
    }

    /// Retry only failures matching `predicate`.
    pub fn retry_if(self, predicate: impl Fn(&E) -> bool + 'static) -> Self {
        self.classifier(Classifier::predicate(predicate))
    }

    /// Swap the suspend collaborator. Tests typically install a
    /// [`RecordingSleeper`](crate::sleep::RecordingSleeper).
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> RetryPolicy<E, S2> {
        RetryPolicy {
            backoff: self.backoff,
            classifier: self.classifier,
            sleeper,
        }
    }

    /// The installed suspend collaborator.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `operation` with up to `max_attempts` attempts and an OS-seeded
    /// random source.
    ///
    /// The operation receives the 1-based attempt number. On success its
    /// result is returned unchanged; a terminal failure (non-retryable kind,
    /// or budget exhausted) propagates exactly as raised, with no wrapping.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is 0; the budget must allow at least one
    /// attempt. The operation is never invoked in that case.
    pub fn run<T, F>(&self, max_attempts: u32, operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
    {
        let mut rng = StdRng::from_os_rng();
        self.run_with_rng(max_attempts, operation, &mut rng)
    }

    /// Run `operation` with a caller-provided random source.
    ///
    /// Substituting a seeded generator makes the jittered delay sequence
    /// reproducible.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is 0, before the operation is invoked.
    pub fn run_with_rng<T, F, R>(
        &self,
        max_attempts: u32,
        mut operation: F,
        rng: &mut R,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
        R: Rng,
    {
        assert!(
            max_attempts >= 1,
            "retry budget must allow at least one attempt (max_attempts = 0)"
        );

        let mut attempt = 1u32;
        let mut previous_delay = 0u64;

        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    // Budget check comes first: the last failure always
                    // surfaces as-is, whatever its kind.
                    if attempt >= max_attempts {
                        return Err(error);
                    }

                    match self.classifier.classify(&error) {
                        Ok(true) => {}
                        Ok(false) => return Err(error),
                        // A failing predicate replaces the operation failure.
                        Err(classifier_error) => return Err(classifier_error),
                    }

                    let delay = self
                        .backoff
                        .delay_ms_with_rng(attempt - 1, previous_delay, rng);

                    // A zero delay is still issued so test doubles observe it.
                    self.sleeper.sleep_ms(delay);

                    previous_delay = delay;
                    attempt += 1;
                }
            }
        }
    }
}
