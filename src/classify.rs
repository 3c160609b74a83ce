//! Failure classification for retry decisions
//!
//! Whether a failed attempt is retried is decided by a [`Classifier`]: either
//! a set of failure kinds matched polymorphically against the observed
//! failure, or an arbitrary predicate over the failure value.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A kind identifier for failures, with an optional subsumption hierarchy.
///
/// The default [`subsumes`](FailureKind::subsumes) is exact equality.
/// Override it to make broad kinds cover narrower ones, the way a base
/// exception class covers its subclasses.
///
/// # Example
///
/// ```rust
/// use resolute::FailureKind;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind {
///     Io,
///     Timeout, // a flavor of Io
///     Parse,
/// }
///
/// impl FailureKind for Kind {
///     fn subsumes(&self, other: &Self) -> bool {
///         self == other || matches!((self, other), (Kind::Io, Kind::Timeout))
///     }
/// }
///
/// assert!(Kind::Io.subsumes(&Kind::Timeout));
/// assert!(!Kind::Timeout.subsumes(&Kind::Io));
/// ```
pub trait FailureKind: Copy + PartialEq {
    /// Whether this kind covers `other`, directly or through a hierarchy.
    fn subsumes(&self, other: &Self) -> bool {
        *self == *other
    }
}

/// A failure that carries a runtime kind.
///
/// Implemented by operation error types so that kind-set classifiers can
/// inspect them.
pub trait Failure {
    /// The kind taxonomy for this failure type.
    type Kind: FailureKind;

    /// The runtime kind of this particular failure.
    fn kind(&self) -> Self::Kind;
}

/// Fallible retry predicate. An `Err` propagates in place of the failure
/// under classification.
pub type Predicate<E> = Box<dyn Fn(&E) -> Result<bool, E>>;

/// Rule deciding whether a given failure should be retried.
///
/// Exactly one form is active for a policy's lifetime: a kind set, matched
/// polymorphically via [`FailureKind::subsumes`], or a predicate over the
/// failure value.
pub enum Classifier<E: Failure> {
    /// Retry iff the failure's kind is subsumed by any listed kind.
    /// First match wins; the scan short-circuits.
    Kinds(Vec<E::Kind>),
    /// Retry iff the predicate returns `Ok(true)`. A predicate `Err`
    /// propagates instead of the original failure.
    Predicate(Predicate<E>),
}

impl<E: Failure> Classifier<E> {
    /// Classifier that retries any failure.
    pub fn always() -> Self {
        Classifier::Predicate(Box::new(|_| Ok(true)))
    }

    /// Kind-set classifier.
    pub fn kinds(kinds: impl IntoIterator<Item = E::Kind>) -> Self {
        Classifier::Kinds(kinds.into_iter().collect())
    }

    /// Predicate classifier from an infallible predicate.
    pub fn predicate(predicate: impl Fn(&E) -> bool + 'static) -> Self {
        Classifier::Predicate(Box::new(move |error| Ok(predicate(error))))
    }

    /// Predicate classifier from a fallible predicate.
    pub fn try_predicate(predicate: impl Fn(&E) -> Result<bool, E> + 'static) -> Self {
        Classifier::Predicate(Box::new(predicate))
    }

    /// Decide whether `error` is retryable.
    pub fn classify(&self, error: &E) -> Result<bool, E> {
        match self {
            Classifier::Kinds(kinds) => {
                let observed = error.kind();
                Ok(kinds.iter().any(|kind| kind.subsumes(&observed)))
            }
            Classifier::Predicate(predicate) => predicate(error),
        }
    }
}

impl<E: Failure> Default for Classifier<E> {
    fn default() -> Self {
        Self::always()
    }
}

impl<E: Failure> fmt::Debug for Classifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classifier::Kinds(kinds) => write!(f, "Kinds({} entries)", kinds.len()),
            Classifier::Predicate(_) => write!(f, "Predicate(<function>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKind {
        Network,
        Timeout,
        Parse,
        RateLimited,
    }

    impl FailureKind for TestKind {
        fn subsumes(&self, other: &Self) -> bool {
            self == other || matches!((self, other), (TestKind::Network, TestKind::Timeout))
        }
    }

    #[derive(Debug, PartialEq)]
    struct TestError(TestKind);

    impl Failure for TestError {
        type Kind = TestKind;

        fn kind(&self) -> TestKind {
            self.0
        }
    }

    #[test]
    fn test_kind_set_exact_match() {
        let classifier: Classifier<TestError> =
            Classifier::kinds([TestKind::Network, TestKind::RateLimited]);

        assert_eq!(classifier.classify(&TestError(TestKind::Network)), Ok(true));
        assert_eq!(
            classifier.classify(&TestError(TestKind::RateLimited)),
            Ok(true)
        );
        assert_eq!(classifier.classify(&TestError(TestKind::Parse)), Ok(false));
    }

    #[test]
    fn test_kind_set_subsumption() {
        let classifier: Classifier<TestError> = Classifier::kinds([TestKind::Network]);

        // Timeout is covered by Network through the hierarchy
        assert_eq!(classifier.classify(&TestError(TestKind::Timeout)), Ok(true));
        // Subsumption is directional
        let narrow: Classifier<TestError> = Classifier::kinds([TestKind::Timeout]);
        assert_eq!(narrow.classify(&TestError(TestKind::Network)), Ok(false));
    }

    #[test]
    fn test_empty_kind_set_never_retries() {
        let classifier: Classifier<TestError> = Classifier::kinds([]);
        assert_eq!(classifier.classify(&TestError(TestKind::Network)), Ok(false));
    }

    #[test]
    fn test_predicate() {
        let classifier: Classifier<TestError> =
            Classifier::predicate(|e: &TestError| matches!(e.0, TestKind::RateLimited));

        assert_eq!(
            classifier.classify(&TestError(TestKind::RateLimited)),
            Ok(true)
        );
        assert_eq!(classifier.classify(&TestError(TestKind::Parse)), Ok(false));
    }

    #[test]
    fn test_fallible_predicate_error_surfaces() {
        let classifier: Classifier<TestError> =
            Classifier::try_predicate(|_| Err(TestError(TestKind::Parse)));

        assert_eq!(
            classifier.classify(&TestError(TestKind::Network)),
            Err(TestError(TestKind::Parse))
        );
    }

    #[test]
    fn test_default_retries_everything() {
        let classifier: Classifier<TestError> = Classifier::default();
        assert_eq!(classifier.classify(&TestError(TestKind::Parse)), Ok(true));
    }
}
