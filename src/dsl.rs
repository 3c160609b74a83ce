//! Ergonomic helpers built on the global backoff registry.
//!
//! These std-only helpers let callers run an operation under a named,
//! globally registered backoff without assembling a [`RetryPolicy`] by hand.
//! Policies built here retry every failure; use the policy API directly when
//! a classifier is needed.

use crate::classify::Failure;
use crate::registry::get_global_backoff;
use crate::retry::RetryPolicy;
use crate::sleep::StdSleeper;
use std::fmt;

/// Errors produced by the DSL helpers.
///
/// This envelope exists only at the DSL layer; [`RetryPolicy::run`] itself
/// never wraps operation failures.
#[derive(Debug)]
pub enum DslError<E> {
    /// Referenced backoff name is missing from the global registry.
    BackoffMissing(String),
    /// The operation failed terminally.
    Operation(E),
}

impl<E> fmt::Display for DslError<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DslError::BackoffMissing(name) => {
                write!(f, "backoff '{}' is not registered", name)
            }
            DslError::Operation(err) => write!(f, "{err}"),
        }
    }
}

impl<E> std::error::Error for DslError<E> where E: fmt::Display + fmt::Debug {}

/// Construct a retry-everything [`RetryPolicy`] from a named backoff in the
/// global registry.
pub fn policy_for<E: Failure>(name: &str) -> Result<RetryPolicy<E, StdSleeper>, DslError<E>> {
    let backoff =
        get_global_backoff(name).ok_or_else(|| DslError::BackoffMissing(name.to_string()))?;

    Ok(RetryPolicy::new().backoff(backoff))
}

/// Execute an operation under a named backoff from the global registry.
pub fn retry_with_backoff<F, T, E>(
    name: &str,
    max_attempts: u32,
    operation: F,
) -> Result<T, DslError<E>>
where
    F: FnMut(u32) -> Result<T, E>,
    E: Failure,
{
    policy_for(name)?
        .run(max_attempts, operation)
        .map_err(DslError::Operation)
}
