//! Suspend abstraction
//!
//! The retry engine never sleeps directly; it goes through the [`Sleeper`]
//! trait so the suspend collaborator can be swapped for async shims, embedded
//! timers, or test doubles that skip the wait.

/// Suspend collaborator: blocks the caller for roughly the given duration.
pub trait Sleeper {
    /// Sleep for the specified number of milliseconds.
    fn sleep_ms(&self, ms: u64);
}

/// Standard library sleeper using `std::thread::sleep`.
///
/// Only available when the `std` feature is enabled.
///
/// # Example
///
/// ```rust
/// use resolute::sleep::{Sleeper, StdSleeper};
///
/// let sleeper = StdSleeper;
/// sleeper.sleep_ms(1);
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdSleeper;

#[cfg(feature = "std")]
impl Sleeper for StdSleeper {
    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}

/// Function pointer sleeper for custom suspend implementations.
///
/// # Example
///
/// ```rust
/// use resolute::sleep::{FnSleeper, Sleeper};
///
/// fn my_sleep(ms: u64) {
///     std::thread::sleep(std::time::Duration::from_millis(ms));
/// }
///
/// let sleeper = FnSleeper(my_sleep);
/// sleeper.sleep_ms(1);
/// ```
#[derive(Clone, Copy)]
pub struct FnSleeper(pub fn(u64));

impl Sleeper for FnSleeper {
    fn sleep_ms(&self, ms: u64) {
        (self.0)(ms);
    }
}

/// Test double that skips the wait but logs every requested duration, in
/// order.
///
/// # Example
///
/// ```rust
/// use resolute::sleep::{RecordingSleeper, Sleeper};
///
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep_ms(5);
/// sleeper.sleep_ms(0);
/// assert_eq!(sleeper.requested(), vec![5, 0]);
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    requested: core::cell::RefCell<Vec<u64>>,
}

#[cfg(feature = "std")]
impl RecordingSleeper {
    /// Create a sleeper with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The durations requested so far, oldest first.
    pub fn requested(&self) -> Vec<u64> {
        self.requested.borrow().clone()
    }
}

#[cfg(feature = "std")]
impl Sleeper for RecordingSleeper {
    fn sleep_ms(&self, ms: u64) {
        self.requested.borrow_mut().push(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_std_sleeper() {
        let sleeper = StdSleeper;
        let start = std::time::Instant::now();
        sleeper.sleep_ms(10);
        let elapsed = start.elapsed();

        // Allow some margin for timing precision
        assert!(elapsed.as_millis() >= 9);
    }

    #[test]
    fn test_fn_sleeper() {
        fn check(ms: u64) {
            assert_eq!(ms, 100);
        }

        let sleeper = FnSleeper(check);
        sleeper.sleep_ms(100);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_recording_sleeper_keeps_order() {
        let sleeper = RecordingSleeper::new();
        assert!(sleeper.requested().is_empty());

        sleeper.sleep_ms(30);
        sleeper.sleep_ms(10);
        sleeper.sleep_ms(0);

        assert_eq!(sleeper.requested(), vec![30, 10, 0]);
    }
}
