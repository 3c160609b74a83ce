//! Blocking retry example
//!
//! Demonstrates driving a fallible operation through `RetryPolicy` with
//! kind-set and predicate classification and the four jitter strategies.
//!
//! Run with: cargo run --example blocking_retry

use resolute::{Failure, FailureKind, Jitter, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiErrorKind {
    Transient,
    Timeout,
    RateLimited,
    NotFound,
}

impl FailureKind for ApiErrorKind {
    fn subsumes(&self, other: &Self) -> bool {
        self == other
            || matches!(
                (self, other),
                (
                    ApiErrorKind::Transient,
                    ApiErrorKind::Timeout | ApiErrorKind::RateLimited
                )
            )
    }
}

#[derive(Debug)]
struct ApiError(ApiErrorKind);

impl Failure for ApiError {
    type Kind = ApiErrorKind;

    fn kind(&self) -> ApiErrorKind {
        self.0
    }
}

fn main() {
    println!("=== Resolute Blocking Retry Examples ===\n");

    // Example 1: retry everything, full jitter, success after retries
    println!("1. Full Jitter - Success after retries:");
    let policy: RetryPolicy<ApiError> = RetryPolicy::new()
        .base_delay_ms(100)
        .multiplier(2.0)
        .max_delay_ms(2_000)
        .jitter(Jitter::Full);

    let result = policy.run(5, |attempt| {
        println!("   Attempt {attempt}");
        if attempt < 3 {
            Err(ApiError(ApiErrorKind::Timeout))
        } else {
            Ok("Success!")
        }
    });
    println!("   Result: {:?}\n", result);

    // Example 2: kind-set classification with subsumption
    println!("2. Kind Set - Transient covers Timeout and RateLimited:");
    let policy: RetryPolicy<ApiError> = RetryPolicy::new()
        .base_delay_ms(50)
        .multiplier(1.0)
        .max_delay_ms(500)
        .retry_on([ApiErrorKind::Transient]);

    let result: Result<&str, _> = policy.run(4, |attempt| {
        println!("   Attempt {attempt}");
        if attempt == 1 {
            Err(ApiError(ApiErrorKind::RateLimited))
        } else {
            Err(ApiError(ApiErrorKind::NotFound)) // terminal
        }
    });
    println!("   Result: {:?}\n", result);

    // Example 3: predicate classification, equal jitter
    println!("3. Predicate - retry only timeouts, equal jitter:");
    let policy: RetryPolicy<ApiError> = RetryPolicy::new()
        .base_delay_ms(100)
        .multiplier(2.0)
        .max_delay_ms(1_000)
        .jitter(Jitter::Equal)
        .retry_if(|e: &ApiError| matches!(e.0, ApiErrorKind::Timeout));

    let result = policy.run(4, |attempt| {
        println!("   Attempt {attempt}");
        if attempt < 3 {
            Err(ApiError(ApiErrorKind::Timeout))
        } else {
            Ok(42)
        }
    });
    println!("   Result: {:?}\n", result);

    // Example 4: decorrelated jitter until the budget runs out
    println!("4. Decorrelated Jitter - Retry budget exhausted:");
    let policy: RetryPolicy<ApiError> = RetryPolicy::new()
        .base_delay_ms(20)
        .max_delay_ms(200)
        .jitter(Jitter::Decorrelated);

    let result: Result<&str, _> = policy.run(3, |attempt| {
        println!("   Attempt {attempt}");
        Err(ApiError(ApiErrorKind::Timeout))
    });
    println!("   Result: {:?}", result);

    println!("\n=== All examples completed ===");
}
