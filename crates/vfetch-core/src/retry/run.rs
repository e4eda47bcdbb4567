//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::TransferError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the retry policy says to stop.
/// `f` receives the 1-based attempt number. On retryable failure, sleeps for
/// the policy's wait then tries again. Returns the last error and the number of
/// attempts made.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, (TransferError, u32)>
where
    F: FnMut(u32) -> Result<T, TransferError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err((e, attempt)),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(
                            attempt,
                            max_attempts = policy.max_attempts(),
                            error = %e,
                            "transfer failed, retrying in {:?}",
                            d
                        );
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
