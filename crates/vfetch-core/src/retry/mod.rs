//! Retry policy for network transfers.
//!
//! Errors are classified into kinds (timeouts, throttling, connection
//! failures, 5xx) and the policy decides whether another attempt is made.
//! Waiting between attempts is a blocking sleep on the calling thread.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::TransferError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
