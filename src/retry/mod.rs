//! Retry module
//!
//! Wraps a single fallible operation with bounded attempts and
//! exponential backoff with jitter.

mod policy;

pub use policy::{BackoffConfig, RetryPolicy};
