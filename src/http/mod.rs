//! HTTP client module
//!
//! Provides the `PageSource` seam and its HTTP implementation.
//!
//! # Features
//!
//! - **One call, one page**: `SearchClient::fetch_page` never retries
//! - **Signed requests**: OAuth 1.0a via the auth module
//! - **Error classification**: transport, status and decode failures

mod client;

pub use client::{PageSource, SearchClient, SearchClientConfig, SearchClientConfigBuilder};

#[cfg(test)]
mod tests;
