// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tweet-archive
//!
//! Exports the complete search history of posts mentioning an account into a
//! line-delimited JSON file.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Walks the search endpoint from newest to oldest
//! - **Bounded Retries**: Exponential backoff with jitter, 10 attempts per page
//! - **OAuth 1.0a**: Requests signed with user-context credentials
//! - **JSON Lines Output**: One record per line, payload kept verbatim
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tweet_archive::{
//!     auth::Authenticator, cli::export, config::Credentials,
//!     http::{SearchClient, SearchClientConfig}, output::JsonLinesSink,
//!     pagination::PaginationEngine, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let auth = Authenticator::new(Credentials::from_env()?);
//!     let client = SearchClient::with_auth(SearchClientConfig::default(), auth)?;
//!     let mut engine = PaginationEngine::new(client);
//!
//!     let summary = export(&mut engine, &JsonLinesSink::default(), "rustlang").await?;
//!     println!("wrote {} records to {}", summary.lines, summary.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  PaginationEngine  cursor + accumulator, stop detection  │
//! └──────────────┬───────────────────────────────┬───────────┘
//!                │ each page                     │ all records
//! ┌──────────────┴──────────┐          ┌─────────┴───────────┐
//! │ RetryPolicy             │          │ JsonLinesSink       │
//! │ 10 attempts, backoff    │          │ <account>-all-      │
//! ├─────────────────────────┤          │ records.json        │
//! │ SearchClient (OAuth1)   │          └─────────────────────┘
//! └─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Records, pages and shared aliases
pub mod types;

/// Credentials and constants
pub mod config;

/// OAuth 1.0a request signing
pub mod auth;

/// Search API client
pub mod http;

/// Retry with exponential backoff
pub mod retry;

/// Cursor pagination engine
pub mod pagination;

/// JSON Lines output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
