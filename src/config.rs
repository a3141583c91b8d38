//! Process configuration
//!
//! The four OAuth secrets come from the environment and are validated before
//! any network activity. Everything else is a fixed constant or a CLI flag.

use crate::error::{Error, Result};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Attempts allowed per page fetch before the download is abandoned
pub const MAX_ATTEMPTS: u32 = 10;

/// Default base URL of the search API
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";

/// Path of the search endpoint below the base URL
pub const SEARCH_PATH: &str = "/search/tweets.json";

/// Suffix appended to the account name to form the output file name
pub const OUTPUT_FILE_SUFFIX: &str = "-all-records.json";

/// Environment variable holding the consumer key
pub const CONSUMER_KEY_VAR: &str = "CONSUMER_KEY";
/// Environment variable holding the consumer secret
pub const CONSUMER_SECRET_VAR: &str = "CONSUMER_SECRET";
/// Environment variable holding the access token
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";
/// Environment variable holding the access token secret
pub const ACCESS_SECRET_VAR: &str = "ACCESS_SECRET";

// ============================================================================
// Credentials
// ============================================================================

/// OAuth 1.0a user-context credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API consumer key
    pub consumer_key: String,
    /// API consumer secret
    pub consumer_secret: String,
    /// User access token
    pub access_token: String,
    /// User access token secret
    pub access_secret: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Load credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    ///
    /// Missing and blank values are both rejected; the first offending
    /// variable is named in the error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(Error::missing_field(name)),
            }
        };

        Ok(Self {
            consumer_key: require(CONSUMER_KEY_VAR)?,
            consumer_secret: require(CONSUMER_SECRET_VAR)?,
            access_token: require(ACCESS_TOKEN_VAR)?,
            access_secret: require(ACCESS_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Build the search query targeting every post that mentions an account
pub fn search_query(account: &str) -> String {
    format!("@{}", account.trim_start_matches('@'))
}

/// Output file name for an account's archive
pub fn output_file_name(account: &str) -> String {
    format!("{}{OUTPUT_FILE_SUFFIX}", account.trim_start_matches('@'))
}
