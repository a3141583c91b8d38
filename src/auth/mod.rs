//! Authentication module
//!
//! Signs search requests with OAuth 1.0a (HMAC-SHA1) user-context
//! credentials. The rest of the crate only sees `Authenticator::apply`.

mod oauth1;

pub use oauth1::{percent_encode, signature_base_string, Authenticator};
