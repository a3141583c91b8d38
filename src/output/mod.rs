//! Output module
//!
//! Persists the accumulated records as line-delimited JSON.
//!
//! # Overview
//!
//! - One file per account: `<account>-all-records.json`
//! - One serialized record per line, no enclosing array
//! - No all-or-nothing guarantee: a failure leaves earlier lines in place

mod writer;

pub use writer::{JsonLinesSink, JsonLinesWriter, LineTarget, PersistSummary};

#[cfg(test)]
mod tests;
