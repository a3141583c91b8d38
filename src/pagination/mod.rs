//! Pagination module
//!
//! Cursor-driven pagination over a `PageSource`.
//!
//! # Overview
//!
//! Each page moves the cursor to the id of its trailing (oldest) record.
//! The loop ends when a page is empty or the cursor fails to advance; the
//! page that confirms stagnation is still kept.

mod engine;
mod types;

pub use engine::PaginationEngine;
pub use types::{Cursor, DownloadStats, PaginationState, StopReason};
