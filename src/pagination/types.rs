//! Pagination types
//!
//! The cursor, the per-iteration loop state and download statistics.

use crate::types::{Page, RecordId};
use std::fmt;

/// Marker meaning "fetch records not newer than this id"
///
/// Starts at the beginning sentinel, which asks for the newest records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(RecordId);

impl Cursor {
    /// Sentinel for the very first request
    pub const BEGINNING: Cursor = Cursor(0);

    /// Cursor positioned at a record id
    pub fn at(id: RecordId) -> Self {
        Self(id)
    }

    /// Whether the cursor is still the beginning sentinel
    pub fn is_beginning(&self) -> bool {
        *self == Self::BEGINNING
    }

    /// Id to send upstream, `None` while at the beginning
    pub fn value(&self) -> Option<RecordId> {
        if self.is_beginning() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "beginning"),
        }
    }
}

/// Why a download stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The endpoint returned no records
    EmptyPage,
    /// The trailing id equalled the current cursor
    CursorStagnated,
}

/// Loop state threaded through each fetch-and-advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationState {
    /// Current cursor
    pub cursor: Cursor,
    /// Set once the loop must end
    pub stopped: Option<StopReason>,
}

impl PaginationState {
    /// Create a new pagination state at the beginning sentinel
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether pagination is complete
    pub fn is_done(&self) -> bool {
        self.stopped.is_some()
    }

    /// Compute the state after processing `page`
    ///
    /// An empty page ends the loop without touching the cursor. Otherwise the
    /// cursor moves to the page's trailing id, unless it already sits there,
    /// in which case the loop ends.
    #[must_use]
    pub fn advance(self, page: &Page) -> Self {
        match page.trailing_id() {
            None => Self {
                stopped: Some(StopReason::EmptyPage),
                ..self
            },
            Some(id) if Cursor::at(id) == self.cursor => Self {
                stopped: Some(StopReason::CursorStagnated),
                ..self
            },
            Some(id) => Self {
                cursor: Cursor::at(id),
                stopped: None,
            },
        }
    }
}

/// Statistics for one download
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total records accumulated
    pub records_fetched: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl DownloadStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page and its records
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
