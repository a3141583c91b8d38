//! Common types used throughout tweet-archive
//!
//! Records are modelled as an `id` plus an opaque JSON payload. Only the id
//! drives pagination; every other field is carried through untouched.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Identifier of a fetched record; larger ids are newer
pub type RecordId = u64;

// ============================================================================
// Record
// ============================================================================

/// One fetched item: an ordered id plus whatever else the endpoint returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier used for pagination ordering
    pub id: RecordId,
    /// Remaining fields (text, author, timestamps, ...), never inspected
    #[serde(flatten)]
    pub payload: JsonObject,
}

impl Record {
    /// Create a record with an empty payload
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            payload: JsonObject::new(),
        }
    }

    /// Attach a payload field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Page
// ============================================================================

/// One batch of records as returned by a single fetch, newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records in the order the endpoint returned them
    pub records: Vec<Record>,
}

impl Page {
    /// Create a page from records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id of the last (oldest) record, if any
    pub fn trailing_id(&self) -> Option<RecordId> {
        self.records.last().map(|record| record.id)
    }
}

impl From<Vec<Record>> for Page {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
