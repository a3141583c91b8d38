//! Pagination engine
//!
//! Drives repeated fetches through the retry policy until the cursor stops
//! moving or a page comes back empty.

use super::types::{Cursor, DownloadStats, PaginationState};
use crate::error::Result;
use crate::http::PageSource;
use crate::retry::RetryPolicy;
use crate::types::{Page, Record};
use std::time::Instant;
use tracing::{debug, info};

/// Collects every record matching a query, page by page
pub struct PaginationEngine<S> {
    /// Page source
    source: S,
    /// Retry policy wrapped around every fetch
    retry: RetryPolicy,
    /// Statistics of the last download
    stats: DownloadStats,
}

impl<S: PageSource> PaginationEngine<S> {
    /// Create a new engine with the default retry policy
    pub fn new(source: S) -> Self {
        Self {
            source,
            retry: RetryPolicy::default(),
            stats: DownloadStats::default(),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get statistics of the last download
    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    /// Download every record for `query`
    ///
    /// Records are returned in fetch order and are not deduplicated. Any
    /// error surfaced by the retry policy aborts the whole download.
    pub async fn download_all(&mut self, query: &str) -> Result<Vec<Record>> {
        let start = Instant::now();
        self.stats = DownloadStats::new();

        let mut state = PaginationState::new();
        let mut records = Vec::new();

        while !state.is_done() {
            let cursor = state.cursor;
            let page = self.fetch(query, cursor).await?;

            state = state.advance(&page);
            self.stats.add_page(page.len());
            records.extend(page.records);

            info!(
                "Page {}: {} records so far, cursor {}",
                self.stats.pages_fetched,
                records.len(),
                state.cursor
            );
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            records = records.len(),
            pages = self.stats.pages_fetched,
            reason = ?state.stopped,
            "Completed download for {query}"
        );

        Ok(records)
    }

    /// Fetch one page at `cursor` through the retry policy
    async fn fetch(&self, query: &str, cursor: Cursor) -> Result<Page> {
        let source = &self.source;
        self.retry
            .execute(move |attempt| {
                debug!("Fetching {query} before {cursor}, attempt {attempt}");
                source.fetch_page(query, cursor)
            })
            .await
    }
}

impl<S> std::fmt::Debug for PaginationEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("retry", &self.retry)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
