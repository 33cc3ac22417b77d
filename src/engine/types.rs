//! Engine types
//!
//! Query window, run configuration, and progress accounting for the
//! pagination engine.

use crate::types::ItemId;

/// Request parameters for one timeline page.
///
/// The window walks strictly backward in id space: `since_id` is the
/// lower-exclusive bound fixed for the whole run, `max_id` the
/// upper-exclusive bound derived from the previous page's oldest item and
/// therefore only set after the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Account whose timeline is being paged
    pub account: String,
    /// Page size requested per call
    pub count: u32,
    /// Lower-exclusive id bound (resume point)
    pub since_id: Option<ItemId>,
    /// Upper-exclusive id bound (paging window)
    pub max_id: Option<ItemId>,
}

impl PageQuery {
    /// Create the first-page query for a run
    pub fn new(account: impl Into<String>, count: u32, since_id: Option<ItemId>) -> Self {
        Self {
            account: account.into(),
            count,
            since_id,
            max_id: None,
        }
    }

    /// Wire parameters for this query
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("count", self.count.to_string()),
            ("screen_name", self.account.clone()),
        ];
        if let Some(since_id) = self.since_id {
            params.push(("since_id", since_id.to_string()));
        }
        if let Some(max_id) = self.max_id {
            params.push(("max_id", max_id.to_string()));
        }
        params
    }
}

/// Configuration for one archiving run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Account whose timeline to download
    pub account: String,
    /// Page size requested per API call
    pub page_size: u32,
    /// Total number of items to write this run
    pub cap: usize,
    /// Explicit resume point, overriding the stored cursor
    pub since_id: Option<ItemId>,
}

impl FetchConfig {
    /// Create a config for the given account with default limits
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            page_size: 100,
            cap: 10,
            since_id: None,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, count: u32) -> Self {
        self.page_size = count;
        self
    }

    /// Set the total-item cap
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Set an explicit resume point
    #[must_use]
    pub fn with_since(mut self, since_id: Option<ItemId>) -> Self {
        self.since_id = since_id;
        self
    }
}

/// Mutable run progress, owned exclusively by the engine.
#[derive(Debug, Clone)]
pub struct RunState {
    written: usize,
    last_id: Option<ItemId>,
    cap: usize,
}

impl RunState {
    /// Create state for a run with the given cap
    pub fn new(cap: usize) -> Self {
        Self {
            written: 0,
            last_id: None,
            cap,
        }
    }

    /// Record one successfully written item
    pub fn record_written(&mut self, id: ItemId) {
        self.written += 1;
        self.last_id = Some(id);
    }

    /// Items written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Most recently written item id
    pub fn last_id(&self) -> Option<ItemId> {
        self.last_id
    }

    /// Configured cap
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Whether the run must stop writing
    pub fn cap_reached(&self) -> bool {
        self.written >= self.cap
    }
}

/// Statistics from one archiving run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Pages fetched
    pub pages_fetched: usize,
    /// Items written to the sink
    pub items_written: usize,
    /// Items skipped (sink failure or unusable id)
    pub items_skipped: usize,
    /// Rate-limit sleeps taken
    pub rate_limit_waits: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a written item
    pub fn add_written(&mut self) {
        self.items_written += 1;
    }

    /// Add a skipped item
    pub fn add_skipped(&mut self) {
        self.items_skipped += 1;
    }

    /// Add a rate-limit wait
    pub fn add_rate_limit_wait(&mut self) {
        self.rate_limit_waits += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Final report of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Items written this run
    pub written: usize,
    /// Id of the last item written, if any
    pub last_id: Option<ItemId>,
    /// Accumulated statistics
    pub stats: RunStats,
}
