//! Pagination engine
//!
//! Drives the backward-paging control loop:
//!
//! ```text
//! Init -> Fetching -> Processing -> (Fetching | Done)
//!              ^    \
//!              |     -> Backoff (rate limited) -> Fetching, same query
//!              |
//!           any other fetch error -> Aborted
//! ```
//!
//! The engine owns the query window and the run state exclusively; the
//! cursor is persisted on every terminal path (Done or Aborted) once at
//! least one item has been written.

mod types;

pub use types::{FetchConfig, PageQuery, RunState, RunStats, RunSummary};

use crate::error::{Error, Result};
use crate::http::{BackoffPolicy, TimelineClient};
use crate::sink::ItemSink;
use crate::state::CursorStore;
use crate::types::item_id;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

/// Engine for one archiving run
pub struct TimelineEngine<S> {
    client: TimelineClient,
    cursor: CursorStore,
    sink: S,
    backoff: BackoffPolicy,
    config: FetchConfig,
    stats: RunStats,
}

impl<S: ItemSink> TimelineEngine<S> {
    /// Create an engine over the given collaborators
    pub fn new(client: TimelineClient, cursor: CursorStore, sink: S, config: FetchConfig) -> Self {
        Self {
            client,
            cursor,
            sink,
            backoff: BackoffPolicy::default(),
            config,
            stats: RunStats::default(),
        }
    }

    /// Set the rate-limit backoff policy
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Statistics accumulated so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Execute the run to a terminal state.
    ///
    /// The cursor is persisted before this returns, on success and on
    /// abort alike, provided at least one item was written. A run that
    /// wrote nothing leaves the cursor store untouched.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let start = Instant::now();

        let since_id = match self.config.since_id {
            Some(id) => {
                info!("starting after explicit since id {id}");
                Some(id)
            }
            None => match self.cursor.load() {
                Some(id) => {
                    info!("resuming after stored cursor {id}");
                    Some(id)
                }
                None => {
                    info!("no resume point, fetching all available items");
                    None
                }
            },
        };

        let mut query = PageQuery::new(&self.config.account, self.config.page_size, since_id);
        let mut state = RunState::new(self.config.cap);

        let outcome = self.drive(&mut query, &mut state).await;

        if let Some(id) = state.last_id() {
            if let Err(e) = self.cursor.save(id) {
                warn!("could not persist cursor {id}: {e}");
            }
        }
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        outcome?;
        Ok(RunSummary {
            written: state.written(),
            last_id: state.last_id(),
            stats: self.stats.clone(),
        })
    }

    /// The Fetching/Processing loop, up to but not including cursor
    /// persistence.
    async fn drive(&mut self, query: &mut PageQuery, state: &mut RunState) -> Result<()> {
        if state.cap_reached() {
            // cap of zero: the invariant written <= cap forbids fetching
            // anything at all.
            info!("item cap is zero, nothing to fetch");
            return Ok(());
        }

        loop {
            let page = match self.client.fetch_page(query).await {
                Ok(page) => page,
                Err(Error::RateLimited { reset }) => {
                    let wait = self.backoff.wait_for(reset, Utc::now());
                    info!(
                        "rate limited, reset at {reset}, waiting {:.1}s",
                        wait.as_secs_f64()
                    );
                    self.stats.add_rate_limit_wait();
                    tokio::time::sleep(wait).await;
                    // Retry the identical query; a rate-limit failure
                    // never mutates the window.
                    continue;
                }
                Err(e) => return Err(e),
            };
            self.stats.add_page();

            if page.items.is_empty() {
                info!("no more results, end of timeline");
                return Ok(());
            }

            let oldest = page.items.iter().filter_map(item_id).min();

            for item in &page.items {
                let Some(id) = item_id(item) else {
                    warn!("item without usable id, skipping");
                    self.stats.add_skipped();
                    continue;
                };
                match self.sink.write(item, state.written()) {
                    Ok(()) => {
                        state.record_written(id);
                        query.max_id = Some(id.saturating_sub(1));
                        self.stats.add_written();
                        info!("wrote item {id}, {} of {} cap", state.written(), state.cap());
                        if state.cap_reached() {
                            info!("reached item cap {}, stopping", state.cap());
                            return Ok(());
                        }
                    }
                    Err(e) => {
                        warn!("could not write item {id}, skipping: {e}");
                        self.stats.add_skipped();
                    }
                }
            }

            // Advance the window past this page even when every write
            // failed; the previous max_id would refetch the same page
            // forever.
            match oldest {
                Some(oldest_id) => query.max_id = Some(oldest_id.saturating_sub(1)),
                None => {
                    warn!("page contained no usable ids, stopping");
                    return Ok(());
                }
            }

            match page.calls_remaining {
                Some(remaining) => info!(
                    "got {} items, {remaining} calls available, {} total so far",
                    page.items.len(),
                    state.written()
                ),
                None => info!(
                    "got {} items, {} total so far",
                    page.items.len(),
                    state.written()
                ),
            }
        }
    }
}
