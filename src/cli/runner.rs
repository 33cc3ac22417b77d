//! CLI runner - wires the collaborators and executes the run

use crate::auth::Credentials;
use crate::cli::commands::Cli;
use crate::engine::{FetchConfig, TimelineEngine};
use crate::error::{Error, Result};
use crate::http::{BackoffPolicy, HttpClientConfig, TimelineClient};
use crate::sink::JsonFileSink;
use crate::state::CursorStore;
use crate::types::{ItemId, OptionStringExt};
use std::time::Duration;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the archiving pass.
    ///
    /// Startup failures (credentials, flag validation) abort before any
    /// network activity. A mid-run transport failure propagates after the
    /// engine has persisted whatever progress was made; the summary line
    /// is printed on every path.
    pub async fn run(&self) -> Result<()> {
        let since_id = self.parse_since()?;
        if self.cli.batch != 10 {
            debug!("--batch is accepted for compatibility and has no effect");
        }

        let credentials = Credentials::from_file(&self.cli.credentials)?;
        let http_config = HttpClientConfig::builder()
            .base_url(&self.cli.base_url)
            .build();
        let client = TimelineClient::new(http_config, credentials)?;

        let cursor = CursorStore::new(&self.cli.cursor_file);
        let sink = JsonFileSink::new(&self.cli.out);
        let config = FetchConfig::new(&self.cli.account)
            .with_page_size(self.cli.count)
            .with_cap(self.cli.total)
            .with_since(since_id);

        let mut engine = TimelineEngine::new(client, cursor, sink, config)
            .with_backoff(BackoffPolicy::new(Duration::from_secs(self.cli.min_wait)));

        let outcome = engine.run().await;

        // The final count is reported on success and abort alike; the
        // engine has already persisted the cursor by now.
        let written = engine.stats().items_written;
        println!("--------------------------------------------------------");
        println!("Wrote {written} items to {}_<id>.json", self.cli.out);

        outcome.map(|_| ())
    }

    /// Resolve the --since flag: empty means unset, anything else must be
    /// a decimal item id.
    fn parse_since(&self) -> Result<Option<ItemId>> {
        match self.cli.since.clone().none_if_empty() {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| Error::config(format!("invalid --since id: {raw}"))),
        }
    }
}
