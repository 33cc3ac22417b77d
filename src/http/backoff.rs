//! Server-driven rate-limit backoff
//!
//! When the API rejects a request with a rate-limit status it reports the
//! instant at which the window resets. The wait is derived from that
//! instant, never from a retry counter: rate-limit retries are expected
//! and unbounded.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default minimum wait after a rate-limit rejection.
pub const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(10);

/// Computes how long to sleep after a rate-limit rejection.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    min_wait: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            min_wait: DEFAULT_MIN_WAIT,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with the given minimum wait
    pub fn new(min_wait: Duration) -> Self {
        Self { min_wait }
    }

    /// The configured minimum wait
    pub fn min_wait(&self) -> Duration {
        self.min_wait
    }

    /// Sleep duration for a reset at `reset`, observed at `now`.
    ///
    /// `max(reset - now + 1s, min_wait)`. The one-second pad covers the
    /// boundary where the reset instant has passed on our clock but the
    /// server has not rolled the window yet; a reset already in the past
    /// still waits the floor.
    pub fn wait_for(&self, reset: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        let until_reset = (reset - now + chrono::Duration::seconds(1))
            .to_std()
            .unwrap_or(Duration::ZERO);
        until_reset.max(self.min_wait)
    }
}
