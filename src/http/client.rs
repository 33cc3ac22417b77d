//! Rate-limited timeline API client
//!
//! Sends authenticated GET requests for timeline pages and classifies
//! server rate-limit rejections into a typed signal carrying the reset
//! time. No other failure is retried here; the run policy treats them as
//! fatal.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Credentials;
use crate::engine::PageQuery;
use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// API path of the user-timeline endpoint.
const TIMELINE_PATH: &str = "/1.1/statuses/user_timeline.json";

/// Fallback reset distance when a rate-limit response carries no usable
/// reset information.
const DEFAULT_RESET_SECS: i64 = 60;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Origin of the timeline API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Local throttle configuration (None disables it)
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com".to_string(),
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: format!("timeline-archiver/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the API origin
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the local throttle
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable the local throttle
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// One fetched page of timeline items
#[derive(Debug, Clone)]
pub struct Page {
    /// Items in API order (newest first)
    pub items: Vec<Value>,
    /// Calls left in the current rate-limit window, when reported
    pub calls_remaining: Option<u64>,
}

/// Authenticated client for the timeline endpoint
pub struct TimelineClient {
    client: Client,
    config: HttpClientConfig,
    credentials: Credentials,
    limiter: Option<RateLimiter>,
}

impl TimelineClient {
    /// Create a client from config and credentials
    pub fn new(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            credentials,
            limiter,
        })
    }

    /// Fetch one page of the timeline described by `query`.
    ///
    /// Waits for the local throttle, sends the authenticated GET, and
    /// returns the parsed items. A rate-limit rejection surfaces as
    /// `Error::RateLimited` with the server-reported reset time; any other
    /// non-success status or parse failure is an ordinary error.
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        if let Some(ref limiter) = self.limiter {
            limiter.wait().await;
        }

        let url = format!("{}{TIMELINE_PATH}", self.config.base_url.trim_end_matches('/'));
        let req = self
            .client
            .get(&url)
            .query(&query.params());
        let response = self.credentials.apply(req).send().await.map_err(Error::Http)?;

        let status = response.status();
        if is_rate_limit_status(status) {
            let reset = extract_reset(&response);
            return Err(Error::RateLimited { reset });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let calls_remaining = header_u64(&response, "x-rate-limit-remaining");
        let body = response.text().await.map_err(Error::Http)?;
        let items: Vec<Value> = serde_json::from_str(&body)?;

        debug!("fetched {} items from {url}", items.len());
        Ok(Page {
            items,
            calls_remaining,
        })
    }
}

impl std::fmt::Debug for TimelineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineClient")
            .field("config", &self.config)
            .field("has_limiter", &self.limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Check if a status signals a rate-limit rejection.
///
/// 420 is the legacy "enhance your calm" status some timeline API
/// versions still return.
fn is_rate_limit_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() == 420
}

/// Extract the window reset instant from a rate-limit response.
///
/// Prefers the absolute `x-rate-limit-reset` epoch timestamp, falls back
/// to a relative `retry-after`, then to a fixed distance.
fn extract_reset(response: &Response) -> DateTime<Utc> {
    if let Some(epoch) = header_u64(response, "x-rate-limit-reset") {
        if let Some(reset) = Utc.timestamp_opt(epoch as i64, 0).single() {
            return reset;
        }
    }
    let secs = header_u64(response, "retry-after").map_or(DEFAULT_RESET_SECS, |s| s as i64);
    Utc::now() + chrono::Duration::seconds(secs)
}

/// Parse a numeric header value
fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}
