//! HTTP client module
//!
//! Provides the rate-limited API client and the backoff policy applied
//! when the server rejects a request.
//!
//! # Features
//!
//! - **Local throttle**: token bucket rate limiter using governor, awaited
//!   before every request
//! - **Rate-limit classification**: HTTP 429 (and legacy 420) become a
//!   typed signal carrying the server-reported reset time
//! - **Backoff policy**: sleep duration derived from the reset time with a
//!   minimum floor

mod backoff;
mod client;
mod rate_limit;

pub use backoff::BackoffPolicy;
pub use client::{HttpClientConfig, HttpClientConfigBuilder, Page, TimelineClient};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
