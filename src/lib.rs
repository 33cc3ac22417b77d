//! # timeline-archiver
//!
//! Incremental downloader for an account's public timeline: walks the
//! paginated API backward in id space, writes each item to its own JSON
//! file, and resumes across runs from a persisted cursor.
//!
//! ## Control flow
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     TimelineEngine                        │
//! │  Init → Fetching → Processing → (Fetching | Done/Abort)   │
//! └───────────────────────────────────────────────────────────┘
//!        │               │                │
//! ┌──────┴─────┬─────────┴──────┬─────────┴──────┐
//! │ TimelineClient │ BackoffPolicy │ ItemSink / CursorStore │
//! │ auth'd GET     │ sleep until   │ one file per item,     │
//! │ 429 → reset    │ reset + floor │ last id on shutdown    │
//! └────────────────┴───────────────┴────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use timeline_archiver::auth::Credentials;
//! use timeline_archiver::engine::{FetchConfig, TimelineEngine};
//! use timeline_archiver::http::{HttpClientConfig, TimelineClient};
//! use timeline_archiver::sink::JsonFileSink;
//! use timeline_archiver::state::CursorStore;
//!
//! #[tokio::main]
//! async fn main() -> timeline_archiver::Result<()> {
//!     let credentials = Credentials::from_file("CREDENTIALS")?;
//!     let client = TimelineClient::new(HttpClientConfig::default(), credentials)?;
//!     let cursor = CursorStore::new("content/last_id");
//!     let sink = JsonFileSink::new("content/user_timeline");
//!
//!     let config = FetchConfig::new("sampleuser").with_cap(200);
//!     let mut engine = TimelineEngine::new(client, cursor, sink, config);
//!     let summary = engine.run().await?;
//!     println!("wrote {} items", summary.written);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credential loading and request decoration
pub mod auth;

/// HTTP client, local throttle, and rate-limit backoff
pub mod http;

/// Cursor persistence
pub mod state;

/// Item sinks
pub mod sink;

/// Pagination engine
pub mod engine;

/// Command-line interface
pub mod cli;

pub use error::{Error, Result};
pub use types::ItemId;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
