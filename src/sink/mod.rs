//! Item persistence
//!
//! The engine hands each fetched item to an [`ItemSink`] and forgets it.
//! Sink failures are per-item: the implementation returns an error and
//! the engine skips that item without aborting the run.

use crate::error::{Error, Result};
use crate::types::{item_id, ItemId};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receiver for fetched items.
///
/// `write` must be safe to re-invoke for an item that was already
/// persisted by an earlier run (idempotent overwrite) and must report
/// failure by return value, never by panicking.
pub trait ItemSink {
    /// Persist one item. `sequence` is the zero-based position of this
    /// item within the run, for diagnostics only.
    fn write(&self, item: &Value, sequence: usize) -> Result<()>;
}

/// Sink writing one pretty-printed JSON file per item.
///
/// Files land at `<prefix>_<id>.json`; an existing file is overwritten,
/// which makes re-running over already-archived items harmless.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    prefix: PathBuf,
}

impl JsonFileSink {
    /// Create a sink writing under the given path prefix
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Output path for an item id
    pub fn path_for(&self, id: ItemId) -> PathBuf {
        PathBuf::from(format!("{}_{id}.json", self.prefix.display()))
    }

    /// The configured path prefix
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }
}

impl ItemSink for JsonFileSink {
    fn write(&self, item: &Value, sequence: usize) -> Result<()> {
        let id = item_id(item)
            .ok_or_else(|| Error::sink("item carries no usable id to name its file"))?;
        let path = self.path_for(id);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut text = serde_json::to_string_pretty(item)?;
        text.push('\n');
        std::fs::write(&path, text)?;

        debug!("wrote item {sequence} to {}", path.display());
        Ok(())
    }
}
