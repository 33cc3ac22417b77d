//! Cursor persistence
//!
//! The resume point survives process restarts as a single line of text:
//! the decimal id of the last item written by the previous run. Loading
//! is deliberately forgiving: a missing or malformed file means "no
//! resume point", never a failed run.

use crate::error::Result;
use crate::types::ItemId;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed store for the last-processed item id
#[derive(Debug, Clone)]
pub struct CursorStore {
    path: PathBuf,
}

impl CursorStore {
    /// Create a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored cursor.
    ///
    /// Any I/O or parse failure yields `None`; the run then starts from
    /// the newest available item.
    pub fn load(&self) -> Option<ItemId> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("no cursor at {}: {e}", self.path.display());
                return None;
            }
        };

        match contents.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(
                    "malformed cursor file {}, ignoring it",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Overwrite the store with `id`, newline-terminated.
    ///
    /// Goes through a temp-file rename so a crash mid-write cannot leave
    /// a truncated cursor. Callers treat failure as non-fatal; by the
    /// time the cursor is saved the fetch work is already done.
    pub fn save(&self, id: ItemId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, format!("{id}\n"))?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// The store's file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
