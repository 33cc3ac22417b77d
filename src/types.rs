//! Common types used throughout timeline-archiver

use serde_json::Value;

/// Unique, monotonically-assigned identifier of a timeline item.
///
/// Ids are assigned in increasing order by the server, so they double as
/// the ordering key for the backward-paging window.
pub type ItemId = u64;

/// Extract the required numeric id from an otherwise opaque item.
///
/// Items are passed through verbatim; the id is the only field the engine
/// and the sink ever interpret. Accepts a numeric `id` or, as some API
/// versions serialize large ids as strings, a decimal `id_str`.
pub fn item_id(item: &Value) -> Option<ItemId> {
    if let Some(id) = item.get("id").and_then(Value::as_u64) {
        return Some(id);
    }
    item.get("id_str")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

/// Extension trait for treating empty strings as unset
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
