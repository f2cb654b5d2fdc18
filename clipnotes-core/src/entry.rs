/// A single captured clipboard snippet
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::TRUNCATION_MARKER;

/// One text value taken from the clipboard
///
/// `id` and `timestamp` are fixed at creation. Only `content` may change,
/// and only through the history's edit path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    id: Uuid,
    pub(crate) content: String,
    timestamp: DateTime<Utc>,
}

impl ClipboardEntry {
    /// Create a new entry captured now
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Shortened content for list display
    ///
    /// Counts characters, not bytes, so multi-byte text is never split.
    pub fn display_summary(&self, max_len: usize) -> String {
        match self.content.char_indices().nth(max_len) {
            None => self.content.clone(),
            Some((cut, _)) => format!("{}{}", &self.content[..cut], TRUNCATION_MARKER),
        }
    }

    /// Case-insensitive substring test used by history search
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.content.to_lowercase().contains(&query.to_lowercase())
    }
}
