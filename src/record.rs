use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;

/// A collection entry as stored on disk. Stored entries stay raw JSON so
/// fields this crate does not model survive a rewrite.
pub type Entry = Map<String, JsonValue>;

/// One public notice as parsed from a page. Field names match what the
/// front-end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "instituicao")]
    pub institution: String,
    /// Absolute PDF URLs, in page order. Never empty for a freshly parsed record.
    #[serde(rename = "edital")]
    pub notices: Vec<String>,
    #[serde(rename = "link_oficial")]
    pub official_link: String,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub captured_at: String,
}

impl Record {
    pub fn into_entry(self) -> Result<Entry> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }
}
