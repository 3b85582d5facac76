use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::merge::entries_from_json;
use crate::record::Entry;

/// Stored entries, or an empty list when the file is missing, unreadable,
/// not JSON, or not an array.
pub fn load(path: &Path) -> Vec<Entry> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            debug!("no stored collection at {}: {e}", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_str::<JsonValue>(&text) {
        Ok(JsonValue::Array(values)) => entries_from_json(values),
        Ok(_) => {
            debug!("{} does not hold a JSON array; starting empty", path.display());
            Vec::new()
        }
        Err(e) => {
            debug!("{} is not valid JSON ({e}); starting empty", path.display());
            Vec::new()
        }
    }
}

/// Write `entries` as a pretty JSON array, replacing the file.
pub fn save(path: &Path, entries: &[Entry]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    info!("wrote {} ({} records)", path.display(), entries.len());
    Ok(())
}
