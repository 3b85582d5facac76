use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::debug;

use crate::record::Entry;

/// Entries from a loaded collection that can take part in a merge: JSON
/// objects with a non-empty `link_oficial` string. They are kept verbatim.
pub fn entries_from_json(values: Vec<JsonValue>) -> Vec<Entry> {
    values
        .into_iter()
        .filter_map(|v| match v {
            JsonValue::Object(entry) if entry_link(&entry).is_some() => Some(entry),
            other => {
                debug!("ignoring stored entry: {other}");
                None
            }
        })
        .collect()
}

/// Merge key of an entry.
pub fn entry_link(entry: &Entry) -> Option<&str> {
    text_field(entry, "link_oficial")
}

/// `posted_at` when it is a non-empty string, else `captured_at`, else "".
pub fn entry_sort_key(entry: &Entry) -> &str {
    text_field(entry, "posted_at")
        .or_else(|| text_field(entry, "captured_at"))
        .unwrap_or("")
}

fn text_field<'a>(entry: &'a Entry, name: &str) -> Option<&'a str> {
    entry
        .get(name)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
}

/// Combine stored and fresh entries keyed by official link. A later entry
/// replaces an earlier one whole but takes over its slot, so the first
/// appearance of a link fixes its place. Fresh entries always win over stored
/// ones. Output is newest first by `entry_sort_key` (plain string order);
/// ties keep that insertion order.
pub fn merge(existing: Vec<Entry>, new_items: Vec<Entry>) -> Vec<Entry> {
    let mut merged: Vec<Entry> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for entry in existing.into_iter().chain(new_items) {
        let Some(link) = entry_link(&entry).map(str::to_string) else {
            continue;
        };
        match slot.get(&link) {
            Some(&idx) => merged[idx] = entry,
            None => {
                slot.insert(link, merged.len());
                merged.push(entry);
            }
        }
    }
    merged.sort_by(|a, b| entry_sort_key(b).cmp(entry_sort_key(a)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    fn rec(link: &str, name: &str, posted: Option<&str>, captured: &str) -> Entry {
        Record {
            institution: name.to_string(),
            notices: vec![format!("{link}/edital.pdf")],
            official_link: link.to_string(),
            posted_at: posted.map(str::to_string),
            captured_at: captured.to_string(),
        }
        .into_entry()
        .unwrap()
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e["instituicao"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn same_link_is_replaced_entirely() {
        let mut old = rec("https://hu.br", "HU antigo", Some("2025-01-01T00:00:00Z"), "c1");
        old.insert("nota".to_string(), json!("manual"));
        let mut new = rec("https://hu.br", "HU", None, "2025-02-01T00:00:00Z");
        new["edital"] = json!(["https://hu.br/novo.pdf"]);
        let merged = merge(vec![old], vec![new.clone()]);
        assert_eq!(merged, vec![new]);
    }

    #[test]
    fn distinct_links_are_kept() {
        let a = rec("https://a.br", "A", Some("2025-01-01T00:00:00Z"), "");
        let b = rec("https://b.br", "B", Some("2025-01-02T00:00:00Z"), "");
        assert_eq!(merge(vec![a], vec![b]).len(), 2);
    }

    #[test]
    fn later_new_record_wins() {
        let first = rec("https://a.br", "first", None, "2025-01-01");
        let second = rec("https://a.br", "second", None, "2025-01-01");
        let merged = merge(Vec::new(), vec![first, second]);
        assert_eq!(names(&merged), vec!["second"]);
    }

    #[test]
    fn sorted_newest_first_with_capture_fallback() {
        let jan = rec("https://a.br", "A", Some("2025-01-01T00:00:00Z"), "");
        let jun = rec("https://b.br", "B", Some("2025-06-01T00:00:00Z"), "");
        let mar = rec("https://c.br", "C", None, "2025-03-01T00:00:00Z");
        let merged = merge(vec![jan], vec![mar, jun]);
        assert_eq!(names(&merged), vec!["B", "C", "A"]);
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let stored: Vec<Entry> = (0..4)
            .map(|i| rec(&format!("https://s{i}.br"), &format!("s{i}"), Some("2025-01-01"), ""))
            .collect();
        let fresh: Vec<Entry> = (0..4)
            .map(|i| rec(&format!("https://n{i}.br"), &format!("n{i}"), Some("2025-01-01"), ""))
            .collect();
        let expected = vec!["s0", "s1", "s2", "s3", "n0", "n1", "n2", "n3"];
        for _ in 0..10 {
            let merged = merge(stored.clone(), fresh.clone());
            assert_eq!(names(&merged), expected);
        }
    }

    #[test]
    fn replaced_entry_keeps_its_slot_on_ties() {
        let a = rec("https://a.br", "A", Some("2025-01-01"), "");
        let b = rec("https://b.br", "B", Some("2025-01-01"), "");
        let a2 = rec("https://a.br", "A2", Some("2025-01-01"), "");
        assert_eq!(names(&merge(vec![a, b], vec![a2])), vec!["A2", "B"]);
    }

    #[test]
    fn only_non_objects_and_missing_links_are_ignored() {
        let values = vec![
            json!("not an object"),
            json!({"instituicao": "X", "edital": []}),
            json!({"instituicao": "Y", "edital": [], "link_oficial": ""}),
            json!({"edital": ["https://a.br/e.pdf"], "link_oficial": "https://a.br"}),
            json!({"instituicao": "B", "link_oficial": "https://b.br", "captured_at": null}),
            json!({"instituicao": "C", "edital": "https://c.br/e.pdf", "link_oficial": "https://c.br"}),
            json!({"instituicao": "D", "link_oficial": "https://d.br", "extra": {"k": 1}}),
        ];
        let entries = entries_from_json(values);
        let links: Vec<&str> = entries.iter().filter_map(entry_link).collect();
        assert_eq!(links, vec!["https://a.br", "https://b.br", "https://c.br", "https://d.br"]);
        assert_eq!(entries[3]["extra"], json!({"k": 1}));
        assert_eq!(entry_sort_key(&entries[1]), "");
    }
}
