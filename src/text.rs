use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs (including NBSP) to a single space, trim, and NFC-normalize.
pub fn norm(s: &str) -> String {
    let composed = s.nfc().collect::<String>();
    RE_WHITESPACE.replace_all(&composed, " ").trim().to_string()
}

/// All text under `el`, pieces joined by a space, then normalized.
pub fn element_text(el: &ElementRef) -> String {
    norm(&el.text().collect::<Vec<_>>().join(" "))
}
