//! Field extraction for a single article page.
//!
//! Each function answers one question about the document and returns `None`
//! (or an empty list) when the page does not have what we look for. Deciding
//! whether that means the page is rejected is left to `post`.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::dom::{nearest_ancestor, DocumentOrder};
use crate::text::{element_text, norm};

/// Class carried by the styled download buttons.
pub const BUTTON_CLASS: &str = "wp-block-button__link";
/// Section title used when nothing bold precedes the first table.
pub const DEFAULT_SECTION_TITLE: &str = "Resumo";

const SOCIAL_HOSTS: [&str; 8] = [
    "facebook.com",
    "twitter.com",
    "t.me",
    "linkedin.com",
    "instagram.com",
    "wa.me",
    "tiktok.com",
    "x.com",
];

const BLOCK_TAGS: [&str; 5] = ["p", "div", "section", "article", "blockquote"];

static RE_OFFICIAL_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)p[aá]gina oficial da (banca organizadora|institui[cç][aã]o|processo seletivo|sele[cç][aã]o)")
        .unwrap()
});
static RE_PDF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.pdf(\?|#|$)").unwrap());
static RE_AVISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*aviso\s*$").unwrap());
static RE_RESUMO_EDITAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*Resumo\s+Edital\s+(.+?)(?:\s+(?:19|20)\d{2})?\s*$").unwrap()
});

static SEL_OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static SEL_H1_H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2").unwrap());
static SEL_PUBLISHED: Lazy<[Selector; 3]> = Lazy::new(|| {
    [
        Selector::parse(r#"meta[property="article:published_time"]"#).unwrap(),
        Selector::parse(r#"meta[name="article:published_time"]"#).unwrap(),
        Selector::parse(r#"time[itemprop="datePublished"]"#).unwrap(),
    ]
});
static SEL_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static SEL_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Post title: `og:title`, then the first h1/h2, then the URL itself.
pub fn post_title(doc: &Html, url: &Url) -> String {
    let og = doc
        .select(&SEL_OG_TITLE)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(norm)
        .filter(|t| !t.is_empty());
    if let Some(title) = og {
        return title;
    }
    doc.select(&SEL_H1_H2)
        .next()
        .map(|h| element_text(&h))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string())
}

/// Publication time as written in the page. Only the first source present is
/// read; if its value is blank there is no publication time.
pub fn posted_at(doc: &Html) -> Option<String> {
    let el = SEL_PUBLISHED
        .iter()
        .find_map(|sel| doc.select(sel).next())?;
    let v = el.value();
    let raw = v.attr("content").or_else(|| v.attr("datetime")).unwrap_or("").trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// First and last `<table>` of the document.
pub fn table_bounds(doc: &Html) -> Option<(ElementRef<'_>, ElementRef<'_>)> {
    let mut tables = doc.select(&SEL_TABLE);
    let first = tables.next()?;
    let last = tables.last().unwrap_or(first);
    Some((first, last))
}

/// Nearest bold or h2-h4 text before `table`, skipping a lone "Aviso".
pub fn section_title<'a>(order: &DocumentOrder<'a>, table: ElementRef<'a>) -> Option<String> {
    order.preceding(table).iter().rev().find_map(|el| {
        if !matches!(el.value().name(), "strong" | "b" | "h2" | "h3" | "h4") {
            return None;
        }
        let txt = element_text(el);
        (!txt.is_empty() && !RE_AVISO.is_match(&txt)).then_some(txt)
    })
}

/// Institution name from a "Resumo Edital <NAME> [year]" heading, else the fallback.
pub fn institution_name(section_title: &str, fallback: &str) -> String {
    if let Some(caps) = RE_RESUMO_EDITAL.captures(section_title) {
        let name = norm(&caps[1]);
        if !name.is_empty() {
            return name;
        }
    }
    norm(fallback)
}

/// First anchor whose text names the official page and whose target is off-site.
/// Returns the resolved URL with the anchor itself.
pub fn official_link<'a>(
    doc: &'a Html,
    base: &Url,
    site_host: &str,
) -> Option<(Url, ElementRef<'a>)> {
    doc.select(&SEL_LINK).find_map(|a| {
        if !RE_OFFICIAL_TEXT.is_match(&element_text(&a)) {
            return None;
        }
        let href = base.join(a.value().attr("href")?.trim()).ok()?;
        let host = href.host_str()?.to_lowercase();
        if host_matches(&host, site_host) || SOCIAL_HOSTS.iter().any(|s| host_matches(&host, s)) {
            return None;
        }
        Some((href, a))
    })
}

/// `host` is `domain` or one of its subdomains.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Closest structural block around the official-link anchor.
pub fn disclaimer_block(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    nearest_ancestor(anchor, &BLOCK_TAGS)
}

pub fn is_pdf_href(href: &str) -> bool {
    let href = href.trim();
    !href.is_empty() && RE_PDF.is_match(href)
}

/// Absolute, de-duplicated PDF button links found after `last_table` and before `block`.
pub fn pdf_buttons<'a>(
    order: &DocumentOrder<'a>,
    last_table: ElementRef<'a>,
    block: ElementRef<'a>,
    base: &Url,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pdfs = Vec::new();
    for el in order.between(last_table, block) {
        let v = el.value();
        if v.name() != "a" || !v.classes().any(|c| c == BUTTON_CLASS) {
            continue;
        }
        let Some(href) = v.attr("href").filter(|h| is_pdf_href(h)) else {
            continue;
        };
        if let Ok(abs) = base.join(href.trim()) {
            let abs = abs.to_string();
            if seen.insert(abs.clone()) {
                pdfs.push(abs);
            }
        }
    }
    pdfs
}
