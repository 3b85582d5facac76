use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::info;
use url::Url;

use crate::error::Result;
use crate::fetch::Fetch;

static SEL_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Fetch the listing page and return up to `limit` article URLs, in page order.
/// A fetch failure is returned to the caller as is.
pub fn list_article_urls(
    fetcher: &dyn Fetch,
    list_url: &Url,
    listing_path: &str,
    limit: usize,
) -> Result<Vec<Url>> {
    info!("reading listing: {list_url}");
    let doc = fetcher.fetch(list_url)?;
    let urls = article_urls(&doc, list_url, listing_path);
    info!(
        "found {} links; checking {}",
        urls.len(),
        limit.min(urls.len())
    );
    Ok(urls.into_iter().take(limit).collect())
}

/// Every distinct absolute http(s) URL whose href contains `listing_path`,
/// with query and fragment removed.
pub fn article_urls(doc: &Html, base: &Url, listing_path: &str) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for a in doc.select(&SEL_LINK) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        if !href.contains(listing_path) {
            continue;
        }
        let Ok(mut abs) = base.join(strip_query(href)) else {
            continue;
        };
        abs.set_query(None);
        abs.set_fragment(None);
        if !matches!(abs.scheme(), "http" | "https") {
            continue;
        }
        if seen.insert(abs.to_string()) {
            urls.push(abs);
        }
    }
    urls
}

fn strip_query(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}
