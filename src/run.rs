use std::thread::sleep;
use tracing::{info, warn};
use url::Url;

use crate::config::Settings;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::listing::list_article_urls;
use crate::merge::merge;
use crate::post::{parse_post, Outcome};
use crate::record::Record;
use crate::store;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub kept: usize,
    pub discarded: usize,
    pub failed: usize,
    /// Size of the collection written at the end of the run.
    pub total: usize,
}

/// One full pass: scan the listing, parse each article in turn, merge with
/// the stored collection and write it back.
///
/// Only a listing failure or a failed write ends the run early. Everything
/// that goes wrong with a single article is logged and skipped.
pub fn run(fetcher: &dyn Fetch, settings: &Settings) -> Result<RunSummary> {
    let existing = store::load(&settings.out_path);
    let list_url = Url::parse(&settings.list_url)?;
    let urls = list_article_urls(fetcher, &list_url, &settings.listing_path, settings.limit)?;

    let mut summary = RunSummary {
        candidates: urls.len(),
        ..RunSummary::default()
    };
    let mut items: Vec<Record> = Vec::new();

    for url in &urls {
        match parse_post(fetcher, url, &settings.site_host) {
            Outcome::Accepted(rec) => {
                info!(
                    "  kept: {} | institution={} | pdfs={}",
                    url,
                    rec.institution,
                    rec.notices.len()
                );
                summary.kept += 1;
                items.push(rec);
            }
            Outcome::Rejected { title, reason } => {
                info!("  discarded: {title} | {reason}");
                summary.discarded += 1;
            }
            Outcome::Failed(e) => {
                warn!("  error at {url}: {e}");
                summary.failed += 1;
            }
        }
        if !settings.delay.is_zero() {
            sleep(settings.delay);
        }
    }

    let new_count = items.len();
    let fresh = items
        .into_iter()
        .map(Record::into_entry)
        .collect::<Result<Vec<_>>>()?;
    let merged = merge(existing, fresh);
    store::save(&settings.out_path, &merged)?;
    summary.total = merged.len();
    info!("new this run: {new_count}");
    Ok(summary)
}
