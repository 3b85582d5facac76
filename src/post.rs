//! Turns one article page into a `Record`, or explains why it could not.

use chrono::Utc;
use scraper::Html;
use std::fmt;
use url::Url;

use crate::dom::DocumentOrder;
use crate::error::Error;
use crate::extract;
use crate::fetch::Fetch;
use crate::record::Record;

/// Why a page was deliberately left out. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoTables,
    NoOfficialLink,
    NoDisclaimerBlock,
    NoPdfButtons,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NoTables => "no tables",
            Rejection::NoOfficialLink => "no official link",
            Rejection::NoDisclaimerBlock => "no disclaimer block",
            Rejection::NoPdfButtons => "no PDF buttons between tables and disclaimer",
        };
        f.write_str(reason)
    }
}

#[derive(Debug)]
pub enum Outcome {
    Accepted(Record),
    Rejected { title: String, reason: Rejection },
    Failed(Error),
}

/// Fetch `url` and run the extraction pipeline on it.
pub fn parse_post(fetcher: &dyn Fetch, url: &Url, site_host: &str) -> Outcome {
    match fetcher.fetch(url) {
        Ok(doc) => parse_document(&doc, url, site_host),
        Err(e) => Outcome::Failed(e),
    }
}

/// Extraction on an already parsed page. Each gate either advances or rejects.
pub fn parse_document(doc: &Html, url: &Url, site_host: &str) -> Outcome {
    let title = extract::post_title(doc, url);
    let captured_at = Utc::now().to_rfc3339();
    let posted_at = extract::posted_at(doc).unwrap_or_else(|| captured_at.clone());

    let reject = |reason| Outcome::Rejected {
        title: title.clone(),
        reason,
    };

    let Some((first_table, last_table)) = extract::table_bounds(doc) else {
        return reject(Rejection::NoTables);
    };
    let order = DocumentOrder::new(doc);
    let section_title = extract::section_title(&order, first_table)
        .unwrap_or_else(|| extract::DEFAULT_SECTION_TITLE.to_string());
    let institution = extract::institution_name(&section_title, &title);

    let Some((official, anchor)) = extract::official_link(doc, url, site_host) else {
        return reject(Rejection::NoOfficialLink);
    };
    let Some(block) = extract::disclaimer_block(anchor) else {
        return reject(Rejection::NoDisclaimerBlock);
    };

    let notices = extract::pdf_buttons(&order, last_table, block, url);
    if notices.is_empty() {
        return reject(Rejection::NoPdfButtons);
    }

    Outcome::Accepted(Record {
        institution,
        notices,
        official_link: official.to_string(),
        posted_at: Some(posted_at),
        captured_at,
    })
}
