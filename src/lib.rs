//! Collects public notices ("editais") from a news listing.
//!
//! Each run reads the listing page, visits the linked articles one by one and
//! keeps those that look like a notice summary: at least one table, an
//! official-page link in a disclaimer paragraph, and PDF download buttons
//! between the two. The results are merged into a JSON file keyed by the
//! official link.

pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod merge;
pub mod post;
pub mod record;
pub mod run;
pub mod store;
pub mod text;

pub use config::Settings;
pub use error::{Error, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use post::{Outcome, Rejection};
pub use record::{Entry, Record};
pub use run::{run, RunSummary};
