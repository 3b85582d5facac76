use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use scraper::Html;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config;
use crate::error::{Error, Result};

/// Turns a URL into a parsed document.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> Result<Html>;
}

/// Blocking HTTP fetcher with a fixed identity and timeout. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Html> {
        debug!(url = url.as_str(), "GET");
        let resp = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, config::USER_AGENT)
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, config::ACCEPT_LANGUAGE)
            .send()?;

        if !resp.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        let body = resp.text()?;
        Ok(Html::parse_document(&body))
    }
}
