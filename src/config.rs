use std::path::PathBuf;
use std::time::Duration;

/// News listing that is scanned for candidate articles.
pub const LIST_URL: &str = "https://med.estrategia.com/portal/noticias/";
/// Only anchors whose href contains this segment are treated as articles.
pub const LISTING_PATH: &str = "/portal/noticias/";
/// Hostname of the source site; official links never point here.
pub const SITE_HOST: &str = "med.estrategia.com";
pub const OUT_PATH: &str = "data/editais_min.json";

pub const USER_AGENT: &str = "ResidMedBot/3.1";
pub const ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9";

pub const DEFAULT_LIMIT: usize = 30;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Everything a run needs to know. `Settings::default()` is the canonical setup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub list_url: String,
    pub listing_path: String,
    pub site_host: String,
    pub out_path: PathBuf,
    pub limit: usize,
    pub timeout: Duration,
    /// Pause after each article request.
    pub delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            list_url: LIST_URL.to_string(),
            listing_path: LISTING_PATH.to_string(),
            site_host: SITE_HOST.to_string(),
            out_path: PathBuf::from(OUT_PATH),
            limit: DEFAULT_LIMIT,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}
