use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use editais_scrape::config::{
    DEFAULT_DELAY_MS, DEFAULT_LIMIT, DEFAULT_TIMEOUT_MS, LIST_URL, OUT_PATH,
};
use editais_scrape::{run, HttpFetcher, Settings};

/// editais_scrape - collect public notice PDFs from the news listing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listing page to scan
    #[arg(long, default_value = LIST_URL)]
    url: String,

    /// Maximum number of articles to check
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Timeout in milliseconds for each request
    #[arg(short = 't', long = "timeout-ms", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Pause in milliseconds after each article
    #[arg(long = "delay-ms", default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// JSON file holding the collection
    #[arg(short = 'o', long, default_value = OUT_PATH)]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let settings = Settings {
        list_url: args.url,
        limit: args.limit,
        timeout: Duration::from_millis(args.timeout_ms),
        delay: Duration::from_millis(args.delay_ms),
        out_path: args.output,
        ..Settings::default()
    };

    let result = HttpFetcher::new(settings.timeout).and_then(|fetcher| run(&fetcher, &settings));
    match result {
        Ok(summary) => {
            tracing::info!(
                "done: {} checked, {} kept, {} discarded, {} errors, {} stored",
                summary.candidates,
                summary.kept,
                summary.discarded,
                summary.failed,
                summary.total
            );
            std::process::exit(0)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
