mod commands;
mod map;
mod session;

use commands::{Command, PROMPT};
use http_fetcher::ReqwestFetcher;
use session::{Outcome, Session};
use shared::config::Config;
use site_scraper::NpsSiteSource;
use std::io::Write;
use std::sync::Arc;
use storage_engine::JsonFileStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trailhead::{GeocodeResolver, NearbySearch, RegionTable, RequestCache, SitePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    let regions = Arc::new(RegionTable::load(&config.regions_path)?);
    info!(
        "Loaded {} region(s) from {}",
        regions.len(),
        config.regions_path.display()
    );

    let store = Arc::new(JsonFileStore::new(&config.cache_dir));
    let fetcher = Arc::new(ReqwestFetcher::new()?);
    let requests = RequestCache::new(store, fetcher);
    info!("Request cache at {}", config.cache_dir.display());

    let sites = Arc::new(NpsSiteSource::new(
        requests.clone(),
        &config.site_base_url,
    ));
    let geocoder = GeocodeResolver::new(
        requests.clone(),
        &config.text_search_url,
        &config.places_api_key,
    );
    let nearby = NearbySearch::new(requests, &config.nearby_search_url, &config.places_api_key);
    let pipeline = SitePipeline::new(sites, geocoder, nearby, regions);

    let mut session = Session::new(pipeline, &config.map_dir);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle(Command::parse(&line)).await {
            Outcome::Continue(text) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Outcome::Exit => {
                println!("Bye!");
                break;
            }
        }
    }

    Ok(())
}
