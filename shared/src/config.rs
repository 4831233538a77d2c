use std::path::PathBuf;
use tracing::warn;

/// Runtime settings, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Clone, Debug)]
pub struct Config {
    pub places_api_key: String,
    pub cache_dir: PathBuf,
    pub regions_path: PathBuf,
    pub text_search_url: String,
    pub nearby_search_url: String,
    pub site_base_url: String,
    pub map_dir: PathBuf,
}

impl Config {
    const DEFAULT_CACHE_DIR: &str = "./cache";
    const DEFAULT_REGIONS_PATH: &str = "./data/regions.json";
    const DEFAULT_TEXT_SEARCH_URL: &str =
        "https://maps.googleapis.com/maps/api/place/textsearch/json";
    const DEFAULT_NEARBY_SEARCH_URL: &str =
        "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
    const DEFAULT_SITE_BASE_URL: &str = "https://www.nps.gov";
    const DEFAULT_MAP_DIR: &str = "./maps";

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let places_api_key = var("TRAILHEAD_PLACES_API_KEY").unwrap_or_else(|| {
            warn!("TRAILHEAD_PLACES_API_KEY not set, place searches will be rejected upstream");
            String::new()
        });

        Self {
            places_api_key,
            cache_dir: var("TRAILHEAD_CACHE_DIR")
                .unwrap_or_else(|| Self::DEFAULT_CACHE_DIR.to_string())
                .into(),
            regions_path: var("TRAILHEAD_REGIONS_PATH")
                .unwrap_or_else(|| Self::DEFAULT_REGIONS_PATH.to_string())
                .into(),
            text_search_url: var("TRAILHEAD_TEXT_SEARCH_URL")
                .unwrap_or_else(|| Self::DEFAULT_TEXT_SEARCH_URL.to_string()),
            nearby_search_url: var("TRAILHEAD_NEARBY_SEARCH_URL")
                .unwrap_or_else(|| Self::DEFAULT_NEARBY_SEARCH_URL.to_string()),
            site_base_url: var("TRAILHEAD_SITE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_SITE_BASE_URL.to_string()),
            map_dir: var("TRAILHEAD_MAP_DIR")
                .unwrap_or_else(|| Self::DEFAULT_MAP_DIR.to_string())
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.places_api_key, "");
        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert_eq!(config.regions_path, PathBuf::from("./data/regions.json"));
        assert_eq!(config.site_base_url, "https://www.nps.gov");
        assert!(config.text_search_url.ends_with("/textsearch/json"));
        assert!(config.nearby_search_url.ends_with("/nearbysearch/json"));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars = HashMap::from([
            ("TRAILHEAD_PLACES_API_KEY", "secret"),
            ("TRAILHEAD_CACHE_DIR", "/tmp/trailhead"),
            ("TRAILHEAD_SITE_BASE_URL", "http://localhost:9000/"),
            ("TRAILHEAD_MAP_DIR", "   "),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.places_api_key, "secret");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/trailhead"));
        // trailing slash is dropped so hrefs can be appended directly
        assert_eq!(config.site_base_url, "http://localhost:9000");
        assert_eq!(config.map_dir, PathBuf::from("./maps"));
    }
}
