use crate::domain::response::SearchResponse;
use crate::domain::{CacheNamespace, Coordinate, NearbyPlaceRecord};
use crate::request::{Params, RequestCache};
use shared::Result;
use tracing::debug;

/// Search radius around the anchor, in the service's distance units (meters).
pub const NEARBY_RADIUS: u32 = 10_000;

/// Proximity search around an already-resolved anchor place.
#[derive(Clone, Debug)]
pub struct NearbySearch {
    requests: RequestCache,
    endpoint: String,
    api_key: String,
}

impl NearbySearch {
    pub fn new(
        requests: RequestCache,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            requests,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn search_params(&self, center: Coordinate) -> Params {
        Params::new()
            .with("location", format_location(center))
            .with("radius", NEARBY_RADIUS)
            .with("key", &self.api_key)
    }

    /// Places around `center`, in the order the service reports them, minus
    /// the anchor itself.
    pub async fn nearby_places(
        &self,
        anchor_name: &str,
        anchor_category: &str,
        center: Coordinate,
    ) -> Result<Vec<NearbyPlaceRecord>> {
        let params = self.search_params(center);
        let body = self
            .requests
            .fetch_cached(CacheNamespace::Nearby, &self.endpoint, Some(&params))
            .await?;

        let response = SearchResponse::parse(&body)?;
        if !response.is_ok() {
            debug!(
                "Nearby search around {} returned status '{}'",
                center, response.status
            );
        }

        Ok(response
            .results
            .iter()
            .filter(|entry| !is_anchor_entry(&entry.name, anchor_name, anchor_category))
            .map(|entry| NearbyPlaceRecord::new(entry.name.clone(), entry.coordinate()))
            .collect())
    }
}

/// The service lists the anchor among its own neighbours as
/// "{name} {category}"; only an exact match is dropped.
pub fn is_anchor_entry(entry_name: &str, anchor_name: &str, anchor_category: &str) -> bool {
    entry_name == format!("{} {}", anchor_name, anchor_category)
}

/// `"lat,lon"`, each value printed with at least one decimal place.
pub fn format_location(center: Coordinate) -> String {
    format!("{:?},{:?}", center.lat, center.lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::test_support::ScriptedFetcher;
    use std::sync::Arc;

    const ENDPOINT: &str = "https://places.test/nearbysearch/json";

    fn search() -> (NearbySearch, Arc<ScriptedFetcher>) {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let requests = RequestCache::new(Arc::new(MemoryStore::new()), fetcher.clone());
        (NearbySearch::new(requests, ENDPOINT, "test-key"), fetcher)
    }

    #[test]
    fn test_format_location() {
        assert_eq!(format_location(Coordinate::new(44.0, -85.0)), "44.0,-85.0");
        assert_eq!(
            format_location(Coordinate::new(46.5660849, -86.3120589)),
            "46.5660849,-86.3120589"
        );
    }

    #[test]
    fn test_anchor_predicate_is_exact() {
        assert!(is_anchor_entry(
            "Isle Royale National Park",
            "Isle Royale",
            "National Park"
        ));
        assert!(!is_anchor_entry(
            "Isle Royale National Park Visitor Center",
            "Isle Royale",
            "National Park"
        ));
        assert!(!is_anchor_entry("isle royale national park", "Isle Royale", "National Park"));
        assert!(!is_anchor_entry("Isle Royale", "Isle Royale", "National Park"));
    }

    #[test]
    fn test_search_params() {
        let (search, _) = search();
        let params = search.search_params(Coordinate::new(44.0, -85.0));
        assert_eq!(params.get("location"), Some("44.0,-85.0"));
        assert_eq!(params.get("radius"), Some("10000"));
        assert_eq!(params.get("key"), Some("test-key"));
    }

    #[tokio::test]
    async fn test_excludes_anchor_and_keeps_entries_without_geometry() {
        let (search, fetcher) = search();
        let center = Coordinate::new(48.0, -88.9);
        let body = serde_json::json!({
            "status": "OK",
            "results": [
                { "name": "Isle Royale National Park", "geometry": { "location": { "lat": 48.0, "lng": -88.9 } } },
                { "name": "Rock Harbor Lodge", "geometry": { "location": { "lat": 48.14, "lng": -88.48 } } },
                { "name": "Windigo" },
                { "name": "Isle Royale National Park", "geometry": { "location": { "lat": 48.1, "lng": -88.8 } } }
            ]
        });
        fetcher.respond(ENDPOINT, Some(&search.search_params(center)), body.to_string());

        let places = search
            .nearby_places("Isle Royale", "National Park", center)
            .await
            .unwrap();

        assert_eq!(
            places,
            vec![
                NearbyPlaceRecord::new("Rock Harbor Lodge", Some(Coordinate::new(48.14, -88.48))),
                NearbyPlaceRecord::new("Windigo", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_result_list() {
        let (search, fetcher) = search();
        let center = Coordinate::new(44.0, -85.0);
        fetcher.respond(
            ENDPOINT,
            Some(&search.search_params(center)),
            r#"{"status":"ZERO_RESULTS","results":[]}"#,
        );

        let places = search.nearby_places("Site A", "Park", center).await.unwrap();
        assert!(places.is_empty());
    }
}
