use crate::domain::response::SearchResponse;
use crate::domain::{CacheNamespace, Coordinate, GeoResolution};
use crate::request::{Params, RequestCache};
use shared::Result;
use tracing::debug;

/// Resolves a place name + category to a coordinate through the text-search
/// endpoint. Nothing is memoized here; repeated lookups are answered by the
/// request cache.
#[derive(Clone, Debug)]
pub struct GeocodeResolver {
    requests: RequestCache,
    endpoint: String,
    api_key: String,
}

impl GeocodeResolver {
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

    /// Search for `name`; if that finds nothing, search once more with all
    /// whitespace removed from the name.
    pub async fn resolve(&self, name: &str, category: &str) -> Result<GeoResolution> {
        if let Some(coordinate) = self.search(name, category).await? {
            return Ok(GeoResolution::Resolved(coordinate));
        }

        let collapsed = collapse_whitespace(name);
        debug!("No match for '{}', retrying as '{}'", name, collapsed);

        let resolution = GeoResolution::from(self.search(&collapsed, category).await?);
        if !resolution.is_resolved() {
            debug!("'{}' ({}) could not be placed", name, category);
        }
        Ok(resolution)
    }

    pub fn search_params(&self, query: &str, category: &str) -> Params {
        Params::new()
            .with("query", query)
            .with("type", category)
            .with("key", &self.api_key)
    }

    async fn search(&self, query: &str, category: &str) -> Result<Option<Coordinate>> {
        let params = self.search_params(query, category);
        let body = self
            .requests
            .fetch_cached(CacheNamespace::Geocode, &self.endpoint, Some(&params))
            .await?;

        Ok(SearchResponse::parse(&body)?.first_coordinate())
    }
}

/// "Sleeping Bear Dunes" -> "SleepingBearDunes"
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect()
}
