use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shapes of the place-search endpoints (text search and nearby search
/// share the same envelope).
pub mod response {
    use super::Coordinate;
    use serde::Deserialize;
    use shared::{Error, Result};

    pub const STATUS_OK: &str = "OK";

    #[derive(Clone, Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub status: String,
        #[serde(default)]
        pub results: Vec<SearchResult>,
    }

    impl SearchResponse {
        /// Parse a raw response body, as stored in the request cache.
        pub fn parse(body: &str) -> Result<Self> {
            serde_json::from_str(body)
                .map_err(|e| Error::MalformedResponse(format!("search response: {}", e)))
        }

        pub fn is_ok(&self) -> bool {
            self.status == STATUS_OK
        }

        /// Coordinate of the first result, if the search succeeded and that
        /// result carries a location.
        pub fn first_coordinate(&self) -> Option<Coordinate> {
            if !self.is_ok() {
                return None;
            }
            self.results.first().and_then(SearchResult::coordinate)
        }
    }

    #[derive(Clone, Debug, Deserialize)]
    pub struct SearchResult {
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub geometry: Option<Geometry>,
    }

    impl SearchResult {
        pub fn coordinate(&self) -> Option<Coordinate> {
            let location = self.geometry.as_ref()?.location.as_ref()?;
            Some(Coordinate::new(location.lat, location.lng))
        }
    }

    #[derive(Clone, Debug, Deserialize)]
    pub struct Geometry {
        #[serde(default)]
        pub location: Option<LatLng>,
    }

    #[derive(Clone, Copy, Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Outcome of geocoding a place. `Unresolved` is a normal result, not an
/// error: the place simply cannot be put on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeoResolution {
    Resolved(Coordinate),
    Unresolved,
}

impl GeoResolution {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            GeoResolution::Resolved(coordinate) => Some(*coordinate),
            GeoResolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, GeoResolution::Resolved(_))
    }
}

impl From<Option<Coordinate>> for GeoResolution {
    fn from(value: Option<Coordinate>) -> Self {
        match value {
            Some(coordinate) => GeoResolution::Resolved(coordinate),
            None => GeoResolution::Unresolved,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

/// A named site as scraped from a listing page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: Option<String>,
    pub address: Option<PostalAddress>,
    /// Set on the copies the pipeline hands back; scraped records leave it empty.
    pub coordinate: Option<Coordinate>,
}

impl PlaceRecord {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_address(mut self, address: PostalAddress) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }
}

impl fmt::Display for PlaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => write!(f, "{} ({}): {}", self.name, self.category, address),
            None => write!(f, "{} ({})", self.name, self.category),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlaceRecord {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

impl NearbyPlaceRecord {
    pub fn new(name: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

impl fmt::Display for NearbyPlaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Rectangular lat/lon box approximating a region. Field names on disk follow
/// the `min_lng`/`max_lng` convention of the reference data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub name: String,
    pub min_lat: f64,
    pub max_lat: f64,
    #[serde(rename = "min_lng")]
    pub min_lon: f64,
    #[serde(rename = "max_lng")]
    pub max_lon: f64,
}

impl RegionBounds {
    /// Closed on every edge, no tolerance.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }
}

/// Each namespace is persisted to its own cache file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    SiteDetail,
    StateListing,
    Geocode,
    Nearby,
}

impl CacheNamespace {
    pub const ALL: [CacheNamespace; 4] = [
        CacheNamespace::SiteDetail,
        CacheNamespace::StateListing,
        CacheNamespace::Geocode,
        CacheNamespace::Nearby,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheNamespace::SiteDetail => "site-detail",
            CacheNamespace::StateListing => "state-listing",
            CacheNamespace::Geocode => "geocode",
            CacheNamespace::Nearby => "nearby",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            CacheNamespace::SiteDetail => "site_detail_cache.json",
            CacheNamespace::StateListing => "state_listing_cache.json",
            CacheNamespace::Geocode => "geocode_cache.json",
            CacheNamespace::Nearby => "nearby_cache.json",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
