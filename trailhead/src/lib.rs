//! Place resolution core: a cache-backed request layer, geocoding with a
//! single fallback retry, a bounding-box plausibility filter, and nearby
//! place enrichment.

pub mod domain;
pub mod persistence;
pub mod ports;
pub mod request;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{
    CacheNamespace, Coordinate, GeoResolution, NearbyPlaceRecord, PlaceRecord, PostalAddress,
    RegionBounds,
};
pub use request::{CacheKey, Params, RequestCache};
pub use resolve::{GeocodeResolver, NearbySearch, RegionTable, SitePipeline, Vicinity};
