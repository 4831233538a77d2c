#![deny(clippy::all)]

use crate::domain::{CacheNamespace, PlaceRecord};
use crate::request::Params;
use async_trait::async_trait;
use shared::Result;
use std::collections::BTreeMap;

// Ports are the pluggable edges of the resolution core: where cached bodies
// live, how requests reach the network, and where place listings come from.

/// Cache key -> raw response body, for one namespace.
pub type CacheEntries = BTreeMap<String, String>;

/// Port for the persisted request cache
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Load the whole mapping for a namespace.
    /// Missing or unreadable data yields an empty mapping, never an error.
    async fn load(&self, namespace: CacheNamespace) -> CacheEntries;

    /// Replace the persisted mapping for a namespace with `entries`.
    async fn persist(&self, namespace: CacheNamespace, entries: &CacheEntries) -> Result<()>;
}

/// Port for outbound GET requests
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Perform the request and return the raw response body.
    async fn fetch(&self, endpoint: &str, params: Option<&Params>) -> Result<String>;
}

/// Port for the listing collaborator that hands place records to the pipeline
#[async_trait]
pub trait SiteSource: Send + Sync + 'static {
    async fn sites_for_region(&self, region_code: &str) -> Result<Vec<PlaceRecord>>;
}
