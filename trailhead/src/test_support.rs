use crate::domain::PlaceRecord;
use crate::ports::{Fetcher, SiteSource};
use crate::request::{CacheKey, Params};
use async_trait::async_trait;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fetcher that answers from a script keyed by cache key and records every
/// request it receives.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, endpoint: &str, params: Option<&Params>, body: impl Into<String>) {
        let key = CacheKey::new(endpoint, params).into_string();
        self.responses.lock().unwrap().insert(key, body.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, endpoint: &str, params: Option<&Params>) -> Result<String> {
        let key = CacheKey::new(endpoint, params).into_string();
        self.calls.lock().unwrap().push(key.clone());
        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::Request(format!("unscripted request: {}", key)))
    }
}

/// Site source serving a fixed listing for every region.
pub struct StaticSites(pub Vec<PlaceRecord>);

#[async_trait]
impl SiteSource for StaticSites {
    async fn sites_for_region(&self, _region_code: &str) -> Result<Vec<PlaceRecord>> {
        Ok(self.0.clone())
    }
}

pub fn ok_body(lat: f64, lng: f64) -> String {
    serde_json::json!({
        "status": "OK",
        "results": [{ "name": "match", "geometry": { "location": { "lat": lat, "lng": lng } } }]
    })
    .to_string()
}

pub fn status_body(status: &str) -> String {
    serde_json::json!({ "status": status, "results": [] }).to_string()
}
