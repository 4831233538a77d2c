use crate::domain::CacheNamespace;
use crate::ports::{CacheStore, Fetcher};
use crate::request::{CacheKey, Params};
use shared::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Cache-backed request layer.
///
/// Every call reloads the namespace from the store, so state written by one
/// call reaches the next only through the store. A miss fetches, inserts, and
/// persists the whole namespace again. Two processes sharing a namespace can
/// lose each other's entries (last writer wins); callers are expected to run
/// one process per cache directory.
#[derive(Clone)]
pub struct RequestCache {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
}

impl RequestCache {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Return the cached body for `endpoint` + `params`, fetching and
    /// persisting it on a miss. Network errors propagate; nothing is cached
    /// for a failed request.
    pub async fn fetch_cached(
        &self,
        namespace: CacheNamespace,
        endpoint: &str,
        params: Option<&Params>,
    ) -> Result<String> {
        let key = CacheKey::new(endpoint, params);
        let mut entries = self.store.load(namespace).await;

        if let Some(body) = entries.get(key.as_str()) {
            debug!("Cache hit in '{}' for {}", namespace, endpoint);
            return Ok(body.clone());
        }

        debug!("Cache miss in '{}' for {}, fetching", namespace, endpoint);
        let body = self.fetcher.fetch(endpoint, params).await?;

        entries.insert(key.into_string(), body.clone());
        self.store.persist(namespace, &entries).await?;
        debug!(
            "Persisted '{}' with {} entr{}",
            namespace,
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" }
        );

        Ok(body)
    }
}

impl fmt::Debug for RequestCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCache")
            .field("store", &"<dyn CacheStore>")
            .field("fetcher", &"<dyn Fetcher>")
            .finish()
    }
}
