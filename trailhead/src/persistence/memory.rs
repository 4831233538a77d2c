use crate::domain::CacheNamespace;
use crate::ports::{CacheEntries, CacheStore};
use async_trait::async_trait;
use shared::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory `CacheStore`. Nothing survives the process; useful for dry runs
/// and as a fake in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: RwLock<HashMap<CacheNamespace, CacheEntries>>,
    persists: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry directly, bypassing the request layer.
    pub async fn seed(
        &self,
        namespace: CacheNamespace,
        key: impl Into<String>,
        body: impl Into<String>,
    ) {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(namespace)
            .or_default()
            .insert(key.into(), body.into());
    }

    pub async fn snapshot(&self, namespace: CacheNamespace) -> CacheEntries {
        self.load(namespace).await
    }

    /// Number of successful `persist` calls so far.
    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn load(&self, namespace: CacheNamespace) -> CacheEntries {
        let namespaces = self.namespaces.read().await;
        namespaces.get(&namespace).cloned().unwrap_or_default()
    }

    async fn persist(&self, namespace: CacheNamespace, entries: &CacheEntries) -> Result<()> {
        let mut namespaces = self.namespaces.write().await;
        namespaces.insert(namespace, entries.clone());
        self.persists.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
