use async_trait::async_trait;
use shared::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use trailhead::CacheNamespace;
use trailhead::ports::{CacheEntries, CacheStore};

/// File-backed cache: one JSON object per namespace, mapping cache keys to
/// the raw response bodies exactly as received.
///
/// Each persist rewrites the whole file. There is no locking, so two
/// processes writing the same namespace can drop each other's entries.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, namespace: CacheNamespace) -> PathBuf {
        self.dir.join(namespace.file_name())
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn load(&self, namespace: CacheNamespace) -> CacheEntries {
        let path = self.path_for(namespace);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache file at {}, starting empty", path.display());
                return CacheEntries::new();
            }
            Err(e) => {
                warn!("Failed to read cache file {}: {}", path.display(), e);
                return CacheEntries::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Cache file {} is not a valid cache ({}), starting empty",
                    path.display(),
                    e
                );
                CacheEntries::new()
            }
        }
    }

    async fn persist(&self, namespace: CacheNamespace, entries: &CacheEntries) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Persistence(format!(
                "Failed to create cache directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::Persistence(format!("Failed to serialize cache: {}", e)))?;

        let path = self.path_for(namespace);
        tokio::fs::write(&path, json).await.map_err(|e| {
            Error::Persistence(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}
