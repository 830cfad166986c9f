use crate::domain::{CacheEntry, LookupQuery};
use crate::ports::{CacheStore, VideoSearch};
use shared::Result;
use std::sync::Arc;

/// Resolves `(track, artist)` queries, using the cache as the fast path.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn CacheStore>,
    search: Arc<dyn VideoSearch>,
}

impl LookupService {
    pub fn new(store: Arc<dyn CacheStore>, search: Arc<dyn VideoSearch>) -> Self {
        Self { store, search }
    }

    /// Cache hits return without touching the collaborator. Only found videos
    /// are cached; a failed cache write is logged and the result still returned.
    pub async fn resolve(&self, query: &LookupQuery) -> Result<CacheEntry> {
        let key = query.cache_key();

        if let Some(entry) = self.store.get(&key).await {
            tracing::debug!("Cache hit for '{}'", key);
            return Ok(entry);
        }

        tracing::debug!("Cache miss for '{}', searching", key);

        let hit = match self.search.search(&query.search_text()).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("Search for '{}' failed: {}", key, e);
                return Err(e);
            }
        };

        let Some(hit) = hit else {
            tracing::info!("No video found for '{}'", key);
            return Ok(CacheEntry::NotFound);
        };

        let entry = CacheEntry::from_hit(hit);

        if let Err(e) = self.store.put(key.clone(), entry.clone()).await {
            tracing::warn!("Resolved '{}' but could not persist it: {}", key, e);
        }

        Ok(entry)
    }

    pub async fn cached_entries(&self) -> usize {
        self.store.len().await
    }
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService").finish_non_exhaustive()
    }
}
