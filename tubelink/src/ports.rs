#![deny(clippy::all)]

use crate::domain::{CacheEntry, CacheKey, VideoHit};
use async_trait::async_trait;
use shared::Result;

// Ports are the seams between the lookup flow and its storage/search backends

/// Port for the persisted key -> result mapping
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Insert or overwrite, then persist the whole mapping.
    /// On `Err` the in-memory mapping still holds the new entry.
    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Port for the external video search collaborator
#[async_trait]
pub trait VideoSearch: Send + Sync + 'static {
    /// Search for `query` (plain text) and return the first video, if any
    async fn search(&self, query: &str) -> Result<Option<VideoHit>>;
}
