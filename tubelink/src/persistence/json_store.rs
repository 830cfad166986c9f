use crate::domain::{CacheEntry, CacheKey};
use crate::ports::CacheStore;
use async_trait::async_trait;
use shared::{Error, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

type Entries = HashMap<CacheKey, CacheEntry>;

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// JSON-file-backed cache of lookup results.
///
/// The whole mapping lives in memory and is rewritten to disk on every `put`.
/// Writers are serialized by the write lock, which is held until the file has
/// been replaced.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl JsonFileStore {
    /// Load the cache file at `path`, or start empty if it does not exist yet
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Entries>(&bytes).map_err(|e| {
                Error::CorruptCache(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => {
                return Err(Error::CorruptCache(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::debug!("Loaded {} cached entries from {}", entries.len(), path.display());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);

        let bytes = serde_json::to_vec(&*entries)
            .map_err(|e| Error::Persistence(format!("Failed to serialize cache: {}", e)))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| Error::Persistence(format!("Cache writer task failed: {}", e)))?
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}

/// Write `bytes` to a temp file next to `path`, then rename it into place
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Persistence(format!("Failed to create directory: {}", e)))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| Error::Persistence(format!("Failed to create temp file: {}", e)))?;

    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| Error::Persistence(format!("Failed to write cache: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        // Temp files are created 0600; keep the existing file's mode, or 0644 for a new one
        let mode = std::fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o7777)
            .unwrap_or(NEW_FILE_MODE);
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(mode))
            .map_err(|e| Error::Persistence(format!("Failed to set permissions: {}", e)))?;
    }

    file.persist(path)
        .map_err(|e| Error::Persistence(format!("Failed to replace {}: {}", path.display(), e)))?;

    Ok(())
}
