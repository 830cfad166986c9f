use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::fmt;

const KEY_SEPARATOR: &str = "__";
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
pub const MISSING_PARAMS_MESSAGE: &str = "Missing track or artist";

/// Normalized `(track, artist)` identifier used to index cached lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(track: &str, artist: &str) -> Self {
        Self(format!("{}{}{}", track.trim(), KEY_SEPARATOR, artist.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a lookup, as returned to callers and stored on disk.
///
/// Serializes as `{"url": .., "thumbnail": ..}` with both fields null for
/// `NotFound`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EntryRepr", try_from = "EntryRepr")]
pub enum CacheEntry {
    Found { url: String, thumbnail: String },
    NotFound,
}

impl CacheEntry {
    /// Build the entry for a resolved search hit
    pub fn from_hit(hit: VideoHit) -> Self {
        CacheEntry::Found {
            url: format!("{}{}", WATCH_URL_PREFIX, hit.video_id),
            thumbnail: hit.thumbnail,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CacheEntry::Found { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct EntryRepr {
    url: Option<String>,
    thumbnail: Option<String>,
}

impl From<CacheEntry> for EntryRepr {
    fn from(entry: CacheEntry) -> Self {
        match entry {
            CacheEntry::Found { url, thumbnail } => EntryRepr {
                url: Some(url),
                thumbnail: Some(thumbnail),
            },
            CacheEntry::NotFound => EntryRepr {
                url: None,
                thumbnail: None,
            },
        }
    }
}

impl TryFrom<EntryRepr> for CacheEntry {
    type Error = String;

    fn try_from(repr: EntryRepr) -> std::result::Result<Self, Self::Error> {
        match (repr.url, repr.thumbnail) {
            (Some(url), Some(thumbnail)) => Ok(CacheEntry::Found { url, thumbnail }),
            (None, None) => Ok(CacheEntry::NotFound),
            _ => Err("url and thumbnail must be both set or both null".to_string()),
        }
    }
}

/// First video returned by the search collaborator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoHit {
    pub video_id: String,
    pub thumbnail: String,
}

/// Validated lookup input with surrounding whitespace removed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupQuery {
    track: String,
    artist: String,
}

impl LookupQuery {
    /// Fails with `InvalidRequest` when either field is absent or blank
    pub fn parse(track: Option<&str>, artist: Option<&str>) -> Result<Self> {
        let track = track.map(str::trim).unwrap_or_default();
        let artist = artist.map(str::trim).unwrap_or_default();

        if track.is_empty() || artist.is_empty() {
            return Err(Error::InvalidRequest(MISSING_PARAMS_MESSAGE.to_string()));
        }

        Ok(Self {
            track: track.to_string(),
            artist: artist.to_string(),
        })
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.track, &self.artist)
    }

    /// Plain-text search string, not yet percent-encoded
    pub fn search_text(&self) -> String {
        format!("{} {}", self.track, self.artist)
    }
}
