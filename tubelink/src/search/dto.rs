//! YouTube Data API v3 search response shapes.
//!
//! Only the fields the lookup needs are modelled; serde ignores the rest.
//! API reference: https://developers.google.com/youtube/v3/docs/search/list

use serde::Deserialize;

/// Successful `search.list` body
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: ResourceId,
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub default: Thumbnail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Value of the top-level `error` key, e.g. quota exhaustion or a bad API key
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
}
