//! YouTube Data API search client
//!
//! Issues one `search.list` request per lookup, restricted to videos and
//! limited to a single result.

use super::dto;
use crate::domain::VideoHit;
use crate::ports::VideoSearch;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use shared::{Error, Result};
use std::time::Duration;

pub struct YouTubeClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?part=snippet&type=video&maxResults=1&q={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str) -> Result<Option<VideoHit>> {
        let response = self
            .http_client
            .get(self.search_url(query))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        parse_search_body(status, &body)
    }
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Flatten a reqwest error and its causes, leaving out the URL (it carries the API key)
fn transport_error(err: reqwest::Error) -> Error {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    Error::Transport(message)
}

/// Interpret a search response body.
///
/// Any top-level `error` key wins over the status code; a non-success status
/// without one is still an upstream error.
fn parse_search_body(status: StatusCode, body: &str) -> Result<Option<VideoHit>> {
    let value = serde_json::from_str::<Value>(body);

    if let Some(error) = value.as_ref().ok().and_then(|v| v.get("error")) {
        let message = serde_json::from_value::<dto::ErrorBody>(error.clone())
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("Search request failed with HTTP {}", status.as_u16()));
        return Err(Error::Upstream(message));
    }

    if !status.is_success() {
        return Err(Error::Upstream(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    let response: dto::SearchResponse = value
        .and_then(serde_json::from_value)
        .map_err(|e| Error::Decode(e.to_string()))?;

    Ok(response.items.into_iter().next().map(|item| VideoHit {
        video_id: item.id.video_id,
        thumbnail: item.snippet.thumbnails.default.url,
    }))
}
