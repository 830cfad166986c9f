use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub youtube_api_key: String,
    pub search_base_url: String,
    pub search_timeout: Duration,
    pub cache_file: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 5000;
    const DEFAULT_CACHE_FILE: &str = "youtube_cache.json";
    const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
    const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let youtube_api_key = var("YOUTUBE_API_KEY").unwrap_or_else(|| {
            warn!("YOUTUBE_API_KEY not set, every search request will be rejected upstream");
            String::new()
        });

        Self {
            host: var("TUBELINK_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: var("TUBELINK_HTTP_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(Self::DEFAULT_HTTP_PORT),
            youtube_api_key,
            search_base_url: var("TUBELINK_SEARCH_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_SEARCH_BASE_URL.to_string()),
            search_timeout: Duration::from_secs(
                var("TUBELINK_SEARCH_TIMEOUT_SECS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(Self::DEFAULT_SEARCH_TIMEOUT_SECS),
            ),
            cache_file: var("TUBELINK_CACHE_FILE")
                .unwrap_or_else(|| Self::DEFAULT_CACHE_FILE.to_string()),
            allowed_origins: var("TUBELINK_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// True when any origin may call the service
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}
