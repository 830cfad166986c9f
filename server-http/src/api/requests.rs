use serde::Deserialize;

/// Query string of `GET /api/youtube-link`
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}
