use crate::api::{ApiError, LookupParams};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use shared::Error;
use tracing::info;
use tubelink::{CacheEntry, LookupQuery};

/// GET /api/youtube-link?track=..&artist=..
pub async fn youtube_link(
    State(state): State<AppState>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<CacheEntry>, ApiError> {
    let Query(params) = params.map_err(|e| Error::InvalidRequest(e.body_text()))?;

    let query = LookupQuery::parse(params.track.as_deref(), params.artist.as_deref())?;
    info!("LOOKUP: track={}, artist={}", query.track(), query.artist());

    let entry = state.lookup.resolve(&query).await?;
    Ok(Json(entry))
}
