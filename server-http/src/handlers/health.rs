use axum::{extract::State, http::StatusCode, Json};

use crate::api::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    Ok(Json(HealthResponse {
        message: "OK".into(),
        cached_entries: state.lookup.cached_entries().await,
    }))
}
