use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use shared::config::Config;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

pub const LOOKUP_PATH: &str = "/api/youtube-link";

/// Build and configure the application router.
///
/// Path normalization wraps the whole router so it runs before route matching.
/// Serve it with `ServiceExt::<Request>::into_make_service`.
pub fn build_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Lookup
        .route(LOOKUP_PATH, get(handlers::youtube_link))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid allowed origin '{}'", origin);
                        None
                    }
                }),
        )
    };

    CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(origin)
}
