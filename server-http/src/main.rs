use axum::{extract::Request, ServiceExt};
use server_http::{build_router, routes::LOOKUP_PATH, AppState};
use shared::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tubelink::{CacheStore, JsonFileStore, LookupService, YouTubeClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so RUST_LOG from it is honoured
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Tubelink HTTP Server...");

    match dotenv {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    // Load configuration from environment variables
    let config = Config::from_env();

    let store = match JsonFileStore::load(&config.cache_file) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Refusing to start: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Loaded {} cached lookups from {}",
        store.len().await,
        store.path().display()
    );

    let search = Arc::new(YouTubeClient::new(
        config.search_base_url.clone(),
        config.youtube_api_key.clone(),
        config.search_timeout,
    )?);

    let state = AppState::new(LookupService::new(store, search));

    // Build router
    let router = build_router(state, &config);

    // Start server
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;

    info!("HTTP Server listening on http://{}", address);
    info!(
        "Try: curl 'http://{}{}?track=Hey%20Jude&artist=The%20Beatles'",
        address, LOOKUP_PATH
    );

    // Graceful shutdown handler
    axum::serve(listener, ServiceExt::<Request>::into_make_service(router))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
