pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    gemini::{GeminiClient, GenerativeClient},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the application router. `route` is the path of the proxy endpoint.
pub fn router(state: AppState, route: &str, body_limit_bytes: usize) -> Router {
    Router::new()
        .route(
            route,
            post(handlers::generate).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the upstream client from configuration, or `None` when the API key
/// is missing. A missing key is reported per request rather than at startup.
pub fn build_state(config: &Config) -> Result<AppState> {
    let generator = match config.gemini.api_key() {
        Some(api_key) => {
            let client = GeminiClient::new(&config.gemini, api_key)?;
            Some(Arc::new(client) as Arc<dyn GenerativeClient>)
        }
        None => {
            error!(
                "CRITICAL: GOOGLE_AI_API_KEY environment variable not found on the server. \
                 Generation requests will fail until it is configured."
            );
            None
        }
    };

    Ok(AppState { generator })
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = build_state(&config)?;

    let app = router(
        app_state,
        &config.server.route,
        config.server.body_limit_bytes,
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (endpoint {}, upstream {})",
        addr, config.server.route, config.gemini.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
