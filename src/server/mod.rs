use crate::config::Config;
use crate::store::BlobStore;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Router,
};
use std::net::SocketAddr;
use stockpile_db::pool::DbPool;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes_inventory;
pub mod routes_photo;

use error::ApiError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool, injected into every handler.
    pub db_pool: DbPool,
    /// Filesystem-backed photo store.
    pub blobs: BlobStore,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes_inventory::inventory_routes())
        .merge(routes_photo::photo_routes())
        .fallback(endpoint_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Handler for verbs the resource paths do not support.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn endpoint_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 - Endpoint Not Found")
}

/// Start the HTTP server
pub async fn start_server(config: Config, db_pool: DbPool) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let blobs = BlobStore::new(&config.server.cache_dir)
        .context("Failed to create photo cache directory")?;

    let ctx = AppContext { db_pool, blobs };
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);
    tracing::info!(
        "Photo cache directory: {}",
        config.server.cache_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
