//! Contacts API Server implementation
//!
//! HTTP REST API server using Axum. One `ContactService` sits behind a
//! mutex, so requests are applied one at a time.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::config::init_tracing;
use crate::service::ContactService;

/// Largest accepted upload for the import endpoint
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Default log filter while serving
pub const SERVER_LOG_FILTER: &str = "contacts_server=info,royalbit_contacts=info,tower_http=info";

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub service: Mutex<ContactService>,
}

impl AppState {
    pub fn new(service: ContactService) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: Mutex::new(service),
        }
    }
}

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Contact endpoints
        .route(
            "/api/v1/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/v1/contacts/:id",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route(
            "/api/v1/contacts/:id/favorite",
            post(handlers::toggle_favorite),
        )
        // Spreadsheet endpoints
        .route("/api/v1/export", get(handlers::export_workbook))
        .route("/api/v1/import", post(handlers::import_workbook))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig, service: ContactService) -> anyhow::Result<()> {
    init_tracing(SERVER_LOG_FILTER);

    let state = Arc::new(AppState::new(service));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📇 Contacts API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/contacts, /api/v1/export, /api/v1/import");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Contacts API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, stopping server...");
}
