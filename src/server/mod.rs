//! HTTP surface of the catalog.
//!
//! Two read-only endpoints:
//! - `GET /api/companies` returns `{"companies": [...]}`
//! - `GET /api/questions?company=<name>&timeframe=<keyword>` returns the sheet rows
//!
//! Failures are JSON objects with an `error` field and a 400, 404 or 500 status.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

pub use error::ApiError;
pub use routes::{companies_handler, questions_handler, CompaniesResponse};
pub use state::AppState;

pub fn router(state: Arc<AppState>, cors_max_age: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(cors_max_age);

    Router::new()
        .route("/api/companies", get(companies_handler))
        .route("/api/questions", get(questions_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<()> {
    info!("Serving sheets from {}", config.server.data_root.display());
    if !config.server.data_root.is_dir() {
        tracing::warn!(
            "Data root {} does not exist yet; /api/companies will fail until it does",
            config.server.data_root.display()
        );
    }

    let state = AppState::from_config(&config);
    let app = router(state, Duration::from_secs(config.server.cors_max_age_secs));

    let address = &config.server.bind;
    info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Io)?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
