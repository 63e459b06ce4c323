//! # formgate-server
//!
//! HTTP boundary of the FormGate intake endpoint.
//!
//! | method | path | operation |
//! |---|---|---|
//! | `POST` | `/api/submit` | validate, gate, and store one submission |
//! | `GET` | `/api/status` | current counter |
//! | `GET` | `/api/submissions` | every stored submission plus the counter |
//! | `POST` | `/api/reset` | zero the counter given `{"password": ...}` |
//! | `GET` | `/api/download` | the raw record table as an attachment |
//!
//! Configuration comes from the environment (`FORMGATE_DATA_DIR`,
//! `FORMGATE_PORT`); log filtering from `RUST_LOG`.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use formgate_types::{FormgateConfig, Result};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod error;
pub mod routes;
pub mod state;

use routes::{download_handler, reset_handler, status_handler, submissions_handler, submit_handler};
use state::State;

/// Build the API router over `state`.
pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/submit", post(submit_handler))
        .route("/api/status", get(status_handler))
        .route("/api/submissions", get(submissions_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/download", get(download_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<()> {
    // A subscriber may already be installed when embedded; keep it.
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    info!("Loading configuration...");
    let config = FormgateConfig::from_env()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    let address = state.config.listen_addr;
    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
