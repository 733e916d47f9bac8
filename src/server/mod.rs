//! HTTP server for the contacts API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/` | Service banner |
//! | `GET`    | `/api/contacts` | List, filter and paginate |
//! | `POST`   | `/api/contacts` | Create |
//! | `GET`    | `/api/contacts/search/{term}` | Free-text search |
//! | `GET`    | `/api/contacts/{id}` | Fetch one |
//! | `PUT`    | `/api/contacts/{id}` | Partial update |
//! | `DELETE` | `/api/contacts/{id}` | Soft delete |
//!
//! Unmatched paths, and known paths with an unsupported method, answer 404
//! with the error envelope.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

pub mod handlers;
pub mod response;

pub use response::{ApiError, Envelope, Operation};

use crate::config::{Config, Environment};
use crate::error::ContactError;
use crate::services::ContactService;
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>, environment: Environment) -> Self {
        Self {
            service,
            environment,
        }
    }

    fn api_error(&self, err: ContactError, operation: Operation) -> ApiError {
        ApiError::from_contact_error(err, operation, self.environment)
    }
}

/// Assemble routes, middleware and fallback.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::api_info))
        .route(
            "/api/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/contacts/search/{term}",
            get(handlers::search_contacts),
        )
        .route(
            "/api/contacts/{id}",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API until Ctrl-C or SIGTERM.
pub async fn run_server(config: &Config, service: Arc<dyn ContactService>) -> Result<()> {
    let app = build_router(AppState::new(service, config.environment));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Contact Book API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
