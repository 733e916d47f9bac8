//! Contact Book API - Main entry point

use anyhow::Result;
use contact_book_api::repositories::{ContactRepository, InMemoryContactRepository};
use contact_book_api::services::{ContactService, ContactServiceImpl};
use contact_book_api::{seed, server, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting Contact Book API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // The store handle lives for the whole run and is closed on exit
    let repo = Arc::new(InMemoryContactRepository::new()) as Arc<dyn ContactRepository>;
    let service = Arc::new(ContactServiceImpl::new(repo.clone())) as Arc<dyn ContactService>;

    if config.seed_sample_data {
        match seed::seed_repository(service.as_ref()).await {
            Ok(created) => info!("Seeded {} sample contacts", created),
            Err(e) => error!("Failed to seed sample contacts: {}", e),
        }
    }

    let result = server::run_server(&config, service).await;

    repo.close().await;
    info!("Contact store closed");

    if let Err(ref e) = result {
        error!("Server error: {:#}", e);
    }
    result
}
