//! Contact Book API - a JSON-over-HTTP service for managing a contact directory.
//!
//! Contacts can be created, fetched, partially updated, soft-deleted, listed
//! with search/tag filters and pagination, and searched by free text.
//!
//! # Architecture
//!
//! - **domain**: Value objects (`ContactId`, `EmailAddress`, `PhoneNumber`) and field errors
//! - **models**: The contact document and its validation/normalization rules
//! - **query**: Query-string parameters to store filters, ordering and pagination
//! - **repositories**: The document store trait and its in-memory implementation
//! - **services**: Business operations over contacts
//! - **server**: Axum routes, response envelope and error mapping
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **seed**: Bundled sample contacts

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use error::{ConfigError, ContactError, StoreError, ValidationErrors};
pub use models::{Contact, ContactInput, ContactPatch};
pub use repositories::{ContactRepository, InMemoryContactRepository};
pub use server::{build_router, AppState};
pub use services::{ContactService, ContactServiceImpl};
