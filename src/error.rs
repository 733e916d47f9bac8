//! Error types for the Contact Book API.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Each layer has a closed set of variants: the store reports `StoreError`, the
//! service translates it into `ContactError`, and the HTTP layer maps that to a
//! status code. Nothing downstream inspects error text.

use crate::domain::ValidationError;
use std::fmt;
use thiserror::Error;

/// Every field failure found while validating one contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable message per failing field, in field order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors reported by the document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A write would violate a unique index
    #[error("Duplicate value for unique field {field}: {value}")]
    DuplicateKey { field: &'static str, value: String },

    /// The addressed document does not exist or is not writable
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The store cannot serve requests (closed, disconnected)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Stored state is internally inconsistent
    #[error("Store state corrupted: {0}")]
    Corrupted(String),
}

/// Errors produced by contact operations.
#[derive(Error, Debug)]
pub enum ContactError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The supplied identifier is not a valid contact id
    #[error("Invalid contact ID format: {0}")]
    MalformedId(String),

    /// Another active contact already uses this email
    #[error("Contact with email {0} already exists")]
    DuplicateEmail(String),

    /// The contact does not exist or has been deleted
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// Unclassified persistence failure
    #[error("Store failure: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ContactError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey {
                field: "email",
                value,
            } => ContactError::DuplicateEmail(value),
            StoreError::NotFound(id) => ContactError::NotFound(id),
            other => ContactError::Store(other),
        }
    }
}

impl From<ValidationErrors> for ContactError {
    fn from(errors: ValidationErrors) -> Self {
        ContactError::Validation(errors)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
