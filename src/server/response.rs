//! Response envelope and HTTP error mapping.
//!
//! Every route answers with the same JSON wrapper:
//!
//! ```json
//! { "success": false, "error": "Validation Error", "details": ["Email is required"] }
//! ```
//!
//! Absent fields are omitted from the body.

use crate::config::Environment;
use crate::error::ContactError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Uniform JSON wrapper for every response.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn empty(success: bool) -> Self {
        Self {
            success,
            data: None,
            error: None,
            message: None,
            count: None,
            total: None,
            page: None,
            pages: None,
            details: None,
            stack: None,
        }
    }

    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(true)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_pagination(mut self, total: usize, page: usize, pages: usize) -> Self {
        self.total = Some(total);
        self.page = Some(page);
        self.pages = Some(pages);
        self
    }
}

impl Envelope<()> {
    /// Successful response without data.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::empty(true).with_message(message)
    }
}

/// Route an error happened in. Picks the generic failure text and the
/// duplicate-email wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Search,
}

impl Operation {
    fn failure_message(&self) -> &'static str {
        match self {
            Self::List => "Server Error - Could not fetch contacts",
            Self::Get => "Server Error - Could not fetch contact",
            Self::Create => "Server Error - Could not create contact",
            Self::Update => "Server Error - Could not update contact",
            Self::Delete => "Server Error - Could not delete contact",
            Self::Search => "Server Error - Could not search contacts",
        }
    }

    fn duplicate_message(&self) -> &'static str {
        match self {
            Self::Update => "Another contact with this email already exists",
            _ => "Contact with this email already exists",
        }
    }
}

/// Error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<Vec<String>>,
    stack: Option<String>,
}

impl ApiError {
    /// Constructs a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            details: None,
            stack: None,
        }
    }

    /// Constructs a 404 Not Found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.into(),
            details: None,
            stack: None,
        }
    }

    /// Map a service error raised while handling `operation`.
    ///
    /// Store failures become a generic 500; the underlying error is only
    /// exposed (as `stack`) outside production.
    pub fn from_contact_error(err: ContactError, operation: Operation, env: Environment) -> Self {
        match err {
            ContactError::Validation(errors) => Self {
                details: Some(errors.messages()),
                ..Self::bad_request("Validation Error")
            },
            ContactError::MalformedId(_) => Self::bad_request("Invalid contact ID format"),
            ContactError::DuplicateEmail(_) => Self::bad_request(operation.duplicate_message()),
            ContactError::NotFound(_) => Self::not_found("Contact not found"),
            ContactError::Store(ref store_err) => {
                error!(?operation, error = %store_err, "store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: operation.failure_message().to_string(),
                    details: None,
                    stack: (!env.is_production()).then(|| format!("{:?}", err)),
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, error = %self.error, "request rejected");
        }
        let body = Envelope::<()> {
            error: Some(self.error),
            details: self.details,
            stack: self.stack,
            ..Envelope::empty(false)
        };
        (self.status, Json(body)).into_response()
    }
}
