//! HTTP route handlers for the contacts API.
//!
//! Each handler extracts its inputs, calls the [`ContactService`] and shapes
//! the response envelope. Failures are mapped through
//! [`ApiError::from_contact_error`].
//!
//! [`ContactService`]: crate::services::ContactService

use super::response::{ApiError, Envelope, Operation};
use super::AppState;
use crate::models::{Contact, ContactInput, ContactPatch};
use crate::query::ListParams;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    Json,
};
use serde::Serialize;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    message: &'static str,
    version: &'static str,
    endpoints: ApiEndpoints,
}

#[derive(Debug, Serialize)]
struct ApiEndpoints {
    contacts: &'static str,
    docs: &'static str,
}

/// Handler for `GET /`.
pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Contact Book API is running!",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ApiEndpoints {
            contacts: "/api/contacts",
            docs: "Check README for API documentation",
        },
    })
}

/// Fallback for unmatched routes and unsupported methods.
pub async fn not_found(uri: Uri) -> ApiError {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    ApiError::not_found(format!("Not Found - {}", target))
}

/// Handler for `GET /api/contacts`.
pub async fn list_contacts(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Vec<Contact>> {
    // Repeated keys must not reject the request
    let Query(pairs) = pairs.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let params = ListParams::from_pairs(pairs);

    let page = state
        .service
        .list_contacts(&params)
        .await
        .map_err(|e| state.api_error(e, Operation::List))?;

    let pages = page.pages();
    Ok(Json(
        Envelope::ok(page.contacts)
            .with_count_of_data()
            .with_pagination(page.total, page.pagination.page, pages),
    ))
}

/// Handler for `GET /api/contacts/{id}`.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Contact> {
    let contact = state
        .service
        .get_contact(&id)
        .await
        .map_err(|e| state.api_error(e, Operation::Get))?;
    Ok(Json(Envelope::ok(contact)))
}

/// Handler for `POST /api/contacts`.
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Contact>>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let contact = state
        .service
        .create_contact(input)
        .await
        .map_err(|e| state.api_error(e, Operation::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(contact).with_message("Contact created successfully")),
    ))
}

/// Handler for `PUT /api/contacts/{id}`.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> ApiResult<Contact> {
    let Json(patch) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let contact = state
        .service
        .update_contact(&id, patch)
        .await
        .map_err(|e| state.api_error(e, Operation::Update))?;

    Ok(Json(
        Envelope::ok(contact).with_message("Contact updated successfully"),
    ))
}

/// Handler for `DELETE /api/contacts/{id}`.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state
        .service
        .delete_contact(&id)
        .await
        .map_err(|e| state.api_error(e, Operation::Delete))?;

    Ok(Json(Envelope::message_only("Contact deleted successfully")))
}

/// Handler for `GET /api/contacts/search/{term}`.
pub async fn search_contacts(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> ApiResult<Vec<Contact>> {
    let contacts = state
        .service
        .search_contacts(&term)
        .await
        .map_err(|e| state.api_error(e, Operation::Search))?;

    Ok(Json(Envelope::ok(contacts).with_count_of_data()))
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Set `count` to the number of items in `data`.
    fn with_count_of_data(self) -> Self {
        let count = self.data.as_ref().map_or(0, Vec::len);
        self.with_count(count)
    }
}
