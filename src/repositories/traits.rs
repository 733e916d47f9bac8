use crate::domain::{ContactId, EmailAddress};
use crate::error::StoreResult;
use crate::models::{Contact, NewContact};
use crate::query::{ContactFilter, SortOrder};
use async_trait::async_trait;

/// Sort and window applied to a `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindOptions {
    pub sort: SortOrder,
    pub skip: usize,
    /// `None` returns every match after `skip`.
    pub limit: Option<usize>,
}

/// Document store holding contacts.
///
/// Implementations own uniqueness: `insert` and `update` must fail with
/// `StoreError::DuplicateKey` when another active contact already holds the
/// email, even if the caller checked beforehand.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a new contact, assigning its id and timestamps.
    async fn insert(&self, contact: NewContact) -> StoreResult<Contact>;

    /// Fetch a contact by id, active or not.
    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>>;

    /// Fetch the active contact holding `email`, if any.
    async fn find_active_by_email(&self, email: &EmailAddress) -> StoreResult<Option<Contact>>;

    /// Contacts matching `filter`, sorted and windowed.
    async fn find(&self, filter: &ContactFilter, options: FindOptions)
        -> StoreResult<Vec<Contact>>;

    /// Number of contacts matching `filter`.
    async fn count(&self, filter: &ContactFilter) -> StoreResult<usize>;

    /// Replace the fields of an active contact.
    async fn update(&self, id: &ContactId, fields: NewContact) -> StoreResult<Contact>;

    /// Mark an active contact inactive.
    async fn deactivate(&self, id: &ContactId) -> StoreResult<()>;

    /// Release the store. Later calls fail with `StoreError::Unavailable`.
    async fn close(&self);
}
