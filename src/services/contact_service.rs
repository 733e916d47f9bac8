//! Contact service layer.
//!
//! Business logic for listing, searching and mutating contacts.

use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactInput, ContactPatch};
use crate::query::{build_list_query, build_search_query, ListParams, Pagination};
use crate::repositories::{ContactRepository, FindOptions};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// One page of list results.
#[derive(Debug, Clone)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    /// Number of active contacts matching the filter, across all pages.
    pub total: usize,
    pub pagination: Pagination,
}

impl ContactPage {
    pub fn pages(&self) -> usize {
        self.pagination.pages(self.total)
    }
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// List active contacts with optional search/tag filters and pagination.
    async fn list_contacts(&self, params: &ListParams) -> ContactResult<ContactPage>;

    /// Get one active contact.
    async fn get_contact(&self, id: &str) -> ContactResult<Contact>;

    /// Validate and store a new contact.
    async fn create_contact(&self, input: ContactInput) -> ContactResult<Contact>;

    /// Apply a partial update to an active contact.
    async fn update_contact(&self, id: &str, patch: ContactPatch) -> ContactResult<Contact>;

    /// Soft-delete an active contact.
    async fn delete_contact(&self, id: &str) -> ContactResult<()>;

    /// Free-text search over names, email and company.
    async fn search_contacts(&self, term: &str) -> ContactResult<Vec<Contact>>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repo: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    /// Create a new contact service over `repo`.
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    fn parse_id(id: &str) -> ContactResult<ContactId> {
        ContactId::parse(id).map_err(|_| ContactError::MalformedId(id.to_string()))
    }

    /// Resolve an id to an active contact.
    async fn load_active(&self, id: &ContactId) -> ContactResult<Contact> {
        match self.repo.find_by_id(id).await? {
            Some(contact) if contact.is_active => Ok(contact),
            _ => Err(ContactError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self, params: &ListParams) -> ContactResult<ContactPage> {
        let query = build_list_query(params);
        debug!(?query, "listing contacts");

        let options = FindOptions {
            sort: query.sort,
            skip: query.pagination.skip(),
            limit: Some(query.pagination.limit),
        };
        let (total, contacts) = tokio::try_join!(
            self.repo.count(&query.filter),
            self.repo.find(&query.filter, options)
        )?;

        Ok(ContactPage {
            contacts,
            total,
            pagination: query.pagination,
        })
    }

    async fn get_contact(&self, id: &str) -> ContactResult<Contact> {
        let id = Self::parse_id(id)?;
        self.load_active(&id).await
    }

    async fn create_contact(&self, input: ContactInput) -> ContactResult<Contact> {
        let fields = input.validate()?;

        if self.repo.find_active_by_email(&fields.email).await?.is_some() {
            return Err(ContactError::DuplicateEmail(fields.email.into_inner()));
        }

        // The store re-checks uniqueness atomically with the insert.
        let contact = self.repo.insert(fields).await?;
        info!(id = %contact.id, "created contact {}", contact.full_name());
        Ok(contact)
    }

    async fn update_contact(&self, id: &str, patch: ContactPatch) -> ContactResult<Contact> {
        let id = Self::parse_id(id)?;
        let existing = self.load_active(&id).await?;

        let fields = patch.apply(existing.to_input()).validate()?;

        if fields.email != existing.email {
            if let Some(holder) = self.repo.find_active_by_email(&fields.email).await? {
                if holder.id != id {
                    return Err(ContactError::DuplicateEmail(fields.email.into_inner()));
                }
            }
        }

        let contact = self.repo.update(&id, fields).await?;
        info!(id = %contact.id, "updated contact");
        Ok(contact)
    }

    async fn delete_contact(&self, id: &str) -> ContactResult<()> {
        let id = Self::parse_id(id)?;
        self.load_active(&id).await?;
        self.repo.deactivate(&id).await?;
        info!(%id, "soft-deleted contact");
        Ok(())
    }

    async fn search_contacts(&self, term: &str) -> ContactResult<Vec<Contact>> {
        let (filter, sort) = build_search_query(term);
        debug!(?filter, "searching contacts");

        let contacts = self
            .repo
            .find(
                &filter,
                FindOptions {
                    sort,
                    skip: 0,
                    limit: None,
                },
            )
            .await?;
        Ok(contacts)
    }
}
