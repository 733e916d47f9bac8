use async_trait::async_trait;
use chrono::Utc;
use contact_book_api::domain::{ContactId, EmailAddress};
use contact_book_api::error::{StoreError, StoreResult};
use contact_book_api::models::{Contact, NewContact};
use contact_book_api::query::ContactFilter;
use contact_book_api::repositories::{ContactRepository, FindOptions};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Stores contacts in a plain map without any unique index, tracks method
/// calls, and can be told to fail specific methods with a given `StoreError`.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<ContactId, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failures: Arc<Mutex<HashMap<String, StoreError>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `method` fail with `error`.
    pub fn fail_on(&self, method: &str, error: StoreError) {
        self.failures
            .lock()
            .unwrap()
            .insert(method.to_string(), error);
    }

    /// Make every method fail with `error`.
    pub fn fail_all(&self, error: StoreError) {
        for method in [
            "insert",
            "find_by_id",
            "find_active_by_email",
            "find",
            "count",
            "update",
            "deactivate",
        ] {
            self.fail_on(method, error.clone());
        }
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Number of stored contacts, active or not.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failures.lock().unwrap().get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn insert(&self, contact: NewContact) -> StoreResult<Contact> {
        self.track_call("insert")?;

        let contact = Contact::from_new(ContactId::generate(), contact, Utc::now());
        self.contacts
            .lock()
            .unwrap()
            .insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_id")?;
        Ok(self.contacts.lock().unwrap().get(id).cloned())
    }

    async fn find_active_by_email(&self, email: &EmailAddress) -> StoreResult<Option<Contact>> {
        self.track_call("find_active_by_email")?;
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .values()
            .find(|c| c.is_active && c.email == *email)
            .cloned())
    }

    async fn find(
        &self,
        filter: &ContactFilter,
        options: FindOptions,
    ) -> StoreResult<Vec<Contact>> {
        self.track_call("find")?;

        let contacts = self.contacts.lock().unwrap();
        let mut matches: Vec<&Contact> = contacts.values().filter(|c| filter.matches(c)).collect();
        matches.sort_by(|a, b| options.sort.compare((*a, 0), (*b, 0)));
        Ok(matches
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ContactFilter) -> StoreResult<usize> {
        self.track_call("count")?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().filter(|c| filter.matches(c)).count())
    }

    async fn update(&self, id: &ContactId, fields: NewContact) -> StoreResult<Contact> {
        self.track_call("update")?;

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .get_mut(id)
            .filter(|c| c.is_active)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        contact.apply(fields, Utc::now());
        Ok(contact.clone())
    }

    async fn deactivate(&self, id: &ContactId) -> StoreResult<()> {
        self.track_call("deactivate")?;

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .get_mut(id)
            .filter(|c| c.is_active)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        contact.is_active = false;
        Ok(())
    }

    async fn close(&self) {
        self.track_call("close").ok();
    }
}
