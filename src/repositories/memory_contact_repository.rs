use crate::domain::{ContactId, EmailAddress};
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, NewContact};
use crate::query::ContactFilter;
use crate::repositories::traits::{ContactRepository, FindOptions};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

struct StoredContact {
    /// Insertion sequence, used to order documents with equal timestamps.
    seq: u64,
    contact: Contact,
}

#[derive(Default)]
struct Collection {
    docs: HashMap<ContactId, StoredContact>,
    /// Unique index over the emails of active contacts.
    email_index: HashMap<String, ContactId>,
    /// Multi-value index over tags of every stored contact.
    tag_index: HashMap<String, HashSet<ContactId>>,
    next_seq: u64,
    closed: bool,
}

impl Collection {
    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Unavailable("contact store is closed".to_string()));
        }
        Ok(())
    }

    fn email_holder(&self, email: &EmailAddress) -> Option<ContactId> {
        self.email_index.get(email.as_str()).copied()
    }

    fn index_tags(&mut self, id: ContactId, tags: &[String]) {
        for tag in tags {
            self.tag_index.entry(tag.clone()).or_default().insert(id);
        }
    }

    fn unindex_tags(&mut self, id: &ContactId, tags: &[String]) {
        for tag in tags {
            if let Some(ids) = self.tag_index.get_mut(tag) {
                ids.remove(id);
                if ids.is_empty() {
                    self.tag_index.remove(tag);
                }
            }
        }
    }

    fn active_mut(&mut self, id: &ContactId) -> StoreResult<&mut StoredContact> {
        self.docs
            .get_mut(id)
            .filter(|stored| stored.contact.is_active)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn matching<'a>(
        &'a self,
        filter: &'a ContactFilter,
    ) -> Box<dyn Iterator<Item = &'a StoredContact> + 'a> {
        match filter.tag() {
            Some(tag) => Box::new(
                self.tag_index
                    .get(tag)
                    .into_iter()
                    .flatten()
                    .filter_map(move |id| self.docs.get(id))
                    .filter(move |stored| filter.matches(&stored.contact)),
            ),
            None => Box::new(
                self.docs
                    .values()
                    .filter(move |stored| filter.matches(&stored.contact)),
            ),
        }
    }
}

/// In-process document store for contacts.
///
/// Documents and indexes live behind a single `RwLock`; every write checks
/// and updates the email index while holding the write guard, so uniqueness
/// holds under concurrent requests.
pub struct InMemoryContactRepository {
    inner: RwLock<Collection>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collection::default()),
        }
    }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, contact: NewContact) -> StoreResult<Contact> {
        let mut coll = self.inner.write().await;
        coll.ensure_open()?;

        if coll.email_holder(&contact.email).is_some() {
            return Err(StoreError::DuplicateKey {
                field: "email",
                value: contact.email.into_inner(),
            });
        }

        let id = ContactId::generate();
        let contact = Contact::from_new(id, contact, Utc::now());
        let seq = coll.next_seq;
        coll.next_seq += 1;

        coll.email_index.insert(contact.email.to_string(), id);
        coll.index_tags(id, &contact.tags);
        coll.docs.insert(
            id,
            StoredContact {
                seq,
                contact: contact.clone(),
            },
        );

        debug!(%id, seq, "inserted contact document");
        Ok(contact)
    }

    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let coll = self.inner.read().await;
        coll.ensure_open()?;
        Ok(coll.docs.get(id).map(|stored| stored.contact.clone()))
    }

    async fn find_active_by_email(&self, email: &EmailAddress) -> StoreResult<Option<Contact>> {
        let coll = self.inner.read().await;
        coll.ensure_open()?;

        let Some(id) = coll.email_holder(email) else {
            return Ok(None);
        };
        match coll.docs.get(&id) {
            Some(stored) if stored.contact.is_active => Ok(Some(stored.contact.clone())),
            _ => Err(StoreError::Corrupted(format!(
                "email index entry {} points at missing or inactive contact {}",
                email, id
            ))),
        }
    }

    async fn find(
        &self,
        filter: &ContactFilter,
        options: FindOptions,
    ) -> StoreResult<Vec<Contact>> {
        let coll = self.inner.read().await;
        coll.ensure_open()?;

        let mut matches: Vec<&StoredContact> = coll.matching(filter).collect();
        matches.sort_by(|a, b| {
            options
                .sort
                .compare((&a.contact, a.seq), (&b.contact, b.seq))
        });

        let window = matches.into_iter().skip(options.skip);
        let contacts = match options.limit {
            Some(limit) => window.take(limit).map(|s| s.contact.clone()).collect(),
            None => window.map(|s| s.contact.clone()).collect(),
        };
        Ok(contacts)
    }

    async fn count(&self, filter: &ContactFilter) -> StoreResult<usize> {
        let coll = self.inner.read().await;
        coll.ensure_open()?;
        Ok(coll.matching(filter).count())
    }

    async fn update(&self, id: &ContactId, fields: NewContact) -> StoreResult<Contact> {
        let mut coll = self.inner.write().await;
        coll.ensure_open()?;

        let (old_email, old_tags) = {
            let stored = coll.active_mut(id)?;
            (stored.contact.email.clone(), stored.contact.tags.clone())
        };

        if let Some(holder) = coll.email_holder(&fields.email) {
            if holder != *id {
                return Err(StoreError::DuplicateKey {
                    field: "email",
                    value: fields.email.into_inner(),
                });
            }
        }

        coll.email_index.remove(old_email.as_str());
        coll.email_index.insert(fields.email.to_string(), *id);
        coll.unindex_tags(id, &old_tags);
        coll.index_tags(*id, &fields.tags);

        let stored = coll.active_mut(id)?;
        stored.contact.apply(fields, Utc::now());
        Ok(stored.contact.clone())
    }

    async fn deactivate(&self, id: &ContactId) -> StoreResult<()> {
        let mut coll = self.inner.write().await;
        coll.ensure_open()?;

        let stored = coll.active_mut(id)?;
        stored.contact.is_active = false;
        stored.contact.updated_at = Utc::now();
        let email = stored.contact.email.to_string();

        if coll.email_index.get(&email) == Some(id) {
            coll.email_index.remove(&email);
        }
        Ok(())
    }

    async fn close(&self) {
        let mut coll = self.inner.write().await;
        coll.closed = true;
        debug!(documents = coll.docs.len(), "contact store closed");
    }
}
