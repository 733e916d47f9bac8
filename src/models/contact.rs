//! Contact model and its validation/normalization rules.
//!
//! Three shapes of a contact exist:
//!
//! - [`ContactInput`]: raw, untrusted fields as received in a request body
//! - [`NewContact`]: validated and normalized fields, ready to persist
//! - [`Contact`]: a stored document with identity, status and timestamps
//!
//! [`ContactPatch`] carries a partial update and is merged onto the
//! [`ContactInput`] view of an existing contact before re-validation.

use crate::domain::{ContactId, EmailAddress, Field, PhoneNumber, ValidationError};
use crate::error::ValidationErrors;
use crate::query::ContactFilter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Country applied when an address is given without one.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Postal address as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Normalized postal address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub country: String,
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: Some(address.country.clone()),
        }
    }
}

/// Raw contact fields from a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ContactInput {
    /// Validate every field and produce the normalized contact.
    ///
    /// All failing fields are reported together, in field order.
    pub fn validate(&self) -> Result<NewContact, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = required_name(self.first_name.as_deref(), Field::FirstName, &mut errors);
        let last_name = required_name(self.last_name.as_deref(), Field::LastName, &mut errors);

        let email = match non_blank(self.email.as_deref()) {
            Some(raw) => EmailAddress::new(raw).map_err(|e| errors.push(e)).ok(),
            None => {
                errors.push(ValidationError::Required(Field::Email));
                None
            }
        };

        let phone = match non_blank(self.phone.as_deref()) {
            Some(raw) => PhoneNumber::new(raw).map_err(|e| errors.push(e)).ok(),
            None => {
                errors.push(ValidationError::Required(Field::Phone));
                None
            }
        };

        let address = self
            .address
            .as_ref()
            .map(|address| normalize_address(address, &mut errors));

        let company = optional_text(self.company.as_deref(), Field::Company, &mut errors);
        let job_title = optional_text(self.job_title.as_deref(), Field::JobTitle, &mut errors);
        let notes = optional_text(self.notes.as_deref(), Field::Notes, &mut errors);

        let tags = self
            .tags
            .as_deref()
            .map(normalize_tags)
            .unwrap_or_default();

        match (first_name, last_name, email, phone) {
            (Some(first_name), Some(last_name), Some(email), Some(phone)) if errors.is_empty() => {
                Ok(NewContact {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                    company,
                    job_title,
                    notes,
                    tags,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Deserialize a present field as `Some`, so `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update of a contact.
///
/// Each field is absent (keep), `null` (clear) or a value (replace).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    #[serde(deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub address: Option<Option<AddressInput>>,
    #[serde(deserialize_with = "present")]
    pub company: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub job_title: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub notes: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub tags: Option<Option<Vec<String>>>,
}

impl ContactPatch {
    /// Overlay this patch on `base`.
    pub fn apply(self, mut base: ContactInput) -> ContactInput {
        fn overlay<T>(target: &mut Option<T>, change: Option<Option<T>>) {
            if let Some(value) = change {
                *target = value;
            }
        }

        overlay(&mut base.first_name, self.first_name);
        overlay(&mut base.last_name, self.last_name);
        overlay(&mut base.email, self.email);
        overlay(&mut base.phone, self.phone);
        overlay(&mut base.address, self.address);
        overlay(&mut base.company, self.company);
        overlay(&mut base.job_title, self.job_title);
        overlay(&mut base.notes, self.notes);
        overlay(&mut base.tags, self.tags);
        base
    }
}

/// A validated, normalized contact that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub address: Option<Address>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// A stored contact document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Materialize a stored document from validated fields.
    pub fn from_new(id: ContactId, fields: NewContact, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
            company: fields.company,
            job_title: fields.job_title,
            notes: fields.notes,
            tags: fields.tags,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields, keeping identity, status and creation time.
    pub fn apply(&mut self, fields: NewContact, now: DateTime<Utc>) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.address = fields.address;
        self.company = fields.company;
        self.job_title = fields.job_title;
        self.notes = fields.notes;
        self.tags = fields.tags;
        self.updated_at = now;
    }

    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Filter matching active contacts carrying `tag`.
    pub fn find_by_tag(tag: &str) -> ContactFilter {
        ContactFilter::active().with_tag(tag)
    }

    /// The raw-input view of this contact, used as the base of a patch.
    pub fn to_input(&self) -> ContactInput {
        ContactInput {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.to_string()),
            phone: Some(self.phone.to_string()),
            address: self.address.as_ref().map(AddressInput::from),
            company: self.company.clone(),
            job_title: self.job_title.clone(),
            notes: self.notes.clone(),
            tags: Some(self.tags.clone()),
        }
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_length(value: &str, field: Field, errors: &mut ValidationErrors) -> bool {
    match field.max_len() {
        Some(max) if value.chars().count() > max => {
            errors.push(ValidationError::TooLong { field, max });
            false
        }
        _ => true,
    }
}

fn required_name(
    value: Option<&str>,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(name) = non_blank(value) else {
        errors.push(ValidationError::Required(field));
        return None;
    };
    check_length(name, field, errors).then(|| capitalize(name))
}

// Blank optional text is stored as absent.
fn optional_text(
    value: Option<&str>,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let text = non_blank(value)?;
    check_length(text, field, errors).then(|| text.to_string())
}

fn normalize_address(address: &AddressInput, errors: &mut ValidationErrors) -> Address {
    Address {
        street: optional_text(address.street.as_deref(), Field::Street, errors),
        city: optional_text(address.city.as_deref(), Field::City, errors),
        state: optional_text(address.state.as_deref(), Field::State, errors),
        zip_code: optional_text(address.zip_code.as_deref(), Field::ZipCode, errors),
        country: optional_text(address.country.as_deref(), Field::Country, errors)
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
    }
}

fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| tag.trim().to_lowercase()).collect()
}
