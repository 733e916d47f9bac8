//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned identifier of a contact document.
///
/// Identifiers are UUIDs; anything that does not parse as one is a
/// malformed identifier rather than an unknown one.
///
/// # Example
///
/// ```
/// use contact_book_api::domain::ContactId;
///
/// let id = ContactId::generate();
/// let parsed = ContactId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// assert!(ContactId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedId` if the input is not a UUID.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(id.trim())
            .map(Self)
            .map_err(|_| ValidationError::MalformedId(id.to_string()))
    }
}

impl FromStr for ContactId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serde support - serialize as hyphenated string
impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContactId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
