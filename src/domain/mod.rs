//! Domain value objects and types.
//!
//! Type-safe wrappers for contact identifiers, email addresses and phone
//! numbers. Each value object normalizes and validates its input at
//! construction, so an invalid value cannot be represented.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::{Field, ValidationError};
pub use phone::PhoneNumber;
