//! Data models for the contact directory.
//!
//! This module contains the contact document, its raw request shapes and the
//! validation/normalization rules applied on every write.

pub mod contact;

pub use contact::{
    capitalize, Address, AddressInput, Contact, ContactInput, ContactPatch, NewContact,
    DEFAULT_COUNTRY,
};
