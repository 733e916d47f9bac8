//! Domain validation errors.

use std::fmt;

/// A contact field that carries validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    State,
    ZipCode,
    Country,
    Company,
    JobTitle,
    Notes,
}

impl Field {
    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Street => "Street address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip code",
            Self::Country => "Country",
            Self::Company => "Company name",
            Self::JobTitle => "Job title",
            Self::Notes => "Notes",
        }
    }

    /// Maximum length in characters, if the field is bounded.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Self::FirstName | Self::LastName => Some(50),
            Self::Street => Some(100),
            Self::City | Self::State | Self::Country => Some(50),
            Self::ZipCode => Some(10),
            Self::Company | Self::JobTitle => Some(100),
            Self::Notes => Some(500),
            Self::Email | Self::Phone => None,
        }
    }
}

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier is not structurally valid for the store.
    MalformedId(String),

    /// A required field is missing or blank.
    Required(Field),

    /// A field exceeds its maximum length.
    TooLong { field: Field, max: usize },

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedId(id) => write!(f, "Invalid identifier: {}", id),
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::TooLong { field, max } => {
                write!(f, "{} cannot exceed {} characters", field.label(), max)
            }
            Self::InvalidEmail(_) => write!(f, "Please provide a valid email address"),
            Self::InvalidPhone(_) => write!(f, "Please provide a valid phone number"),
        }
    }
}

impl std::error::Error for ValidationError {}
