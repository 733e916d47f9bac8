//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! the query builder, the contact model and the repository. They provide a
//! clean boundary between the HTTP handlers and the data access layer.

mod contact_service;

pub use contact_service::{ContactPage, ContactService, ContactServiceImpl};
