mod memory_contact_repository;
mod traits;

pub use memory_contact_repository::InMemoryContactRepository;
pub use traits::{ContactRepository, FindOptions};
