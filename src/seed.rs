//! Sample contacts for local development.

use crate::error::{ContactError, ContactResult};
use crate::models::{AddressInput, ContactInput};
use crate::services::ContactService;
use tracing::{info, warn};

struct Sample {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    street: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    company: &'static str,
    job_title: &'static str,
    notes: &'static str,
    tags: [&'static str; 3],
}

const SAMPLES: [Sample; 5] = [
    Sample {
        first_name: "Alice",
        last_name: "Johnson",
        email: "alice.johnson@example.com",
        phone: "+1234567890",
        street: "123 Tech Street",
        city: "San Francisco",
        state: "CA",
        zip_code: "94105",
        company: "TechCorp",
        job_title: "Software Engineer",
        notes: "Full-stack developer specializing in React and Node.js",
        tags: ["work", "developer", "tech"],
    },
    Sample {
        first_name: "Bob",
        last_name: "Smith",
        email: "bob.smith@example.com",
        phone: "+1987654321",
        street: "456 Design Ave",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        company: "Creative Studio",
        job_title: "UI/UX Designer",
        notes: "Excellent eye for design and user experience",
        tags: ["work", "design", "creative"],
    },
    Sample {
        first_name: "Carol",
        last_name: "Davis",
        email: "carol.davis@example.com",
        phone: "+1555123456",
        street: "789 Business Blvd",
        city: "Chicago",
        state: "IL",
        zip_code: "60601",
        company: "Marketing Plus",
        job_title: "Marketing Manager",
        notes: "Great at digital marketing campaigns",
        tags: ["work", "marketing", "manager"],
    },
    Sample {
        first_name: "David",
        last_name: "Wilson",
        email: "david.wilson@example.com",
        phone: "+1777888999",
        street: "321 Friend Lane",
        city: "Austin",
        state: "TX",
        zip_code: "73301",
        company: "Freelancer",
        job_title: "Photographer",
        notes: "Amazing wedding and portrait photographer",
        tags: ["friend", "photographer", "creative"],
    },
    Sample {
        first_name: "Emma",
        last_name: "Brown",
        email: "emma.brown@example.com",
        phone: "+1666555444",
        street: "654 Family Road",
        city: "Seattle",
        state: "WA",
        zip_code: "98101",
        company: "Healthcare Corp",
        job_title: "Nurse",
        notes: "Family friend and healthcare professional",
        tags: ["family", "healthcare", "friend"],
    },
];

impl Sample {
    fn to_input(&self) -> ContactInput {
        ContactInput {
            first_name: Some(self.first_name.to_string()),
            last_name: Some(self.last_name.to_string()),
            email: Some(self.email.to_string()),
            phone: Some(self.phone.to_string()),
            address: Some(AddressInput {
                street: Some(self.street.to_string()),
                city: Some(self.city.to_string()),
                state: Some(self.state.to_string()),
                zip_code: Some(self.zip_code.to_string()),
                country: Some("USA".to_string()),
            }),
            company: Some(self.company.to_string()),
            job_title: Some(self.job_title.to_string()),
            notes: Some(self.notes.to_string()),
            tags: Some(self.tags.iter().map(|t| t.to_string()).collect()),
        }
    }
}

/// The bundled sample contacts, as create requests.
pub fn sample_contacts() -> Vec<ContactInput> {
    SAMPLES.iter().map(Sample::to_input).collect()
}

/// Create the sample contacts through `service`.
///
/// Contacts whose email is already taken are skipped. Returns how many were
/// created.
pub async fn seed_repository(service: &dyn ContactService) -> ContactResult<usize> {
    let mut created = 0;
    for input in sample_contacts() {
        match service.create_contact(input).await {
            Ok(contact) => {
                info!("Seeded {} - {}", contact.full_name(), contact.email);
                created += 1;
            }
            Err(ContactError::DuplicateEmail(email)) => {
                warn!("Skipping sample contact {}: email already exists", email);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}
