//! End-to-end tests for the contacts HTTP API.
//!
//! Every test drives the full router against the in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{app_with, contact_body, send};
use contact_book_api::domain::ContactId;
use contact_book_api::repositories::ContactRepository;
use contact_book_api::{Environment, InMemoryContactRepository};
use serde_json::json;
use std::sync::Arc;

fn app() -> (Router, Arc<InMemoryContactRepository>) {
    let repo = Arc::new(InMemoryContactRepository::new());
    (app_with(repo.clone(), Environment::Development), repo)
}

async fn create(app: &Router, first: &str, last: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/contacts",
        Some(contact_body(first, last, email)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["data"]["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({
            "firstName": "  aLiCe ",
            "lastName": "JOHNSON",
            "email": " Alice.Johnson@Example.COM ",
            "phone": " +1234567890 ",
            "address": { "city": "San Francisco" },
            "tags": ["Work", " TECH ", "work"],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact created successfully");

    let id = body["data"]["id"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["firstName"], "Alice");
    assert_eq!(data["lastName"], "Johnson");
    assert_eq!(data["email"], "alice.johnson@example.com");
    assert_eq!(data["phone"], "+1234567890");
    assert_eq!(data["tags"], json!(["work", "tech", "work"]));
    assert_eq!(data["address"]["country"], "USA");
    assert_eq!(data["isActive"], true);
    assert!(data["createdAt"].is_string());
    assert!(data["updatedAt"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_case_insensitively() {
    let (app, _) = app();
    create(&app, "Ann", "Lee", "a@x.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(contact_body("Other", "Person", "A@X.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Contact with this email already exists");
}

#[tokio::test]
async fn test_validation_reports_every_field() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({
            "lastName": "Lee",
            "email": "not-an-email",
            "phone": "+1234567890",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(
        body["details"],
        json!(["First name is required", "Please provide a valid email address"])
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "firstName": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_soft_delete_hides_but_keeps_record() {
    let (app, repo) = app();
    let id = create(&app, "Carol", "Davis", "carol@example.com").await;
    create(&app, "Dan", "Davis", "dan@example.com").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Contact deleted successfully"}));

    let (status, body) = send(&app, Method::GET, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact not found");

    let (_, body) = send(&app, Method::GET, "/api/contacts?search=davis", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["firstName"], "Dan");

    let (_, body) = send(&app, Method::GET, "/api/contacts/search/carol", None).await;
    assert_eq!(body["count"], 0);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{}", id),
        Some(json!({"notes": "still here?"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let stored = repo
        .find_by_id(&ContactId::parse(&id).unwrap())
        .await
        .unwrap()
        .expect("record still stored");
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_deleted_email_can_be_reused() {
    let (app, _) = app();
    let id = create(&app, "Ann", "Lee", "ann@example.com").await;
    send(&app, Method::DELETE, &format!("/api/contacts/{}", id), None).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(contact_body("Ann", "Lee", "ann@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_pagination_math() {
    let (app, _) = app();
    for i in 0..25 {
        create(&app, "User", &format!("Number{}", i), &format!("user{}@example.com", i)).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/contacts?page=2&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    assert_eq!(body["total"], 25);
    assert_eq!(body["page"], 2);
    assert_eq!(body["pages"], 3);

    let (_, body) = send(&app, Method::GET, "/api/contacts?page=3&limit=10", None).await;
    assert_eq!(body["count"], 5);

    // newest first
    let (_, body) = send(&app, Method::GET, "/api/contacts?limit=1", None).await;
    assert_eq!(body["data"][0]["lastName"], "Number24");
}

#[tokio::test]
async fn test_invalid_pagination_falls_back_to_defaults() {
    let (app, _) = app();
    for i in 0..12 {
        create(&app, "User", &format!("N{}", i), &format!("u{}@example.com", i)).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/contacts?page=abc&limit=-5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 10);
    assert_eq!(body["total"], 12);
    assert_eq!(body["pages"], 2);

    let (status, body) = send(&app, Method::GET, "/api/contacts?page=2&page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["count"], 2);

    let (status, body) = send(&app, Method::GET, "/api/contacts?limit=abc&limit=5&unknown=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 10);
}

#[tokio::test]
async fn test_list_filters_by_tag() {
    let (app, _) = app();
    let mut tagged = contact_body("Bob", "Smith", "bob@example.com");
    tagged["tags"] = json!(["Design", "work"]);
    send(&app, Method::POST, "/api/contacts", Some(tagged)).await;
    create(&app, "Eve", "Brown", "eve@example.com").await;

    let (_, body) = send(&app, Method::GET, "/api/contacts?tag=DESIGN", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["firstName"], "Bob");

    let (_, body) = send(&app, Method::GET, "/api/contacts?tag=design&search=eve", None).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["pages"], 0);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (app, _) = app();
    create(&app, "Alice", "Johnson", "alice.johnson@example.com").await;
    create(&app, "Bob", "Smith", "bob.smith@example.com").await;

    for term in ["ALICE", "johnson", "alice.johnson@example.com"] {
        let (status, body) =
            send(&app, Method::GET, &format!("/api/contacts/search/{}", term), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1, "term {}", term);
        assert_eq!(body["data"][0]["firstName"], "Alice");
        assert!(body.get("total").is_none());
    }
}

#[tokio::test]
async fn test_search_matches_company_and_sorts_by_first_name() {
    let (app, _) = app();
    let mut zed = contact_body("Zed", "Quinn", "zed@example.com");
    zed["company"] = json!("TechCorp");
    send(&app, Method::POST, "/api/contacts", Some(zed)).await;
    let mut amy = contact_body("Amy", "Park", "amy@example.com");
    amy["company"] = json!("techcorp labs");
    send(&app, Method::POST, "/api/contacts", Some(amy)).await;

    let (_, body) = send(&app, Method::GET, "/api/contacts/search/TECHCORP", None).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["firstName"], "Amy");
    assert_eq!(body["data"][1]["firstName"], "Zed");
}

#[tokio::test]
async fn test_update_contact() {
    let (app, _) = app();
    let id = create(&app, "Ann", "Lee", "ann@example.com").await;
    create(&app, "Bob", "Ray", "bob@example.com").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{}", id),
        Some(json!({"email": "BOB@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Another contact with this email already exists");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{}", id),
        Some(json!({"firstName": "aNNA", "company": "Acme", "tags": ["VIP"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact updated successfully");
    assert_eq!(body["data"]["firstName"], "Anna");
    assert_eq!(body["data"]["lastName"], "Lee");
    assert_eq!(body["data"]["company"], "Acme");
    assert_eq!(body["data"]["tags"], json!(["vip"]));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{}", id),
        Some(json!({"phone": "abc", "notes": "x".repeat(501)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!(["Please provide a valid phone number", "Notes cannot exceed 500 characters"])
    );
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let (app, _) = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/contacts/123", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid contact ID format");
    }

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/contacts/123",
        Some(json!({"notes": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = ContactId::generate();
    let (status, body) =
        send(&app, Method::GET, &format!("/api/contacts/{}", unknown), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact not found");
}

#[tokio::test]
async fn test_root_and_fallback() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact Book API is running!");
    assert_eq!(body["endpoints"]["contacts"], "/api/contacts");

    let (status, body) = send(&app, Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not Found - /api/unknown");

    let (status, body) = send(&app, Method::GET, "/nope?x=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found - /nope?x=1");
}

#[tokio::test]
async fn test_unsupported_method_gets_not_found_envelope() {
    let (app, _) = app();
    let id = create(&app, "Ann", "Lee", "ann@example.com").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/contacts/{}", id),
        Some(json!({"notes": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], format!("Not Found - /api/contacts/{}", id));

    let (status, body) = send(&app, Method::DELETE, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found - /api/contacts");
}

#[tokio::test]
async fn test_blank_search_term_matches_literally() {
    let (app, _) = app();
    create(&app, "Ann", "Lee", "ann@example.com").await;
    let mut spaced = contact_body("Bob", "Ray", "bob@example.com");
    spaced["company"] = json!("Acme Labs");
    send(&app, Method::POST, "/api/contacts", Some(spaced)).await;

    let (status, body) = send(&app, Method::GET, "/api/contacts/search/%20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["firstName"], "Bob");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_with_same_email() {
    let (app, repo) = app();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            let email = if i % 2 == 0 { "RACE@x.com" } else { "race@X.com" };
            tokio::spawn(async move {
                send(
                    &app,
                    Method::POST,
                    "/api/contacts",
                    Some(contact_body("Ann", "Lee", email)),
                )
                .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["error"], "Contact with this email already exists")
            }
            other => panic!("unexpected status {}: {}", other, body),
        }
    }
    assert_eq!(created, 1);

    let filter = contact_book_api::query::ContactFilter::active();
    assert_eq!(repo.count(&filter).await.unwrap(), 1);
}
