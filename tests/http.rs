//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "http")]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use bloodbank_rust::{http, EntryInput, FixedClock, Registry};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn seeded_registry() -> Registry {
    let registry = Registry::with_clock(Arc::new(FixedClock(now())));
    for (donor, blood_type, status) in [
        ("Alice", "A+", "Available"),
        ("Bob", "O-", "Requested"),
        ("Charlie", "B+", "Expired"),
    ] {
        registry
            .create(EntryInput {
                donor_name: donor.to_string(),
                age: 30,
                blood_type: blood_type.to_string(),
                contact_info: format!("{}@example.com", donor.to_lowercase()),
                quantity: 500.0,
                collection_date: now() - Duration::days(2),
                expiration_date: now() + Duration::days(28),
                status: status.to_string(),
            })
            .unwrap();
    }
    registry
}

/// Bind to port 0 and return the actual address.
async fn start_server(registry: Registry) -> String {
    let app = http::router(registry);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn entry_body(donor: &str, blood_type: &str) -> serde_json::Value {
    json!({
        "donorName": donor,
        "age": 30,
        "bloodType": blood_type,
        "contactInfo": format!("{}@example.com", donor.to_lowercase()),
        "quantity": 500.0,
        "collectionDate": "2024-05-30T12:00:00Z",
        "expirationDate": "2024-06-29T12:00:00Z",
        "status": "Available",
    })
}

#[tokio::test]
async fn health_reports_entry_count() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["entries"], 3);
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/bloodbank"))
        .json(&entry_body("Dana", "ab-"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 4);
    assert_eq!(body["bloodType"], "AB-");
}

#[tokio::test]
async fn create_rejection_returns_joined_violations() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let mut body = entry_body("Young", "X+");
    body["age"] = json!(17);

    let resp = client
        .post(format!("{base}/bloodbank"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid Blood Group.\nAge must be between 18 and 65."
    );
}

#[tokio::test]
async fn get_all_and_get_by_id() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/bloodbank")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 3);

    let resp = client
        .get(format!("{base}/bloodbank/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["donorName"], "Bob");

    let resp = client
        .get(format!("{base}/bloodbank/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn update_returns_204_and_persists() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/bloodbank/2"))
        .json(&entry_body("Roberto", "o+"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/bloodbank/2"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 2);
    assert_eq!(body["donorName"], "Roberto");
    assert_eq!(body["bloodType"], "O+");
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/bloodbank/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .delete(format!("{base}/bloodbank/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn pagination_statuses() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/bloodbank/page?page=2&size=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["donorName"], "Charlie");

    // Beyond the last page: no content, not an error.
    let resp = client
        .get(format!("{base}/bloodbank/page?page=5&size=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/bloodbank/page?page=0&size=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "page and size must be greater than 0");
}

#[tokio::test]
async fn search_modes_keep_their_empty_result_semantics() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    // Donor search: empty result is 404.
    let resp = client
        .get(format!("{base}/bloodbank/search/donorname?donorName=zelda"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No blood bank entries found.");

    // Blood type search: empty result is an empty 200.
    let resp = client
        .get(format!("{base}/bloodbank/search/bloodtype?bloodType=AB%2B"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));

    // Blood type search without its term is an input error.
    let resp = client
        .get(format!("{base}/bloodbank/search/bloodtype"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "bloodType parameter is required.");

    // Status search is substring and case-insensitive.
    let resp = client
        .get(format!("{base}/bloodbank/search/status?status=requ"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body[0]["donorName"], "Bob");
}

#[tokio::test]
async fn sort_and_filter_endpoints() {
    let base = start_server(seeded_registry()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/bloodbank/sort?sortBy=bloodType&sortOrder=asc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let order: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["bloodType"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["A+", "B+", "O-"]);

    let resp = client
        .get(format!("{base}/bloodbank/sort?sortBy=donorName"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Filter narrows by AND; donorName is accepted but not applied.
    let resp = client
        .get(format!(
            "{base}/bloodbank/filter?bloodType=o-&status=requested&donorName=Alice"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["donorName"], "Bob");
}
