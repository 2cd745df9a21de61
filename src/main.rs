//! bloodbank-server — HTTP front end for the in-memory registry.
//!
//! Binds to `BLOODBANK_ADDR` (default `0.0.0.0:3000`) and starts with three
//! demo donors so a fresh server has something to serve.

use chrono::Duration;

use bloodbank_rust::{http, Clock, EntryInput, Registry, SystemClock};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let registry = Registry::new();
    seed(&registry);

    let addr =
        std::env::var("BLOODBANK_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    if let Err(err) = http::serve(registry, &addr).await {
        eprintln!("server error: {}", err);
        std::process::exit(1);
    }
}

fn seed(registry: &Registry) {
    let now = SystemClock.now();
    let demo = [
        ("Alice", 30, "A+", "alice.johnson@example.com", 500.0, 2, 28, "Available"),
        ("Bob", 40, "O-", "bob.smith@example.com", 450.0, 5, 25, "Requested"),
        ("Charlie", 35, "B+", "charlie.brown@example.com", 300.0, 1, 29, "Expired"),
    ];

    for (donor, age, blood_type, contact, quantity, collected_days_ago, expires_in_days, status) in
        demo
    {
        let input = EntryInput {
            donor_name: donor.to_string(),
            age,
            blood_type: blood_type.to_string(),
            contact_info: contact.to_string(),
            quantity,
            collection_date: now - Duration::days(collected_days_ago),
            expiration_date: now + Duration::days(expires_in_days),
            status: status.to_string(),
        };
        registry.create(input).expect("seed entry is valid");
    }
}
