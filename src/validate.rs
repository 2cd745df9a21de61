//! Record validation — the write-time gate for the registry.
//!
//! Every check runs; nothing short-circuits. Violations are collected in a
//! fixed order so a caller sees the full set of problems in one pass.

use chrono::{DateTime, Utc};

use crate::entry::{EntryInput, BLOOD_TYPES, STATUSES};

/// Validate a candidate record body against the registry rules.
///
/// Returns the list of violations, empty when the record is well-formed.
/// `now` is the clock reading for the CollectionDate check. Pure function
/// of its arguments, no side effects.
pub fn validate(input: &EntryInput, now: DateTime<Utc>) -> Vec<String> {
    let mut violations = Vec::new();

    let blood_type = input.blood_type.to_uppercase();
    if !BLOOD_TYPES.contains(&blood_type.as_str()) {
        violations.push("Invalid Blood Group.".to_string());
    }

    if input.age < 18 || input.age > 65 {
        violations.push("Age must be between 18 and 65.".to_string());
    }

    if input.quantity <= 0.0 {
        violations.push("Quantity should be greater than 0.".to_string());
    }

    if input.contact_info.is_empty() || !input.contact_info.contains('@') {
        violations.push("ContactInfo must be a valid email.".to_string());
    }

    if input.collection_date > now {
        violations.push("CollectionDate cannot be in the future.".to_string());
    }

    if input.expiration_date <= input.collection_date {
        violations.push("ExpirationDate must be after CollectionDate.".to_string());
    }

    // Status match is case-sensitive, unlike blood type.
    if !STATUSES.contains(&input.status.as_str()) {
        violations.push("Status not valid".to_string());
    }

    violations
}
