//! BloodBankEntry — the single record type managed by the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The eight recognized blood groups. Inputs are matched case-insensitively
/// and stored uppercased.
pub const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Canonical entry statuses. Matching is case-sensitive.
pub const STATUSES: [&str; 3] = ["Available", "Requested", "Expired"];

/// One blood-donation unit held by the registry.
///
/// Serialized camelCase to match the wire format the registry's consumers
/// expect (`donorName`, `bloodType`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodBankEntry {
    /// Unique, registry-assigned. Never reused after deletion.
    pub id: u32,
    pub donor_name: String,
    pub age: u32,
    pub blood_type: String,
    pub contact_info: String,
    /// Donated amount in milliliters.
    pub quantity: f64,
    pub collection_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub status: String,
}

/// A client-supplied record body: every field of [`BloodBankEntry`] except
/// the id, which is always assigned by the registry. Updates replace all of
/// these fields on the stored entry at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub donor_name: String,
    pub age: u32,
    pub blood_type: String,
    pub contact_info: String,
    pub quantity: f64,
    pub collection_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub status: String,
}

impl EntryInput {
    /// Materialize a stored entry under the given id. The blood type is
    /// normalized to uppercase; every other field is taken verbatim.
    pub(crate) fn into_entry(self, id: u32) -> BloodBankEntry {
        BloodBankEntry {
            id,
            donor_name: self.donor_name,
            age: self.age,
            blood_type: self.blood_type.to_uppercase(),
            contact_info: self.contact_info,
            quantity: self.quantity,
            collection_date: self.collection_date,
            expiration_date: self.expiration_date,
            status: self.status,
        }
    }
}
