//! Registry — the in-memory collection and its query engine.
//!
//! Holds every validator-approved entry in insertion order behind a single
//! `RwLock`. Mutations (create, update, delete) take the write lock so id
//! assignment and append happen atomically; queries take the read lock and
//! never observe a collection mid-mutation.
//!
//! ## Example
//!
//! ```ignore
//! use bloodbank_rust::{EntryInput, Registry};
//!
//! let registry = Registry::new();
//! let entry = registry.create(input)?;
//! let page = registry.page(1, 10)?;
//! let sorted = registry.sort("bloodType", "asc")?;
//! ```

use std::cmp::Ordering;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::entry::{BloodBankEntry, EntryInput};
use crate::error::RegistryError;
use crate::validate::validate;

struct Inner {
    entries: Vec<BloodBankEntry>,
    /// Highest id ever assigned. Never decreases, so deleted ids are not
    /// handed out again.
    high_water: u32,
}

/// In-memory blood bank registry.
///
/// Clone-friendly via `Arc`: clones share the same collection, so the
/// registry can be handed to a transport layer and to background callers
/// at the same time.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<Inner>>,
    clock: Arc<dyn Clock>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty registry with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: Vec::new(),
                high_water: 0,
            })),
            clock,
        }
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Inner>, RegistryError> {
        self.inner
            .read()
            .map_err(|_| RegistryError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Inner>, RegistryError> {
        self.inner
            .write()
            .map_err(|_| RegistryError::LockPoisoned(operation))
    }

    /// Validate and append a new entry.
    ///
    /// The id is assigned by the registry: one past the highest id ever
    /// assigned, starting at 1. On rejection the collection is untouched.
    pub fn create(&self, input: EntryInput) -> Result<BloodBankEntry, RegistryError> {
        let violations = validate(&input, self.clock.now());
        if !violations.is_empty() {
            warn!(violations = violations.len(), "create rejected");
            return Err(RegistryError::Rejected(violations));
        }

        let mut inner = self.write("create")?;
        let id = inner.high_water + 1;
        inner.high_water = id;
        let entry = input.into_entry(id);
        inner.entries.push(entry.clone());
        info!(id, "entry created");
        Ok(entry)
    }

    /// The full collection in insertion order.
    pub fn all(&self) -> Result<Vec<BloodBankEntry>, RegistryError> {
        Ok(self.read("all")?.entries.clone())
    }

    /// Number of entries currently held.
    pub fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.read("count")?.entries.len())
    }

    /// The first entry with a matching id.
    pub fn get(&self, id: u32) -> Result<BloodBankEntry, RegistryError> {
        self.read("get")?
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(format!("no entry with id {}", id)))
    }

    /// Replace every field except the id on an existing entry.
    ///
    /// An unknown id reports `NotFound` before the body is validated, so a
    /// caller with both problems hears about the missing entry first.
    pub fn update(&self, id: u32, input: EntryInput) -> Result<(), RegistryError> {
        let now = self.clock.now();
        let mut inner = self.write("update")?;
        let position = inner
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RegistryError::NotFound(format!("no entry with id {}", id)))?;

        let violations = validate(&input, now);
        if !violations.is_empty() {
            warn!(id, violations = violations.len(), "update rejected");
            return Err(RegistryError::Rejected(violations));
        }

        inner.entries[position] = input.into_entry(id);
        info!(id, "entry updated");
        Ok(())
    }

    /// Remove an entry by id. Removal is immediate and permanent.
    pub fn delete(&self, id: u32) -> Result<(), RegistryError> {
        let mut inner = self.write("delete")?;
        let position = inner
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RegistryError::NotFound(format!("no entry with id {}", id)))?;
        inner.entries.remove(position);
        info!(id, "entry deleted");
        Ok(())
    }

    /// One insertion-ordered window of the collection.
    ///
    /// `page` and `size` are 1-based; the window is clamped to the available
    /// length. A window past the end is `NoContent`, not an input error.
    pub fn page(&self, page: i64, size: i64) -> Result<Vec<BloodBankEntry>, RegistryError> {
        if page <= 0 || size <= 0 {
            return Err(RegistryError::InvalidInput(
                "page and size must be greater than 0".to_string(),
            ));
        }

        let inner = self.read("page")?;
        let start = (page - 1).saturating_mul(size);
        let window: Vec<BloodBankEntry> = inner
            .entries
            .iter()
            .skip(start as usize)
            .take(size as usize)
            .cloned()
            .collect();

        if window.is_empty() {
            return Err(RegistryError::NoContent);
        }
        Ok(window)
    }

    /// Case-insensitive substring search over donor names.
    ///
    /// An empty or absent term applies no narrowing. An empty result —
    /// including an unfiltered scan of an empty collection — is `NotFound`.
    pub fn search_by_donor_name(
        &self,
        term: Option<&str>,
    ) -> Result<Vec<BloodBankEntry>, RegistryError> {
        let inner = self.read("search_by_donor_name")?;
        let results: Vec<BloodBankEntry> = match term {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                inner
                    .entries
                    .iter()
                    .filter(|e| e.donor_name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            _ => inner.entries.clone(),
        };

        if results.is_empty() {
            return Err(RegistryError::NotFound(
                "No blood bank entries found.".to_string(),
            ));
        }
        Ok(results)
    }

    /// Case-insensitive exact match on blood type.
    ///
    /// The term is mandatory. An empty result set is returned as-is — this
    /// mode, unlike the other two searches, does not treat empty as missing.
    pub fn search_by_blood_type(
        &self,
        term: Option<&str>,
    ) -> Result<Vec<BloodBankEntry>, RegistryError> {
        let term = match term {
            Some(term) if !term.is_empty() => term,
            _ => {
                return Err(RegistryError::InvalidInput(
                    "bloodType parameter is required.".to_string(),
                ))
            }
        };

        let inner = self.read("search_by_blood_type")?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| e.blood_type.eq_ignore_ascii_case(term))
            .cloned()
            .collect())
    }

    /// Case-insensitive substring match on status. The term is mandatory;
    /// an empty result is `NotFound`.
    pub fn search_by_status(
        &self,
        term: Option<&str>,
    ) -> Result<Vec<BloodBankEntry>, RegistryError> {
        let term = match term {
            Some(term) if !term.is_empty() => term,
            _ => {
                return Err(RegistryError::InvalidInput(
                    "Status parameter is required.".to_string(),
                ))
            }
        };

        let inner = self.read("search_by_status")?;
        let needle = term.to_lowercase();
        let results: Vec<BloodBankEntry> = inner
            .entries
            .iter()
            .filter(|e| e.status.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if results.is_empty() {
            return Err(RegistryError::NotFound(
                "No blood bank entries found.".to_string(),
            ));
        }
        Ok(results)
    }

    /// Narrow by any combination of blood type and status, both exact and
    /// case-insensitive, combined with logical AND. Omitted terms impose no
    /// constraint. An empty result set is returned as-is.
    ///
    /// `donor_name` is accepted for surface compatibility but applies no
    /// narrowing.
    pub fn filter(
        &self,
        blood_type: Option<&str>,
        status: Option<&str>,
        _donor_name: Option<&str>,
    ) -> Result<Vec<BloodBankEntry>, RegistryError> {
        let inner = self.read("filter")?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| match blood_type {
                Some(term) if !term.is_empty() => e.blood_type.eq_ignore_ascii_case(term),
                _ => true,
            })
            .filter(|e| match status {
                Some(term) if !term.is_empty() => e.status.eq_ignore_ascii_case(term),
                _ => true,
            })
            .cloned()
            .collect())
    }

    /// Stable sort of the collection by one of the supported keys.
    ///
    /// `sort_by` matches case-insensitively; `sort_order` is ascending only
    /// for the exact string "asc", descending otherwise. Equal keys keep
    /// their insertion order in both directions.
    pub fn sort(&self, sort_by: &str, sort_order: &str) -> Result<Vec<BloodBankEntry>, RegistryError> {
        let compare: fn(&BloodBankEntry, &BloodBankEntry) -> Ordering =
            match sort_by.to_lowercase().as_str() {
                "bloodtype" => |a, b| a.blood_type.cmp(&b.blood_type),
                "collectiondate" => |a, b| a.collection_date.cmp(&b.collection_date),
                "expirationdate" => |a, b| a.expiration_date.cmp(&b.expiration_date),
                _ => {
                    return Err(RegistryError::InvalidInput(
                        "Invalid sortBy parameter. Supported values are 'bloodType', \
                         'collectionDate', and 'expirationDate'."
                            .to_string(),
                    ))
                }
            };

        let mut results = self.read("sort")?.entries.clone();
        if sort_order == "asc" {
            results.sort_by(compare);
        } else {
            // Flipped comparator rather than sort-then-reverse: reversing
            // would also reverse equal keys and break stability.
            results.sort_by(|a, b| compare(b, a));
        }
        Ok(results)
    }
}
