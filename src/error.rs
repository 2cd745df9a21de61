//! Error taxonomy for registry operations.
//!
//! Every operation that does not succeed produces exactly one of these
//! outcome kinds; none of them are fatal — the collection stays consistent
//! and the caller keeps serving requests.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A create/update body failed validation. Carries every violation, in
    /// check order; no mutation occurred.
    Rejected(Vec<String>),
    /// No entry with the requested id, or a search mode that reports an
    /// empty result set as missing.
    NotFound(String),
    /// Malformed query parameters (non-positive page/size, missing mandatory
    /// search term, unsupported sort key).
    InvalidInput(String),
    /// The query was well-formed but selected nothing.
    NoContent,
    /// A writer panicked while holding the collection lock.
    LockPoisoned(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Rejected(violations) => write!(f, "{}", violations.join("\n")),
            RegistryError::NotFound(msg) => write!(f, "{}", msg),
            RegistryError::InvalidInput(msg) => write!(f, "{}", msg),
            RegistryError::NoContent => write!(f, "no content"),
            RegistryError::LockPoisoned(operation) => {
                write!(f, "registry lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl RegistryError {
    /// Map this outcome to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::Rejected(_) => 400,
            RegistryError::NotFound(_) => 404,
            RegistryError::InvalidInput(_) => 400,
            RegistryError::NoContent => 204,
            RegistryError::LockPoisoned(_) => 500,
        }
    }
}
