mod clock;
mod entry;
mod error;
mod registry;
mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{BloodBankEntry, EntryInput, BLOOD_TYPES, STATUSES};
pub use error::RegistryError;
pub use registry::Registry;
pub use validate::validate;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;
