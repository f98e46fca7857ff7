//! Local persistence for the registration form.
//!
//! A flat string key-value store (optionally backed by a JSON file) with
//! typed accessors for the saved draft, registered accounts and the
//! dark-mode preference.

mod error;
mod records;
mod store;

pub use error::StoreError;
pub use records::{DARK_MODE_KEY, DRAFT_KEY, RESERVED_KEYS};
pub use store::Store;
