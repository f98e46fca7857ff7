//! Records that cross the persistence and lookup boundaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Draft key holding the selected track.
pub const TRACK_KEY: &str = "track";

/// Snapshot of the form saved on request and restored on the next start.
///
/// Serialized as a flat JSON object of string values keyed by field key,
/// plus the track and attachment display names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord {
    values: BTreeMap<String, String>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Account created by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Address fields returned by the postal-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResult {
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl AddressResult {
    /// A lookup without a street line is treated as not found.
    pub fn is_resolvable(&self) -> bool {
        self.street.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Result of one address lookup, fed back into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found { address: AddressResult },
    NotFound,
    Failed { reason: String },
}
