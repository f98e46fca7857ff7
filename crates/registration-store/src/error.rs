//! Storage errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),

    #[error("User ID cannot be empty")]
    EmptyUserId,

    #[error("User ID is reserved: {0}")]
    ReservedKey(String),

    #[error("User already exists: {0}")]
    UserExists(String),
}
