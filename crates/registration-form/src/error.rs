//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Store error: {0}")]
    Store(#[from] registration_store::StoreError),

    #[error("CEP client error: {0}")]
    Cep(#[from] cep_client::CepError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
