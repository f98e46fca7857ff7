//! CEP lookup errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CepError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("CEP not found: {0}")]
    NotFound(String),

    #[error("Invalid CEP: {0}")]
    InvalidCep(String),
}
