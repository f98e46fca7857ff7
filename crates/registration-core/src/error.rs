//! Field-level validation errors.
//!
//! The `Display` text of each variant is the message shown next to the
//! offending field.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid format (DD/MM/YYYY)")]
    DateFormat,

    #[error("Invalid date")]
    InvalidDate,

    #[error("Date cannot be in the future")]
    FutureDate,

    #[error("Invalid CPF")]
    InvalidCpf,

    #[error("Invalid CEP (must have 8 digits)")]
    InvalidCep,

    #[error("CEP not found or address incomplete")]
    CepNotFound,

    #[error("Error fetching CEP. Please try again.")]
    LookupFailed,

    #[error("This field is required")]
    Required,

    #[error("Please select a track")]
    TrackNotSelected,

    #[error("User ID is already taken")]
    UserIdTaken,

    #[error("User ID cannot be empty")]
    UserIdEmpty,

    #[error("Could not save your registration. Please try again.")]
    SaveFailed,
}
