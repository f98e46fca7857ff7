//! ViaCEP postal code lookup client.

mod client;
mod error;
mod types;

pub use client::{AddressLookup, CepClient};
pub use error::CepError;
pub use types::*;
