//! CEP HTTP client.

use crate::error::CepError;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Anything that can resolve a CEP into an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<Address, CepError>;
}

/// Postal code lookup client for the ViaCEP REST API.
#[derive(Clone)]
pub struct CepClient {
    client: Client,
    base_url: String,
}

impl CepClient {
    /// Create a new client. `base_url` is the service root, e.g.
    /// `https://viacep.com.br/ws`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CepError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the service answers for a well-known CEP.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/01001000/json/", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Look up an 8-digit CEP.
    #[instrument(skip(self))]
    pub async fn lookup(&self, cep: &str) -> Result<Address, CepError> {
        if cep.len() != 8 || !cep.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CepError::InvalidCep(cep.to_string()));
        }

        let url = format!("{}/{}/json/", self.base_url, cep);
        debug!(url = %url, "Sending CEP lookup");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "CEP lookup failed");
            return Err(CepError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: CepResponse = serde_json::from_str(&body)?;

        if parsed.is_error() {
            debug!("CEP not found");
            return Err(CepError::NotFound(cep.to_string()));
        }

        Ok(Address::from_response(cep, parsed))
    }
}

#[async_trait]
impl AddressLookup for CepClient {
    async fn lookup(&self, cep: &str) -> Result<Address, CepError> {
        CepClient::lookup(self, cep).await
    }
}
