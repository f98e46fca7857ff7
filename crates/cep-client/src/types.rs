//! ViaCEP response types.

use serde::Deserialize;

/// Raw lookup response.
///
/// Unknown postal codes come back with HTTP 200 and an `erro` flag, which
/// some deployments send as a boolean and others as the string `"true"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CepResponse {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

impl CepResponse {
    pub fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Address resolved from a CEP. Empty strings from the service are
/// normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub cep: String,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Address {
    pub(crate) fn from_response(cep: &str, response: CepResponse) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            cep: response.cep.unwrap_or_else(|| cep.to_string()),
            street: non_empty(response.logradouro),
            complement: non_empty(response.complemento),
            neighborhood: non_empty(response.bairro),
            city: non_empty(response.localidade),
            state: non_empty(response.uf),
        }
    }
}
