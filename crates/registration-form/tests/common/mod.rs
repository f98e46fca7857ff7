//! Shared helpers for host tests.

#![allow(dead_code)]

use registration_core::{AttachmentSlot, FieldId, FieldRegistry, FormEvent};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALID_CEP: &str = "01001000";

pub fn registry() -> FieldRegistry {
    FieldRegistry::standard(vec!["backend".into(), "frontend".into()])
}

pub fn input(field: FieldId, value: &str) -> FormEvent {
    FormEvent::Input {
        field,
        value: value.into(),
    }
}

/// Every field filled with valid values for the given user id.
pub fn filled_form(user_id: &str) -> Vec<FormEvent> {
    vec![
        input(FieldId::Name, "Maria Silva"),
        input(FieldId::Email, "maria@example.com"),
        input(FieldId::UserId, user_id),
        input(FieldId::Password, "secret1"),
        input(FieldId::ConfirmPassword, "secret1"),
        input(FieldId::BirthDate, "15031990"),
        input(FieldId::Cpf, "52998224725"),
        input(FieldId::Phone, "11987654321"),
        input(FieldId::Cep, VALID_CEP),
        input(FieldId::Street, "Praça da Sé"),
        input(FieldId::Number, "100"),
        input(FieldId::Neighborhood, "Sé"),
        input(FieldId::City, "São Paulo"),
        input(FieldId::State, "SP"),
        FormEvent::SelectTrack {
            track: "backend".into(),
        },
        FormEvent::Attach {
            slot: AttachmentSlot::IdentityDocument,
            file_name: Some("rg.pdf".into()),
        },
        FormEvent::Attach {
            slot: AttachmentSlot::ProofOfResidence,
            file_name: Some("bill.pdf".into()),
        },
    ]
}

/// A ViaCEP stand-in answering for [`VALID_CEP`].
pub async fn start_cep_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{}/json/", VALID_CEP)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .mount(&server)
        .await;

    server
}
