//! Events fed into the form and the effects it asks the host to perform.

use crate::error::FieldError;
use crate::field::FieldId;
use crate::records::{DraftRecord, LookupOutcome, UserRecord};
use crate::state::{AttachmentSlot, Target, Tone};
use serde::{Deserialize, Serialize};

/// Something that happened on the page.
///
/// The last three variants are raised by the host itself and are not
/// accepted from the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    /// Raw keystroke content of a field.
    Input { field: FieldId, value: String },
    /// A field lost focus.
    Blur { field: FieldId },
    SelectTrack { track: String },
    /// A file was chosen (or the choice was cleared) for an upload slot.
    Attach {
        slot: AttachmentSlot,
        #[serde(default)]
        file_name: Option<String>,
    },
    SaveDraft,
    Submit,
    #[serde(skip)]
    RestoreDraft { draft: DraftRecord },
    #[serde(skip)]
    LookupCompleted { generation: u64, outcome: LookupOutcome },
    /// Persistence refused the new account.
    #[serde(skip)]
    RegistrationRejected { reason: FieldError },
}

/// Work requested by the form. UI effects go to the page; the rest are
/// carried out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    SetValue { field: FieldId, value: String },
    ShowMessage { target: Target, text: String, tone: Tone },
    ClearMessage { target: Target },
    SetDisabled { field: FieldId, disabled: bool },
    SetAttachmentLabel { slot: AttachmentSlot, file_name: Option<String> },
    SelectTrack { track: String },
    StartLookup { cep: String, generation: u64 },
    PersistDraft { draft: DraftRecord },
    ClearDraft,
    PersistUser { user: UserRecord },
    ShowModal { title: String, lines: Vec<String> },
    Notify { message: String },
    Navigate { destination: String },
}

impl Effect {
    /// Whether the effect is rendered by the page rather than executed by
    /// the host.
    pub fn is_ui(&self) -> bool {
        !matches!(
            self,
            Effect::StartLookup { .. }
                | Effect::PersistDraft { .. }
                | Effect::ClearDraft
                | Effect::PersistUser { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_event() {
        let event: FormEvent =
            serde_json::from_str(r#"{"type":"input","field":"cpf","value":"529"}"#).unwrap();
        assert!(matches!(
            event,
            FormEvent::Input { field: FieldId::Cpf, ref value } if value == "529"
        ));
    }

    #[test]
    fn test_parse_attach_without_file() {
        let event: FormEvent =
            serde_json::from_str(r#"{"type":"attach","slot":"identityDocument"}"#).unwrap();
        assert!(matches!(
            event,
            FormEvent::Attach { slot: AttachmentSlot::IdentityDocument, file_name: None }
        ));
    }

    #[test]
    fn test_internal_events_not_accepted() {
        let result: Result<FormEvent, _> =
            serde_json::from_str(r#"{"type":"lookup_completed","generation":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::ShowMessage {
            target: Target::Field(FieldId::Email),
            text: "bad".into(),
            tone: Tone::Error,
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["effect"], "show_message");
        assert_eq!(json["target"]["field"], "email");
        assert_eq!(json["tone"], "error");
    }

    #[test]
    fn test_effect_is_ui() {
        assert!(Effect::Notify { message: "hi".into() }.is_ui());
        assert!(!Effect::ClearDraft.is_ui());
    }
}
