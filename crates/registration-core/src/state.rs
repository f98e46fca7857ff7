//! Explicit form state threaded through every handler.

use crate::field::FieldId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where an inline message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Field(FieldId),
    /// The single-choice track group.
    Track,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub text: String,
    pub tone: Tone,
}

/// Required document uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentSlot {
    IdentityDocument,
    ProofOfResidence,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 2] =
        [AttachmentSlot::IdentityDocument, AttachmentSlot::ProofOfResidence];

    /// Key used for the display name in saved drafts.
    pub fn key(self) -> &'static str {
        match self {
            AttachmentSlot::IdentityDocument => "identityDocument",
            AttachmentSlot::ProofOfResidence => "proofOfResidence",
        }
    }

    /// Human-readable document name used in the missing-documents modal.
    pub fn label(self) -> &'static str {
        match self {
            AttachmentSlot::IdentityDocument => "Identity document",
            AttachmentSlot::ProofOfResidence => "Proof of residence",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// A file chosen for an attachment slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    /// Name came from a saved draft; the file itself was not kept.
    pub restored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    files: BTreeMap<AttachmentSlot, AttachedFile>,
}

impl Attachments {
    pub fn attach(&mut self, slot: AttachmentSlot, name: impl Into<String>) {
        self.files.insert(
            slot,
            AttachedFile {
                name: name.into(),
                restored: false,
            },
        );
    }

    pub fn restore(&mut self, slot: AttachmentSlot, name: impl Into<String>) {
        self.files.insert(
            slot,
            AttachedFile {
                name: name.into(),
                restored: true,
            },
        );
    }

    pub fn clear(&mut self, slot: AttachmentSlot) {
        self.files.remove(&slot);
    }

    pub fn get(&self, slot: AttachmentSlot) -> Option<&AttachedFile> {
        self.files.get(&slot)
    }

    /// Display name for the slot, if any.
    pub fn display_name(&self, slot: AttachmentSlot) -> Option<&str> {
        self.files.get(&slot).map(|f| f.name.as_str())
    }

    /// Whether an actual file is present (restored names do not count).
    pub fn is_attached(&self, slot: AttachmentSlot) -> bool {
        self.files.get(&slot).is_some_and(|f| !f.restored)
    }

    pub fn missing(&self) -> Vec<AttachmentSlot> {
        AttachmentSlot::ALL
            .into_iter()
            .filter(|&slot| !self.is_attached(slot))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Rejected,
    Accepted,
}

/// Everything the form knows; owned by the host and replaced on each event.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub(crate) values: BTreeMap<FieldId, String>,
    pub(crate) messages: BTreeMap<Target, FieldMessage>,
    pub(crate) track: Option<String>,
    pub(crate) attachments: Attachments,
    pub(crate) disabled: BTreeSet<FieldId>,
    pub(crate) lookup_generation: u64,
    pub(crate) pending_lookup: Option<u64>,
    pub(crate) submission: SubmissionStatus,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field; empty when never typed into.
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn message(&self, target: Target) -> Option<&FieldMessage> {
        self.messages.get(&target)
    }

    pub fn error_text(&self, field: FieldId) -> Option<&str> {
        self.messages
            .get(&Target::Field(field))
            .filter(|m| m.tone == Tone::Error)
            .map(|m| m.text.as_str())
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn is_disabled(&self, field: FieldId) -> bool {
        self.disabled.contains(&field)
    }

    pub fn pending_lookup(&self) -> Option<u64> {
        self.pending_lookup
    }

    pub fn submission(&self) -> SubmissionStatus {
        self.submission
    }
}
