//! Registration form logic with no I/O.
//!
//! The form is modelled as an explicit [`FormState`] plus a pure
//! [`handle`] function turning one [`FormEvent`] into a new state and a list
//! of [`Effect`]s. Storage, network and rendering are left to the host.

mod error;
mod event;
mod field;
mod handler;
mod records;
mod state;
mod submit;

pub mod cpf;
pub mod mask;
pub mod validate;

pub use error::FieldError;
pub use event::{Effect, FormEvent};
pub use field::{FieldDescriptor, FieldId, FieldRegistry, Rule};
pub use handler::{capture_draft, handle, FormContext, DRAFT_SAVED_MESSAGE, SEARCHING_MESSAGE};
pub use mask::MaskKind;
pub use records::{AddressResult, DraftRecord, LookupOutcome, UserRecord, TRACK_KEY};
pub use state::{
    AttachedFile, AttachmentSlot, Attachments, FieldMessage, FormState, SubmissionStatus, Target,
    Tone,
};
pub use submit::{MISSING_DOCUMENTS_TITLE, REGISTERED_MESSAGE};
