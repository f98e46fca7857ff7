//! Submission controller.
//!
//! `Idle -> Validating -> Rejected | Accepted`. A rejected submission never
//! persists anything; an accepted one asks the host to store the account,
//! drop the draft and navigate to the login page.

use crate::error::FieldError;
use crate::event::Effect;
use crate::field::{FieldId, Rule};
use crate::handler::{check_rule, clear, show_error, FormContext};
use crate::records::UserRecord;
use crate::state::{FormState, SubmissionStatus, Target};
use tracing::{debug, info};

pub const MISSING_DOCUMENTS_TITLE: &str = "Required documents not attached";

pub const REGISTERED_MESSAGE: &str =
    "Registration complete! You will be redirected to the login page.";

pub(crate) fn on_submit(state: &mut FormState, ctx: &FormContext, effects: &mut Vec<Effect>) {
    state.submission = SubmissionStatus::Validating;

    // Missing documents block before any field is looked at.
    let missing = state.attachments.missing();
    if !missing.is_empty() {
        debug!(missing = missing.len(), "Submission blocked on attachments");
        state.submission = SubmissionStatus::Rejected;
        effects.push(Effect::ShowModal {
            title: MISSING_DOCUMENTS_TITLE.to_string(),
            lines: missing.iter().map(|slot| slot.label().to_string()).collect(),
        });
        return;
    }

    let mut valid = true;

    let descriptors: Vec<_> = ctx
        .registry
        .fields()
        .map(|d| (d.id, d.rule, d.required))
        .collect();

    for (field, rule, required) in descriptors {
        let target = Target::Field(field);
        let empty = state.value(field).trim().is_empty();

        let result = if empty {
            if required {
                Err(FieldError::Required)
            } else {
                Ok(())
            }
        } else {
            check_rule(state, ctx, field, rule)
        };

        match result {
            Ok(()) => {
                // Keep the lookup status visible while a lookup is running.
                if !(rule == Rule::Cep && state.pending_lookup.is_some()) {
                    clear(state, target, effects);
                }
            }
            Err(e) => {
                valid = false;
                show_error(state, target, &e, effects);
            }
        }
    }

    if state.track.is_none() {
        valid = false;
        show_error(state, Target::Track, &FieldError::TrackNotSelected, effects);
    } else {
        clear(state, Target::Track, effects);
    }

    if !valid {
        state.submission = SubmissionStatus::Rejected;
        return;
    }

    let user = UserRecord {
        user_id: state.value(FieldId::UserId).to_string(),
        password: state.value(FieldId::Password).to_string(),
        name: state.value(FieldId::Name).to_string(),
        email: state.value(FieldId::Email).to_string(),
    };

    info!(user_id = %user.user_id, "Registration accepted");
    state.submission = SubmissionStatus::Accepted;

    effects.push(Effect::PersistUser { user });
    effects.push(Effect::ClearDraft);
    effects.push(Effect::Notify {
        message: REGISTERED_MESSAGE.to_string(),
    });
    effects.push(Effect::Navigate {
        destination: ctx.login_destination.clone(),
    });
}

pub(crate) fn on_registration_rejected(
    state: &mut FormState,
    reason: FieldError,
    effects: &mut Vec<Effect>,
) {
    state.submission = SubmissionStatus::Rejected;

    match reason {
        FieldError::UserIdTaken | FieldError::UserIdEmpty => {
            show_error(state, Target::Field(FieldId::UserId), &reason, effects);
        }
        other => effects.push(Effect::Notify {
            message: other.to_string(),
        }),
    }
}
