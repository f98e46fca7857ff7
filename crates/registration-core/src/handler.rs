//! Pure event handling: `(state, event) -> (state, effects)`.

use crate::error::FieldError;
use crate::event::{Effect, FormEvent};
use crate::field::{FieldId, FieldRegistry, Rule};
use crate::records::{AddressResult, DraftRecord, LookupOutcome, TRACK_KEY};
use crate::state::{AttachmentSlot, FieldMessage, FormState, Target, Tone};
use crate::{submit, validate};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Shown on the postal-code field while a lookup is in flight.
pub const SEARCHING_MESSAGE: &str = "Searching CEP...";

pub const DRAFT_SAVED_MESSAGE: &str = "Data saved temporarily! You can continue later.";

/// Read-only inputs every handler needs.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub registry: FieldRegistry,
    /// Local calendar date used to reject future birth dates.
    pub today: NaiveDate,
    /// Where to go after a successful registration.
    pub login_destination: String,
}

/// Apply one event to the form.
pub fn handle(state: FormState, event: FormEvent, ctx: &FormContext) -> (FormState, Vec<Effect>) {
    let mut state = state;
    let mut effects = Vec::new();

    match event {
        FormEvent::Input { field, value } => on_input(&mut state, ctx, field, value, &mut effects),
        FormEvent::Blur { field } => on_blur(&mut state, ctx, field, &mut effects),
        FormEvent::SelectTrack { track } => on_select_track(&mut state, ctx, track, &mut effects),
        FormEvent::Attach { slot, file_name } => {
            on_attach(&mut state, slot, file_name, &mut effects)
        }
        FormEvent::SaveDraft => on_save_draft(&state, &mut effects),
        FormEvent::Submit => submit::on_submit(&mut state, ctx, &mut effects),
        FormEvent::RestoreDraft { draft } => {
            on_restore_draft(&mut state, ctx, &draft, &mut effects)
        }
        FormEvent::LookupCompleted { generation, outcome } => {
            on_lookup_completed(&mut state, generation, outcome, &mut effects)
        }
        FormEvent::RegistrationRejected { reason } => {
            submit::on_registration_rejected(&mut state, reason, &mut effects)
        }
    }

    (state, effects)
}

pub(crate) fn show(
    state: &mut FormState,
    target: Target,
    text: String,
    tone: Tone,
    effects: &mut Vec<Effect>,
) {
    state.messages.insert(
        target,
        FieldMessage {
            text: text.clone(),
            tone,
        },
    );
    effects.push(Effect::ShowMessage { target, text, tone });
}

pub(crate) fn show_error(
    state: &mut FormState,
    target: Target,
    error: &FieldError,
    effects: &mut Vec<Effect>,
) {
    show(state, target, error.to_string(), Tone::Error, effects);
}

pub(crate) fn clear(state: &mut FormState, target: Target, effects: &mut Vec<Effect>) {
    if state.messages.remove(&target).is_some() {
        effects.push(Effect::ClearMessage { target });
    }
}

fn set_value(state: &mut FormState, field: FieldId, value: String, effects: &mut Vec<Effect>) {
    state.values.insert(field, value.clone());
    effects.push(Effect::SetValue { field, value });
}

fn on_input(
    state: &mut FormState,
    ctx: &FormContext,
    field: FieldId,
    value: String,
    effects: &mut Vec<Effect>,
) {
    if state.is_disabled(field) {
        debug!(%field, "Ignoring input on disabled field");
        return;
    }

    match ctx.registry.descriptor(field).and_then(|d| d.mask) {
        Some(mask) => set_value(state, field, mask.apply(&value), effects),
        None => {
            state.values.insert(field, value);
        }
    }
}

/// Check a non-lookup rule against the current state.
pub(crate) fn check_rule(
    state: &FormState,
    ctx: &FormContext,
    field: FieldId,
    rule: Rule,
) -> Result<(), FieldError> {
    let value = state.value(field);
    match rule {
        Rule::None => Ok(()),
        Rule::Email => validate::email(value),
        Rule::Password => validate::password(value),
        Rule::PasswordConfirmation => {
            validate::password_confirmation(value, state.value(FieldId::Password))
        }
        Rule::BirthDate => validate::birth_date(value, ctx.today).map(|_| ()),
        Rule::Cpf => validate::cpf(value).map(|_| ()),
        Rule::Cep => validate::cep(value).map(|_| ()),
    }
}

fn on_blur(state: &mut FormState, ctx: &FormContext, field: FieldId, effects: &mut Vec<Effect>) {
    if state.is_disabled(field) {
        return;
    }

    let Some(rule) = ctx.registry.descriptor(field).map(|d| d.rule) else {
        return;
    };

    match rule {
        Rule::None => {}
        Rule::Cep => start_lookup(state, field, effects),
        rule => match check_rule(state, ctx, field, rule) {
            Ok(()) => clear(state, Target::Field(field), effects),
            Err(e) => show_error(state, Target::Field(field), &e, effects),
        },
    }
}

fn start_lookup(state: &mut FormState, field: FieldId, effects: &mut Vec<Effect>) {
    let cep = match validate::cep(state.value(field)) {
        Ok(cep) => cep,
        Err(e) => {
            show_error(state, Target::Field(field), &e, effects);
            return;
        }
    };

    state.lookup_generation += 1;
    let generation = state.lookup_generation;
    state.pending_lookup = Some(generation);
    state.disabled.insert(field);

    effects.push(Effect::SetDisabled {
        field,
        disabled: true,
    });
    show(
        state,
        Target::Field(field),
        SEARCHING_MESSAGE.to_string(),
        Tone::Info,
        effects,
    );
    effects.push(Effect::StartLookup { cep, generation });
}

fn on_lookup_completed(
    state: &mut FormState,
    generation: u64,
    outcome: LookupOutcome,
    effects: &mut Vec<Effect>,
) {
    if state.pending_lookup != Some(generation) {
        debug!(
            generation,
            pending = ?state.pending_lookup,
            "Discarding stale address lookup"
        );
        return;
    }

    state.pending_lookup = None;
    state.disabled.remove(&FieldId::Cep);
    effects.push(Effect::SetDisabled {
        field: FieldId::Cep,
        disabled: false,
    });

    let target = Target::Field(FieldId::Cep);
    match outcome {
        LookupOutcome::Found { address } if address.is_resolvable() => {
            fill_address(state, address, effects);
            clear(state, target, effects);
        }
        LookupOutcome::Found { .. } | LookupOutcome::NotFound => {
            show_error(state, target, &FieldError::CepNotFound, effects);
        }
        LookupOutcome::Failed { reason } => {
            debug!(%reason, "Address lookup failed");
            show_error(state, target, &FieldError::LookupFailed, effects);
        }
    }
}

fn fill_address(state: &mut FormState, address: AddressResult, effects: &mut Vec<Effect>) {
    let fields = [
        (FieldId::Street, address.street),
        (FieldId::Neighborhood, address.neighborhood),
        (FieldId::City, address.city),
        (FieldId::State, address.state),
    ];

    for (field, value) in fields {
        set_value(state, field, value.unwrap_or_default(), effects);
    }
}

fn on_select_track(
    state: &mut FormState,
    ctx: &FormContext,
    track: String,
    effects: &mut Vec<Effect>,
) {
    if !ctx.registry.is_track(&track) {
        warn!(%track, "Ignoring unknown track");
        return;
    }

    state.track = Some(track);
    clear(state, Target::Track, effects);
}

fn on_attach(
    state: &mut FormState,
    slot: AttachmentSlot,
    file_name: Option<String>,
    effects: &mut Vec<Effect>,
) {
    match file_name.filter(|n| !n.is_empty()) {
        Some(name) => {
            state.attachments.attach(slot, name.clone());
            effects.push(Effect::SetAttachmentLabel {
                slot,
                file_name: Some(name),
            });
        }
        None => {
            state.attachments.clear(slot);
            effects.push(Effect::SetAttachmentLabel {
                slot,
                file_name: None,
            });
        }
    }
}

/// Snapshot every field, the chosen track and the attachment names.
pub fn capture_draft(state: &FormState) -> DraftRecord {
    let mut draft = DraftRecord::new();

    for field in FieldId::ALL {
        draft.insert(field.key(), state.value(field));
    }

    if let Some(track) = state.track() {
        draft.insert(TRACK_KEY, track);
    }

    for slot in AttachmentSlot::ALL {
        draft.insert(slot.key(), state.attachments.display_name(slot).unwrap_or(""));
    }

    draft
}

fn on_save_draft(state: &FormState, effects: &mut Vec<Effect>) {
    effects.push(Effect::PersistDraft {
        draft: capture_draft(state),
    });
    effects.push(Effect::Notify {
        message: DRAFT_SAVED_MESSAGE.to_string(),
    });
}

fn on_restore_draft(
    state: &mut FormState,
    ctx: &FormContext,
    draft: &DraftRecord,
    effects: &mut Vec<Effect>,
) {
    for (key, value) in draft.iter() {
        if let Some(field) = FieldId::from_key(key) {
            set_value(state, field, value.to_string(), effects);
        } else if key == TRACK_KEY {
            if ctx.registry.is_track(value) {
                state.track = Some(value.to_string());
                effects.push(Effect::SelectTrack {
                    track: value.to_string(),
                });
            } else {
                warn!(track = %value, "Saved draft names an unknown track");
            }
        } else if let Some(slot) = AttachmentSlot::from_key(key) {
            if !value.is_empty() {
                state.attachments.restore(slot, value);
                effects.push(Effect::SetAttachmentLabel {
                    slot,
                    file_name: Some(value.to_string()),
                });
            }
        } else {
            debug!(%key, "Ignoring unknown draft key");
        }
    }
}
