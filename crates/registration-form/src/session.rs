//! Runs the pure form handler against real storage and lookups.

use crate::error::AppResult;
use crate::sink::EffectSink;
use cep_client::{Address, AddressLookup, CepError};
use chrono::Local;
use registration_core::{
    handle, AddressResult, Effect, FieldError, FieldRegistry, FormContext, FormEvent, FormState,
    LookupOutcome,
};
use registration_store::{Store, StoreError};
use std::collections::VecDeque;
use tracing::{debug, error, info, instrument, warn};

pub const DRAFT_SAVE_FAILED_MESSAGE: &str = "Could not save your data. Please try again.";

/// What to do with the rest of an effect batch.
enum Flow {
    Continue,
    /// Handle this event once the current batch is done.
    Then(FormEvent),
    /// Drop the remaining effects, optionally handling an event instead.
    Abort(Option<FormEvent>),
}

/// One open registration page.
pub struct Session<L> {
    state: FormState,
    ctx: FormContext,
    store: Store,
    lookup: L,
    dark_mode: bool,
}

impl<L: AddressLookup> Session<L> {
    pub fn new(
        registry: FieldRegistry,
        login_destination: impl Into<String>,
        store: Store,
        lookup: L,
    ) -> Self {
        Self {
            state: FormState::new(),
            ctx: FormContext {
                registry,
                today: Local::now().date_naive(),
                login_destination: login_destination.into(),
            },
            store,
            lookup,
            dark_mode: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Page ready: apply the theme preference and restore any saved draft.
    pub async fn start(&mut self, sink: &mut dyn EffectSink) -> AppResult<()> {
        self.dark_mode = self.store.dark_mode().await;
        if self.dark_mode {
            sink.theme(true)?;
        }

        if let Some(draft) = self.store.load_draft().await {
            info!("Restoring saved draft");
            self.dispatch(FormEvent::RestoreDraft { draft }, sink).await?;
        }
        Ok(())
    }

    pub async fn toggle_dark_mode(&mut self, sink: &mut dyn EffectSink) -> AppResult<bool> {
        let enabled = !self.dark_mode;
        self.store.set_dark_mode(enabled).await?;
        self.dark_mode = enabled;
        sink.theme(enabled)?;
        Ok(enabled)
    }

    /// Feed one event through the form and carry out its effects.
    pub async fn dispatch(&mut self, event: FormEvent, sink: &mut dyn EffectSink) -> AppResult<()> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            self.ctx.today = Local::now().date_naive();

            let state = std::mem::take(&mut self.state);
            let (state, effects) = handle(state, event, &self.ctx);
            self.state = state;

            for effect in effects {
                match self.execute(effect, sink).await? {
                    Flow::Continue => {}
                    Flow::Then(next) => queue.push_back(next),
                    Flow::Abort(next) => {
                        queue.extend(next);
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect, sink: &mut dyn EffectSink) -> AppResult<Flow> {
        match effect {
            Effect::StartLookup { cep, generation } => {
                let outcome = self.resolve(&cep).await;
                Ok(Flow::Then(FormEvent::LookupCompleted {
                    generation,
                    outcome,
                }))
            }
            Effect::PersistDraft { draft } => match self.store.save_draft(&draft).await {
                Ok(()) => Ok(Flow::Continue),
                Err(e) => {
                    error!("Failed to save draft: {}", e);
                    sink.emit(&Effect::Notify {
                        message: DRAFT_SAVE_FAILED_MESSAGE.to_string(),
                    })?;
                    Ok(Flow::Abort(None))
                }
            },
            Effect::ClearDraft => {
                if let Err(e) = self.store.clear_draft().await {
                    warn!("Failed to clear draft: {}", e);
                }
                Ok(Flow::Continue)
            }
            Effect::PersistUser { user } => match self.store.register_user(&user).await {
                Ok(()) => Ok(Flow::Continue),
                Err(e) => {
                    let reason = match e {
                        StoreError::EmptyUserId => FieldError::UserIdEmpty,
                        StoreError::UserExists(_) | StoreError::ReservedKey(_) => {
                            FieldError::UserIdTaken
                        }
                        other => {
                            error!("Failed to store user: {}", other);
                            FieldError::SaveFailed
                        }
                    };
                    debug!(?reason, "Registration refused by store");
                    Ok(Flow::Abort(Some(FormEvent::RegistrationRejected { reason })))
                }
            },
            ui => {
                sink.emit(&ui)?;
                Ok(Flow::Continue)
            }
        }
    }

    #[instrument(skip(self))]
    async fn resolve(&self, cep: &str) -> LookupOutcome {
        match self.lookup.lookup(cep).await {
            Ok(address) => LookupOutcome::Found {
                address: to_address_result(address),
            },
            Err(CepError::NotFound(_)) => LookupOutcome::NotFound,
            Err(e) => {
                warn!("CEP lookup error: {}", e);
                LookupOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn to_address_result(address: Address) -> AddressResult {
    AddressResult {
        street: address.street,
        neighborhood: address.neighborhood,
        city: address.city,
        state: address.state,
    }
}
