//! Registration form validation
//!
//! [`FormValidationCoordinator`] owns the form values and their validity.
//! Edits are applied synchronously; the only asynchronous work is the email
//! availability check (returned as an [`EmailCheckTask`]) and [`submit`].
//!
//! Every email edit bumps a sequence number. A check result is applied only
//! if its sequence number is still the latest, so a slow answer for an old
//! address can never overwrite the state of the current one.
//!
//! [`submit`]: FormValidationCoordinator::submit

mod config;
pub mod rules;
mod task;

pub use config::{CoordinatorConfig, DEFAULT_EMAIL_CHECK_DEBOUNCE_MS, DEFAULT_EMAIL_CHECK_TIMEOUT_MS};
pub use rules::validate_sync;
pub use task::{EmailCheckOutcome, EmailCheckTask};

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use hse_enroll_api::mask_email;

use crate::error::{CoreError, CoreResult, SubmitError};
use crate::traits::{EmailAvailabilityChecker, RegistrationSubmitter};
use crate::types::{
    FieldValidity, FormField, FormState, RegistrationAck, SubmissionState, ValidationSnapshot,
};

/// Shown when the backend rejected a registration without saying why.
pub const GENERIC_SUBMIT_FAILURE: &str = "Registration failed, please try again later";

struct FormInner {
    state: FormState,
    validity: BTreeMap<FormField, FieldValidity>,
    email_seq: u64,
    submission: SubmissionState,
}

impl FormInner {
    fn new() -> Self {
        let validity = FormField::ALL
            .into_iter()
            .map(|field| {
                let initial = if field.is_required() {
                    FieldValidity::Unvalidated
                } else {
                    FieldValidity::Valid
                };
                (field, initial)
            })
            .collect();
        Self {
            state: FormState::new(),
            validity,
            email_seq: 0,
            submission: SubmissionState::Idle,
        }
    }

    fn snapshot(&self) -> ValidationSnapshot {
        ValidationSnapshot::new(self.validity.clone(), self.submission.clone())
    }
}

/// Validation state machine for one registration form.
///
/// Cheap to clone; clones share the same form.
#[derive(Clone)]
pub struct FormValidationCoordinator {
    inner: Arc<Mutex<FormInner>>,
    checker: Arc<dyn EmailAvailabilityChecker>,
    submitter: Arc<dyn RegistrationSubmitter>,
    config: CoordinatorConfig,
    snapshots: Arc<watch::Sender<ValidationSnapshot>>,
}

impl FormValidationCoordinator {
    /// Create a coordinator for an empty form.
    #[must_use]
    pub fn new(
        checker: Arc<dyn EmailAvailabilityChecker>,
        submitter: Arc<dyn RegistrationSubmitter>,
        config: CoordinatorConfig,
    ) -> Self {
        let inner = FormInner::new();
        let (snapshots, _) = watch::channel(inner.snapshot());
        Self {
            inner: Arc::new(Mutex::new(inner)),
            checker,
            submitter,
            config,
            snapshots: Arc::new(snapshots),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Update one field and re-run its rule.
    ///
    /// For a well-formed email the field becomes `Pending` and the returned
    /// task must be run to resolve it. Every other edit returns `None`.
    pub fn set_field(&self, field: FormField, value: impl Into<String>) -> Option<EmailCheckTask> {
        let mut inner = self.lock();
        inner.state.set(field, value);
        inner.validity.insert(field, FieldValidity::Unvalidated);

        let validity = rules::validate_field(field, inner.state.get(field));
        let task = if field == FormField::Email {
            inner.email_seq += 1;
            self.schedule_email_check(&mut inner, validity)
        } else {
            inner.validity.insert(field, validity);
            None
        };

        self.publish(&inner);
        task
    }

    /// [`set_field`](Self::set_field) keyed by the wire name (`"programId"`, ..).
    pub fn set_field_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> CoreResult<Option<EmailCheckTask>> {
        let field: FormField = name.parse()?;
        Ok(self.set_field(field, value))
    }

    /// Re-run every sync rule, marking untouched required fields `Invalid`.
    ///
    /// A well-formed email that is not `Valid` yet gets a fresh check.
    /// A check still in flight is superseded by it.
    pub fn validate_all(&self) -> Option<EmailCheckTask> {
        let mut inner = self.lock();
        let mut task = None;

        for (field, validity) in rules::validate_sync(&inner.state) {
            if field == FormField::Email && validity.is_valid() {
                if inner.validity.get(&field) != Some(&FieldValidity::Valid) {
                    inner.email_seq += 1;
                    task = self.schedule_email_check(&mut inner, validity);
                }
                continue;
            }
            inner.validity.insert(field, validity);
        }

        self.publish(&inner);
        task
    }

    /// Current snapshot. Never performs I/O.
    pub fn snapshot(&self) -> ValidationSnapshot {
        self.lock().snapshot()
    }

    /// Receiver that observes every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ValidationSnapshot> {
        self.snapshots.subscribe()
    }

    /// Copy of the current field values.
    pub fn form_state(&self) -> FormState {
        self.lock().state.clone()
    }

    /// Ask the checker whether `email` is free.
    ///
    /// Errors and timeouts count as taken.
    pub async fn check_email_availability(&self, email: &str) -> bool {
        let timeout = self.config.email_check_timeout();
        match tokio::time::timeout(timeout, self.checker.is_available(email)).await {
            Ok(Ok(available)) => {
                log::debug!("Email {} available: {available}", mask_email(email));
                available
            }
            Ok(Err(e)) => {
                if e.is_expected() {
                    log::warn!("Email check for {} failed: {e}", mask_email(email));
                } else {
                    log::error!("Email check for {} failed: {e}", mask_email(email));
                }
                false
            }
            Err(_) => {
                log::warn!(
                    "Email check for {} timed out after {}ms",
                    mask_email(email),
                    timeout.as_millis()
                );
                false
            }
        }
    }

    /// Whether `seq` still belongs to the latest email edit.
    pub fn is_current_email_seq(&self, seq: u64) -> bool {
        self.lock().email_seq == seq
    }

    /// Submit the form.
    ///
    /// Only one submission can be in flight; concurrent calls are rejected
    /// without contacting the backend. After a failure the form may be
    /// submitted again.
    pub async fn submit(&self) -> Result<RegistrationAck, SubmitError> {
        let request = {
            let mut inner = self.lock();
            if !inner.submission.accepts_submit() {
                return Err(match inner.submission {
                    SubmissionState::Succeeded(_) => SubmitError::AlreadySubmitted,
                    _ => SubmitError::AlreadySubmitting,
                });
            }
            if !inner.snapshot().is_submittable() {
                return Err(SubmitError::NotSubmittable);
            }
            inner.submission = SubmissionState::Submitting;
            self.publish(&inner);
            inner.state.to_registration_request()
        };

        log::info!("Submitting registration for {}", mask_email(&request.email));
        let result = self.submitter.submit(&request).await;

        let mut inner = self.lock();
        match result {
            Ok(ack) => {
                log::info!(
                    "Registration accepted for {} (id: {:?})",
                    mask_email(&request.email),
                    ack.user_id
                );
                inner.submission = SubmissionState::Succeeded(ack.clone());
                self.publish(&inner);
                Ok(ack)
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Registration rejected: {e}");
                } else {
                    log::error!("Registration failed: {e}");
                }
                let message = submit_failure_message(&e);
                inner.submission = SubmissionState::Failed(message.clone());
                self.publish(&inner);
                Err(SubmitError::Rejected { message })
            }
        }
    }

    pub(crate) fn apply_email_result(&self, seq: u64, available: bool) -> EmailCheckOutcome {
        let mut inner = self.lock();
        if inner.email_seq != seq {
            log::debug!(
                "Dropping stale email check #{seq} (latest #{})",
                inner.email_seq
            );
            return EmailCheckOutcome::Superseded;
        }

        let validity = if available {
            FieldValidity::Valid
        } else {
            FieldValidity::Invalid(rules::EMAIL_TAKEN.to_string())
        };
        inner.validity.insert(FormField::Email, validity.clone());
        self.publish(&inner);
        EmailCheckOutcome::Applied(validity)
    }

    /// Set the email field from its sync result; `Pending` plus a task when it passed.
    fn schedule_email_check(
        &self,
        inner: &mut FormInner,
        validity: FieldValidity,
    ) -> Option<EmailCheckTask> {
        if !validity.is_valid() {
            inner.validity.insert(FormField::Email, validity);
            return None;
        }
        inner.validity.insert(FormField::Email, FieldValidity::Pending);
        Some(EmailCheckTask::new(
            self.clone(),
            inner.email_seq,
            inner.state.get(FormField::Email).to_string(),
        ))
    }

    fn publish(&self, inner: &FormInner) {
        self.snapshots.send_replace(inner.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn submit_failure_message(err: &CoreError) -> String {
    match err {
        CoreError::Api(api) => api.server_message(),
        _ => None,
    }
    .map_or_else(|| GENERIC_SUBMIT_FAILURE.to_string(), str::to_string)
}
