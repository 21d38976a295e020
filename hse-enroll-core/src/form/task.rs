//! Scheduled email availability check

use std::fmt;

use tokio::task::JoinHandle;

use hse_enroll_api::mask_email;

use super::FormValidationCoordinator;
use crate::types::FieldValidity;

/// What happened to a finished check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCheckOutcome {
    /// The result was written to the email field.
    Applied(FieldValidity),
    /// The email changed after dispatch; the result (if any) was dropped.
    Superseded,
}

/// An availability check for one email edit.
///
/// Returned by [`FormValidationCoordinator::set_field`]. The caller either
/// awaits [`run`](Self::run) or hands it to the runtime with
/// [`spawn`](Self::spawn). Dropping it leaves the field `Pending` until the
/// next edit.
#[must_use = "the email stays Pending until the check runs"]
pub struct EmailCheckTask {
    coordinator: FormValidationCoordinator,
    seq: u64,
    email: String,
}

impl EmailCheckTask {
    pub(crate) fn new(coordinator: FormValidationCoordinator, seq: u64, email: String) -> Self {
        Self {
            coordinator,
            seq,
            email,
        }
    }

    /// Sequence number of the edit this check belongs to.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Debounce, check, then apply the result unless a newer edit arrived.
    ///
    /// No request is sent if the email changed during the debounce.
    pub async fn run(self) -> EmailCheckOutcome {
        let debounce = self.coordinator.config().email_check_debounce();
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }

        if !self.coordinator.is_current_email_seq(self.seq) {
            log::debug!(
                "Email check #{} for {} superseded before dispatch",
                self.seq,
                mask_email(&self.email)
            );
            return EmailCheckOutcome::Superseded;
        }

        let available = self.coordinator.check_email_availability(&self.email).await;
        self.coordinator.apply_email_result(self.seq, available)
    }

    /// Run on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<EmailCheckOutcome> {
        tokio::spawn(self.run())
    }
}

impl fmt::Debug for EmailCheckTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailCheckTask")
            .field("seq", &self.seq)
            .field("email", &mask_email(&self.email))
            .finish_non_exhaustive()
    }
}
