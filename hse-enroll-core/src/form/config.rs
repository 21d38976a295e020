//! Coordinator tuning

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EMAIL_CHECK_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_EMAIL_CHECK_TIMEOUT_MS: u64 = 10_000;

/// Timing of the email availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoordinatorConfig {
    /// Quiet period after the last email edit before the check is sent (0 disables)
    pub email_check_debounce_ms: u64,
    /// Upper bound on one check; a slower answer counts as unavailable
    pub email_check_timeout_ms: u64,
}

impl CoordinatorConfig {
    pub fn email_check_debounce(&self) -> Duration {
        Duration::from_millis(self.email_check_debounce_ms)
    }

    pub fn email_check_timeout(&self) -> Duration {
        Duration::from_millis(self.email_check_timeout_ms)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            email_check_debounce_ms: DEFAULT_EMAIL_CHECK_DEBOUNCE_MS,
            email_check_timeout_ms: DEFAULT_EMAIL_CHECK_TIMEOUT_MS,
        }
    }
}
