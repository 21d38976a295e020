//! Email availability abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Answers whether an email can still be registered.
///
/// Platform implementation:
/// - HTTP backend: [`RemoteBackend`](super::RemoteBackend)
#[async_trait]
pub trait EmailAvailabilityChecker: Send + Sync {
    /// `true` if no account uses `email` yet
    ///
    /// # Arguments
    /// * `email` - Address that already passed the pattern rule
    async fn is_available(&self, email: &str) -> CoreResult<bool>;
}
