//! Registration submission abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{RegistrationAck, RegistrationRequest};

#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    /// Submit a complete registration form
    ///
    /// # Arguments
    /// * `request` - Every form value, as entered
    async fn submit(&self, request: &RegistrationRequest) -> CoreResult<RegistrationAck>;
}
