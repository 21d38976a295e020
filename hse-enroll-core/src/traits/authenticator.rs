//! Authentication abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{LoginRequest, LoginResponse};

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a session token
    ///
    /// # Arguments
    /// * `request` - Email and password
    async fn login(&self, request: &LoginRequest) -> CoreResult<LoginResponse>;
}
