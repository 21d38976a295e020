//! Login service

use std::sync::Arc;

use hse_enroll_api::{ApiError, mask_email};

use crate::error::{CoreError, CoreResult};
use crate::form::rules::REQUIRED;
use crate::services::ServiceContext;
use crate::types::{LoginRequest, LoginResponse};

/// Login service
pub struct LoginService {
    ctx: Arc<ServiceContext>,
}

impl LoginService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Authenticate with email and password
    ///
    /// Empty inputs are rejected before any request is made. A rejected
    /// password is reported as [`CoreError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<LoginResponse> {
        if email.trim().is_empty() {
            return Err(CoreError::validation("email", REQUIRED));
        }
        if password.is_empty() {
            return Err(CoreError::validation("password", REQUIRED));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.ctx.authenticator.login(&request).await {
            Ok(response) => {
                log::info!("Logged in as {}", mask_email(email));
                Ok(response)
            }
            Err(CoreError::Api(ApiError::Unauthorized { .. })) => {
                log::warn!("Login rejected for {}", mask_email(email));
                Err(CoreError::InvalidCredentials)
            }
            Err(e) => {
                log::error!("Login failed for {}: {e}", mask_email(email));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockAuthenticator, create_test_context_with_auth};

    const EMAIL: &str = "ivanov@edu.hse.ru";

    fn service() -> (LoginService, Arc<MockAuthenticator>) {
        let auth = Arc::new(MockAuthenticator::accepting(EMAIL, "secret"));
        (LoginService::new(create_test_context_with_auth(auth.clone())), auth)
    }

    #[tokio::test]
    async fn correct_credentials_return_token() {
        let (svc, _) = service();
        let response = svc.login(EMAIL, "secret").await.unwrap();
        assert_eq!(response.token, "test-token");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (svc, auth) = service();
        let err = svc.login(EMAIL, "wrong").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials), "got {err:?}");
        assert_eq!(auth.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_inputs_never_reach_backend() {
        let (svc, auth) = service();

        let err = svc.login("  ", "secret").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "email"));

        let err = svc.login(EMAIL, "").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "password"));

        assert_eq!(auth.call_count(), 0);
    }
}
