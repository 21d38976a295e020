//! Capability traits backed by the enrollment HTTP API

use std::sync::Arc;

use async_trait::async_trait;

use hse_enroll_api::EnrollmentApi;

use super::{Authenticator, EmailAvailabilityChecker, ProgramDirectory, RegistrationSubmitter};
use crate::error::CoreResult;
use crate::types::{LoginRequest, LoginResponse, Program, RegistrationAck, RegistrationRequest};

/// Remote backend
///
/// Default implementation of every capability trait, forwarding to an
/// [`EnrollmentApi`]. API errors are passed through as `CoreError::Api`.
#[derive(Clone)]
pub struct RemoteBackend {
    api: Arc<dyn EnrollmentApi>,
}

impl RemoteBackend {
    #[must_use]
    pub fn new(api: Arc<dyn EnrollmentApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EmailAvailabilityChecker for RemoteBackend {
    async fn is_available(&self, email: &str) -> CoreResult<bool> {
        Ok(self.api.check_email(email).await?)
    }
}

#[async_trait]
impl RegistrationSubmitter for RemoteBackend {
    async fn submit(&self, request: &RegistrationRequest) -> CoreResult<RegistrationAck> {
        Ok(self.api.register(request).await?)
    }
}

#[async_trait]
impl ProgramDirectory for RemoteBackend {
    async fn list_programs(&self) -> CoreResult<Vec<Program>> {
        Ok(self.api.list_programs().await?)
    }
}

#[async_trait]
impl Authenticator for RemoteBackend {
    async fn login(&self, request: &LoginRequest) -> CoreResult<LoginResponse> {
        Ok(self.api.login(request).await?)
    }
}
