//! `EnrollmentApi` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::{HttpUtils, LOG_PREFIX};
use crate::traits::EnrollmentApi;
use crate::types::{
    EmailAvailability, LoginRequest, LoginResponse, Program, RegistrationAck, RegistrationRequest,
};
use crate::utils::log_sanitizer::mask_email;

use super::{CHECK_EMAIL_PATH, HttpEnrollmentClient, LOGIN_PATH, PROGRAMS_PATH, REGISTER_PATH};

#[async_trait]
impl EnrollmentApi for HttpEnrollmentClient {
    async fn list_programs(&self) -> Result<Vec<Program>> {
        let url = self.endpoint(PROGRAMS_PATH)?;
        let programs: Vec<Program> = self.get_json(url).await?;
        log::debug!("{LOG_PREFIX} Loaded {} programs", programs.len());
        Ok(programs)
    }

    async fn check_email(&self, email: &str) -> Result<bool> {
        let mut url = self.endpoint(CHECK_EMAIL_PATH)?;
        url.query_pairs_mut().append_pair("email", email);

        let availability: EmailAvailability = self.get_json(url).await?;
        log::debug!(
            "{LOG_PREFIX} Email {} available: {}",
            mask_email(email),
            availability.available
        );
        Ok(availability.available)
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationAck> {
        let url = self.endpoint(REGISTER_PATH)?;
        let idempotency_key = uuid::Uuid::new_v4().to_string();
        log::info!(
            "{LOG_PREFIX} Registering {} (key {idempotency_key})",
            mask_email(&request.email)
        );

        let text = self
            .post_json(url, request, Some(&idempotency_key))
            .await?;

        if text.trim().is_empty() {
            return Ok(RegistrationAck::default());
        }
        HttpUtils::parse_json(&text)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let url = self.endpoint(LOGIN_PATH)?;
        log::info!("{LOG_PREFIX} Logging in {}", mask_email(&request.email));

        let text = self.post_json(url, request, None).await?;
        HttpUtils::parse_json(&text)
    }
}
