//! Business logic service layer

mod login_service;
mod program_service;

pub use login_service::LoginService;
pub use program_service::ProgramService;

use std::sync::Arc;

use hse_enroll_api::EnrollmentApi;

use crate::form::{CoordinatorConfig, FormValidationCoordinator};
use crate::traits::{
    Authenticator, EmailAvailabilityChecker, ProgramDirectory, RegistrationSubmitter,
    RemoteBackend,
};

/// Service context - holds all backend capabilities
///
/// The platform layer creates this context and injects the implementations,
/// usually one [`RemoteBackend`] behind every capability.
pub struct ServiceContext {
    /// Email availability check
    pub email_checker: Arc<dyn EmailAvailabilityChecker>,
    /// Registration submission
    pub registration_submitter: Arc<dyn RegistrationSubmitter>,
    /// Program directory
    pub program_directory: Arc<dyn ProgramDirectory>,
    /// Authentication
    pub authenticator: Arc<dyn Authenticator>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        email_checker: Arc<dyn EmailAvailabilityChecker>,
        registration_submitter: Arc<dyn RegistrationSubmitter>,
        program_directory: Arc<dyn ProgramDirectory>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            email_checker,
            registration_submitter,
            program_directory,
            authenticator,
        }
    }

    /// Every capability served by one enrollment API client
    #[must_use]
    pub fn remote(api: Arc<dyn EnrollmentApi>) -> Self {
        let backend = Arc::new(RemoteBackend::new(api));
        Self::new(backend.clone(), backend.clone(), backend.clone(), backend)
    }

    /// Coordinator for a newly opened, empty registration form
    pub fn new_registration_form(&self, config: CoordinatorConfig) -> FormValidationCoordinator {
        FormValidationCoordinator::new(
            self.email_checker.clone(),
            self.registration_submitter.clone(),
            config,
        )
    }
}
