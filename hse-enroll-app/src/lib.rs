//! Platform-agnostic application bootstrap for the HSE enrollment client.
//!
//! Provides `AppConfig` (configuration file), `AppState` (service container)
//! and `AppStateBuilder` (backend injection).

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use hse_enroll_api::{EnrollmentApi, HttpEnrollmentClient};
use hse_enroll_core::error::CoreResult;
use hse_enroll_core::services::{LoginService, ProgramService, ServiceContext};
use hse_enroll_core::traits::{
    Authenticator, EmailAvailabilityChecker, ProgramDirectory, RegistrationSubmitter,
    RemoteBackend,
};
use hse_enroll_core::FormValidationCoordinator;

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Configuration the state was built from
    pub config: AppConfig,
    /// Service context (holds all backend capabilities)
    pub ctx: Arc<ServiceContext>,
    /// Program directory service
    pub program_service: ProgramService,
    /// Login service
    pub login_service: LoginService,
}

impl AppState {
    /// Coordinator for a newly opened registration form.
    ///
    /// Each call starts from an empty form; nothing is shared between forms.
    pub fn new_registration_form(&self) -> FormValidationCoordinator {
        self.ctx.new_registration_form(self.config.form)
    }
}

/// Builder for constructing `AppState`.
///
/// Every capability defaults to the HTTP backend described by
/// [`AppConfig::api`]. Custom implementations replace it per capability;
/// the HTTP client is only created if some capability still needs it.
pub struct AppStateBuilder {
    config: AppConfig,
    api: Option<Arc<dyn EnrollmentApi>>,
    email_checker: Option<Arc<dyn EmailAvailabilityChecker>>,
    registration_submitter: Option<Arc<dyn RegistrationSubmitter>>,
    program_directory: Option<Arc<dyn ProgramDirectory>>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            api: None,
            email_checker: None,
            registration_submitter: None,
            program_directory: None,
            authenticator: None,
        }
    }

    /// Use this API client instead of building one from the config.
    #[must_use]
    pub fn api(mut self, api: Arc<dyn EnrollmentApi>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn email_checker(mut self, checker: Arc<dyn EmailAvailabilityChecker>) -> Self {
        self.email_checker = Some(checker);
        self
    }

    #[must_use]
    pub fn registration_submitter(mut self, submitter: Arc<dyn RegistrationSubmitter>) -> Self {
        self.registration_submitter = Some(submitter);
        self
    }

    #[must_use]
    pub fn program_directory(mut self, directory: Arc<dyn ProgramDirectory>) -> Self {
        self.program_directory = Some(directory);
        self
    }

    #[must_use]
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::Api` if the HTTP client cannot be created
    /// (e.g. an invalid base URL).
    pub fn build(self) -> CoreResult<AppState> {
        let Self {
            config,
            api,
            email_checker,
            registration_submitter,
            program_directory,
            authenticator,
        } = self;

        let mut remote = LazyRemote::new(&config, api);

        let email_checker: Arc<dyn EmailAvailabilityChecker> = match email_checker {
            Some(custom) => custom,
            None => remote.get()?,
        };
        let registration_submitter: Arc<dyn RegistrationSubmitter> = match registration_submitter {
            Some(custom) => custom,
            None => remote.get()?,
        };
        let program_directory: Arc<dyn ProgramDirectory> = match program_directory {
            Some(custom) => custom,
            None => remote.get()?,
        };
        let authenticator: Arc<dyn Authenticator> = match authenticator {
            Some(custom) => custom,
            None => remote.get()?,
        };

        let ctx = Arc::new(ServiceContext::new(
            email_checker,
            registration_submitter,
            program_directory,
            authenticator,
        ));

        let program_service = ProgramService::new(Arc::clone(&ctx));
        let login_service = LoginService::new(Arc::clone(&ctx));

        log::info!("Enrollment client ready (backend: {})", config.api.base_url);

        Ok(AppState {
            config,
            ctx,
            program_service,
            login_service,
        })
    }
}

/// HTTP backend created on first use.
struct LazyRemote<'a> {
    config: &'a AppConfig,
    api: Option<Arc<dyn EnrollmentApi>>,
    backend: Option<Arc<RemoteBackend>>,
}

impl<'a> LazyRemote<'a> {
    fn new(config: &'a AppConfig, api: Option<Arc<dyn EnrollmentApi>>) -> Self {
        Self {
            config,
            api,
            backend: None,
        }
    }

    fn get(&mut self) -> CoreResult<Arc<RemoteBackend>> {
        if let Some(backend) = &self.backend {
            return Ok(Arc::clone(backend));
        }

        let api: Arc<dyn EnrollmentApi> = match self.api.take() {
            Some(api) => api,
            None => Arc::new(HttpEnrollmentClient::new(&self.config.api)?),
        };
        let backend = Arc::new(RemoteBackend::new(api));
        self.backend = Some(Arc::clone(&backend));
        Ok(backend)
    }
}
