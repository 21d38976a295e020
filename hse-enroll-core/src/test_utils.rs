//! Test helper module
//!
//! Mock capability implementations and factory helpers.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use hse_enroll_api::ApiError;

use crate::error::{CoreError, CoreResult};
use crate::form::{CoordinatorConfig, EmailCheckTask, FormValidationCoordinator};
use crate::services::ServiceContext;
use crate::traits::{
    Authenticator, EmailAvailabilityChecker, ProgramDirectory, RegistrationSubmitter,
};
use crate::types::{
    FormField, LoginRequest, LoginResponse, Program, RegistrationAck, RegistrationRequest,
};

// ===== MockEmailChecker =====

#[derive(Default)]
pub struct MockEmailChecker {
    taken: Mutex<HashSet<String>>,
    failing: AtomicBool,
    checked: Mutex<Vec<String>>,
    /// Calls for these emails wait until the gate is notified
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockEmailChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_taken(&self, email: &str) {
        self.taken.lock().unwrap().insert(email.to_string());
    }

    /// Every check fails with a network error while set
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Block checks for `email` until the returned gate is notified
    pub fn hold(&self, email: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(email.to_string(), gate.clone());
        gate
    }

    pub fn call_count(&self) -> usize {
        self.checked.lock().unwrap().len()
    }

    /// Emails that reached the checker, in call order
    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailAvailabilityChecker for MockEmailChecker {
    async fn is_available(&self, email: &str) -> CoreResult<bool> {
        self.checked.lock().unwrap().push(email.to_string());

        let gate = self.gates.lock().unwrap().get(email).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Api(ApiError::NetworkError {
                detail: "connection refused".to_string(),
            }));
        }
        Ok(!self.taken.lock().unwrap().contains(email))
    }
}

// ===== MockSubmitter =====

#[derive(Default)]
pub struct MockSubmitter {
    calls: AtomicUsize,
    last_request: Mutex<Option<RegistrationRequest>>,
    /// If Some, submit returns this error
    failure: Mutex<Option<CoreError>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, err: Option<CoreError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// Block submissions until the returned gate is notified
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RegistrationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationSubmitter for MockSubmitter {
    async fn submit(&self, request: &RegistrationRequest) -> CoreResult<RegistrationAck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(RegistrationAck {
            user_id: Some(1),
            message: Some("Registered".to_string()),
        })
    }
}

// ===== MockProgramDirectory =====

pub struct MockProgramDirectory {
    programs: Vec<Program>,
    failure: Option<ApiError>,
}

impl MockProgramDirectory {
    pub fn with_programs(programs: Vec<Program>) -> Self {
        Self {
            programs,
            failure: None,
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            programs: Vec::new(),
            failure: Some(err),
        }
    }
}

#[async_trait]
impl ProgramDirectory for MockProgramDirectory {
    async fn list_programs(&self) -> CoreResult<Vec<Program>> {
        match &self.failure {
            Some(err) => Err(CoreError::Api(err.clone())),
            None => Ok(self.programs.clone()),
        }
    }
}

// ===== MockAuthenticator =====

/// Accepts exactly one email/password pair
pub struct MockAuthenticator {
    email: String,
    password: String,
    calls: AtomicUsize,
}

impl MockAuthenticator {
    pub fn accepting(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, request: &LoginRequest) -> CoreResult<LoginResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.email == self.email && request.password == self.password {
            Ok(LoginResponse {
                token: "test-token".to_string(),
                token_type: Some("bearer".to_string()),
                expires_at: None,
            })
        } else {
            Err(CoreError::Api(ApiError::Unauthorized {
                raw_message: Some("Invalid credentials".to_string()),
            }))
        }
    }
}

// ===== Factory helpers =====

pub fn no_debounce() -> CoordinatorConfig {
    CoordinatorConfig {
        email_check_debounce_ms: 0,
        ..CoordinatorConfig::default()
    }
}

pub fn create_test_coordinator(
    config: CoordinatorConfig,
) -> (
    FormValidationCoordinator,
    Arc<MockEmailChecker>,
    Arc<MockSubmitter>,
) {
    let checker = Arc::new(MockEmailChecker::new());
    let submitter = Arc::new(MockSubmitter::new());
    let coordinator = FormValidationCoordinator::new(checker.clone(), submitter.clone(), config);
    (coordinator, checker, submitter)
}

/// Fill every field with valid values; returns the pending email check.
pub fn fill_valid_form(coordinator: &FormValidationCoordinator) -> Option<EmailCheckTask> {
    coordinator.set_field(FormField::Surname, "Ivanov");
    coordinator.set_field(FormField::Name, "Ivan");
    coordinator.set_field(FormField::Patronymic, "Ivanovich");
    coordinator.set_field(FormField::ProgramId, "3");
    coordinator.set_field(FormField::YearAdmission, "2024");
    coordinator.set_field(FormField::Group, "BPI241");
    coordinator.set_field(FormField::Email, "ivanov@edu.hse.ru")
}

/// Service context with mock capabilities and the given program directory
pub fn create_test_context(directory: Arc<dyn ProgramDirectory>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(MockEmailChecker::new()),
        Arc::new(MockSubmitter::new()),
        directory,
        Arc::new(MockAuthenticator::accepting("ivanov@edu.hse.ru", "secret")),
    ))
}

/// Service context with mock capabilities and the given authenticator
pub fn create_test_context_with_auth(auth: Arc<dyn Authenticator>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(MockEmailChecker::new()),
        Arc::new(MockSubmitter::new()),
        Arc::new(MockProgramDirectory::with_programs(Vec::new())),
        auth,
    ))
}
