use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LoginRequest, LoginResponse, Program, RegistrationAck, RegistrationRequest};

/// Enrollment backend API
///
/// One method per backend endpoint. [`HttpEnrollmentClient`](crate::HttpEnrollmentClient)
/// is the production implementation; frontends and tests may provide their own.
#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    /// List programs available for admission, in backend order.
    async fn list_programs(&self) -> Result<Vec<Program>>;

    /// Ask whether an email is still free for registration.
    ///
    /// Returns `Ok(false)` when the email is taken. Transport failures are
    /// returned as errors; callers decide how to treat them.
    async fn check_email(&self, email: &str) -> Result<bool>;

    /// Submit a registration.
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationAck>;

    /// Authenticate an existing student.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
}
