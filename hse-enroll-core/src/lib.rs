//! HSE Enroll Core Library
//!
//! Business logic behind the enrollment registration and login screens:
//! - Registration form validation (`FormValidationCoordinator`)
//! - Program directory (`ProgramService`)
//! - Login (`LoginService`)
//!
//! The backend is abstracted through capability traits, so the same logic
//! runs against the HTTP API ([`RemoteBackend`]) or any other implementation.

pub mod error;
pub mod form;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, SubmitError};
pub use form::{CoordinatorConfig, EmailCheckOutcome, EmailCheckTask, FormValidationCoordinator};
pub use services::ServiceContext;
pub use traits::{
    Authenticator, EmailAvailabilityChecker, ProgramDirectory, RegistrationSubmitter,
    RemoteBackend,
};
