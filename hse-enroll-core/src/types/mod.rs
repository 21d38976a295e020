//! Type definitions

mod form;

pub use form::{FieldValidity, FormField, FormState, SubmissionState, ValidationSnapshot};

// Re-export the public types of the API library
pub use hse_enroll_api::{LoginRequest, LoginResponse, Program, RegistrationAck, RegistrationRequest};
