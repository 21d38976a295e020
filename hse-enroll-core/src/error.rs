//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use hse_enroll_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Unknown form field name
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Field-level validation error
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Program directory could not be loaded
    #[error("Programs are unavailable: {0}")]
    ProgramsUnavailable(String),

    /// Login rejected
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Backend error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, wrong password, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownField(_) | Self::Validation { .. } | Self::InvalidCredentials => true,
            Self::Api(e) => e.is_expected(),
            Self::ProgramsUnavailable(_) => false,
        }
    }

    /// Shorthand for a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Why `FormValidationCoordinator::submit` did not produce an acknowledgment.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "message")]
pub enum SubmitError {
    /// Some required field is not `Valid` yet (invalid, pending or untouched).
    #[error("The form is not ready for submission")]
    NotSubmittable,

    /// A submission is already in flight.
    #[error("Registration is already in progress")]
    AlreadySubmitting,

    /// The form was already submitted successfully.
    #[error("Registration has already been completed")]
    AlreadySubmitted,

    /// The backend rejected the registration or could not be reached.
    #[error("{message}")]
    Rejected { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_classification() {
        let conflict = CoreError::from(ApiError::Conflict { raw_message: None });
        assert!(conflict.is_expected());

        let server = CoreError::from(ApiError::Server {
            status: 500,
            raw_message: None,
        });
        assert!(!server.is_expected());
    }

    #[test]
    fn core_variants_classification() {
        assert!(CoreError::InvalidCredentials.is_expected());
        assert!(CoreError::UnknownField("nickname".into()).is_expected());
        assert!(CoreError::validation("email", "field is required").is_expected());
        assert!(!CoreError::ProgramsUnavailable("HTTP 500".into()).is_expected());
    }

    #[test]
    fn validation_error_display() {
        let e = CoreError::validation("email", "field is required");
        assert_eq!(e.to_string(), "Validation error: email: field is required");
    }

    #[test]
    fn serialize_with_code_tag() {
        let json = serde_json::to_string(&CoreError::InvalidCredentials).unwrap();
        assert_eq!(json, r#"{"code":"InvalidCredentials"}"#);

        let json = serde_json::to_string(&SubmitError::Rejected {
            message: "Email already registered".into(),
        })
        .unwrap();
        assert!(json.contains(r#""code":"Rejected""#));
    }
}
