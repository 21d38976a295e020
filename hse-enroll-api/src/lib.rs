//! # hse-enroll-api
//!
//! HTTP client for the HSE enrollment backend used by the registration and
//! login screens.
//!
//! ## Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET`  | `programs` | Programs available for admission |
//! | `GET`  | `auth/check-email?email=..` | Email availability (`{"available": bool}`) |
//! | `POST` | `auth/register` | Registration submission |
//! | `POST` | `auth/login` | Authentication |
//!
//! Paths are resolved relative to [`ApiConfig::base_url`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hse_enroll_api::{ApiConfig, EnrollmentApi, HttpEnrollmentClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpEnrollmentClient::new(&ApiConfig::default())?;
//!
//!     for program in client.list_programs().await? {
//!         println!("{} {}", program.id, program.name);
//!     }
//!
//!     let free = client.check_email("ivanov@edu.hse.ru").await?;
//!     println!("available: {free}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, ApiError>`](ApiError):
//!
//! - [`ApiError::Conflict`]: e.g. the email is already registered
//! - [`ApiError::Unauthorized`]: wrong email or password
//! - [`ApiError::InvalidRequest`]: server-side validation failed
//! - [`ApiError::NetworkError`] / [`ApiError::Timeout`]: transport failure (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff up to [`ApiConfig::max_retries`] times.
//! Registration requests carry an `Idempotency-Key` header so a retried
//! submission cannot create a second account.

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

pub use client::HttpEnrollmentClient;

pub use http_client::is_retryable;

pub use traits::EnrollmentApi;

pub use types::{
    ApiConfig, DEFAULT_BASE_URL, EmailAvailability, LoginRequest, LoginResponse, Program,
    RegistrationAck, RegistrationRequest,
};

pub use utils::log_sanitizer::mask_email;
