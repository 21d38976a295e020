use serde::{Deserialize, Serialize};

/// Unified error type for all enrollment backend calls.
///
/// All variants are serializable so frontends can forward them as structured
/// error payloads.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues, gateway errors
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): too many requests
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused,
    /// HTTP 502/503/504, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The backend rejected the request because of rate limiting (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The request was malformed or failed server-side validation (HTTP 400/422).
    InvalidRequest {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the backend.
        message: String,
    },

    /// Authentication failed (HTTP 401/403), e.g. wrong email or password.
    Unauthorized {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The requested endpoint or resource does not exist (HTTP 404).
    NotFound {
        /// Request path that was not found.
        path: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The request conflicts with existing data (HTTP 409), e.g. the email is
    /// already registered.
    Conflict {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend failed to process the request (HTTP 5xx other than gateway errors).
    Server {
        /// HTTP status code.
        status: u16,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the backend response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client configuration is unusable (bad base URL, TLS backend failure).
    InvalidConfig {
        /// Details about the configuration problem.
        detail: String,
    },

    /// An unrecognized error response.
    Unknown {
        /// HTTP status code, if the error came from a response.
        status: Option<u16>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (user input, taken email, wrong password),
    /// used for log level selection.
    ///
    /// Use `warn` when this returns `true` and `error` otherwise.
    /// **Update this method when adding new variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::Unauthorized { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
        )
    }

    /// Human-readable message returned by the backend, if the error carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { message, .. } => Some(message.as_str()),
            Self::RateLimited { raw_message, .. }
            | Self::Unauthorized { raw_message }
            | Self::NotFound { raw_message, .. }
            | Self::Conflict { raw_message }
            | Self::Server { raw_message, .. } => raw_message.as_deref(),
            Self::Unknown { raw_message, .. } => Some(raw_message.as_str()),
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. }
            | Self::InvalidConfig { .. } => None,
        }
        .filter(|msg| !msg.trim().is_empty())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::InvalidRequest { status, message } => {
                write!(f, "Invalid request (HTTP {status}): {message}")
            }
            Self::Unauthorized { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Unauthorized: {msg}")
                } else {
                    write!(f, "Unauthorized")
                }
            }
            Self::NotFound { path, .. } => write!(f, "Not found: {path}"),
            Self::Conflict { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Conflict: {msg}")
                } else {
                    write!(f, "Conflict")
                }
            }
            Self::Server {
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Server error (HTTP {status}): {msg}")
                } else {
                    write!(f, "Server error (HTTP {status})")
                }
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::InvalidConfig { detail } => write!(f, "Invalid client configuration: {detail}"),
            Self::Unknown { raw_message, .. } => write!(f, "{raw_message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
