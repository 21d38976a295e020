//! HTTP implementation of [`EnrollmentApi`](crate::EnrollmentApi)

mod api;
mod error;
mod http;

pub(crate) use error::extract_message;

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::{ApiError, Result};
use crate::types::ApiConfig;

pub(crate) const PROGRAMS_PATH: &str = "programs";
pub(crate) const CHECK_EMAIL_PATH: &str = "auth/check-email";
pub(crate) const REGISTER_PATH: &str = "auth/register";
pub(crate) const LOGIN_PATH: &str = "auth/login";

/// Enrollment backend client over `reqwest`.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools connections.
pub struct HttpEnrollmentClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) max_retries: u32,
}

impl HttpEnrollmentClient {
    /// Build a client with the timeouts from `config`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::InvalidConfig {
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Self::with_client(client, config)
    }

    /// Build a client around an existing `reqwest::Client`. Timeouts in `config` are ignored.
    pub fn with_client(client: Client, config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            max_retries: config.max_retries,
        })
    }

    /// Normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidConfig {
                detail: format!("cannot resolve endpoint '{path}': {e}"),
            })
    }
}

/// Parse and normalize the base URL so relative endpoint paths append to it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    // Url::join replaces the last segment unless the base ends with '/'
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidConfig {
        detail: format!("invalid base URL '{raw}': {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidConfig {
            detail: format!("unsupported URL scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = HttpEnrollmentClient::new(&config("https://enroll.example/api")).unwrap();
        assert_eq!(client.base_url().as_str(), "https://enroll.example/api/");
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let client = HttpEnrollmentClient::new(&config("https://enroll.example/api/")).unwrap();
        let url = client.endpoint(CHECK_EMAIL_PATH).unwrap();
        assert_eq!(url.as_str(), "https://enroll.example/api/auth/check-email");
    }

    #[test]
    fn rejects_garbage_base_url() {
        let result = HttpEnrollmentClient::new(&config("not a url"));
        assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let result = HttpEnrollmentClient::new(&config("ftp://enroll.example/"));
        assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));
    }
}
