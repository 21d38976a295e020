use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Client configuration ============

/// Default backend base URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Connection and retry settings for [`HttpEnrollmentClient`](crate::HttpEnrollmentClient).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    /// Backend base URL. Endpoint paths are resolved relative to it.
    pub base_url: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Retries for transient failures (0 disables retrying).
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_retries: 2,
        }
    }
}

// ============ Programs ============

/// An educational program offered for admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Program identifier, submitted as `programId` on registration.
    pub id: i64,
    /// Display name.
    pub name: String,
}

// ============ Email availability ============

/// Response of the email availability endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAvailability {
    /// `true` when no account uses the email yet.
    pub available: bool,
}

// ============ Registration ============

/// Registration payload.
///
/// Values are sent exactly as entered in the form; the backend owns
/// conversion of `program_id` and `year_admission`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub surname: String,
    pub name: String,
    /// Optional; sent as an empty string when not provided.
    pub patronymic: String,
    pub email: String,
    pub program_id: String,
    pub year_admission: String,
    pub group: String,
}

/// Acknowledgment returned by a successful registration.
///
/// The backend may answer with an empty body, in which case every field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationAck {
    /// Identifier of the created student account.
    #[serde(alias = "id")]
    pub user_id: Option<i64>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

// ============ Login ============

/// Login payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login result. Never persisted by this library.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    #[serde(alias = "access_token", alias = "accessToken")]
    pub token: String,
    /// Token type, usually `bearer`.
    #[serde(default, alias = "token_type")]
    pub token_type: Option<String>,
    /// Token expiry (RFC3339), if the backend reports one.
    #[serde(default, alias = "expires_at", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_partial_json_uses_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"baseUrl":"https://enroll.example/api/"}"#).unwrap();
        assert_eq!(config.base_url, "https://enroll.example/api/");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn registration_request_uses_form_keys() {
        let req = RegistrationRequest {
            surname: "Ivanov".into(),
            name: "Ivan".into(),
            patronymic: String::new(),
            email: "ivanov@edu.hse.ru".into(),
            program_id: "3".into(),
            year_admission: "2024".into(),
            group: "BPI241".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["programId"], "3");
        assert_eq!(json["yearAdmission"], "2024");
        assert_eq!(json["group"], "BPI241");
        assert_eq!(json["patronymic"], "");
    }

    #[test]
    fn registration_ack_accepts_id_alias() {
        let ack: RegistrationAck = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(ack.user_id, Some(42));
        assert_eq!(ack.message, None);
    }

    #[test]
    fn login_response_accepts_snake_case_token() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token":"abc","token_type":"bearer","expires_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.token_type.as_deref(), Some("bearer"));
        assert!(resp.expires_at.is_some());
    }

    #[test]
    fn login_expiry_is_rfc3339() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","expiresAt":"2026-01-01T03:00:00+03:00"}"#,
        )
        .unwrap();
        let expected = "2026-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(resp.expires_at, Some(expected));

        let resp: LoginResponse =
            serde_json::from_str(r#"{"token":"abc","expiresAt":null}"#).unwrap();
        assert_eq!(resp.expires_at, None);

        let numeric = r#"{"token":"abc","expiresAt":1767225600}"#;
        assert!(serde_json::from_str::<LoginResponse>(numeric).is_err());
    }

    #[test]
    fn login_debug_redacts_secrets() {
        let req = LoginRequest {
            email: "ivanov@edu.hse.ru".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{req:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("ivanov@edu.hse.ru"));
    }
}
