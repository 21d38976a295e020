//! Backend error mapping

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Error body shapes the backend produces: `{"message": ..}`, `{"error": ..}`
/// or `{"detail": ..}` where `detail` is a string or a list of validation items.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    error: Option<String>,
    detail: Option<Value>,
}

/// Extract the human-readable message from an error body.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(payload) = serde_json::from_str::<ErrorPayload>(trimmed) else {
        // Plain-text error pages; HTML is useless to the user
        return (!trimmed.starts_with('<')).then(|| trimmed.to_string());
    };

    payload
        .message
        .or(payload.error)
        .or_else(|| payload.detail.as_ref().and_then(detail_message))
        .filter(|msg| !msg.trim().is_empty())
}

/// Flatten a `detail` value: plain string, or a list of `{"msg": ..}` items.
fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Map a non-2xx response to a unified error.
///
/// 429 and 502-504 never reach here; `HttpUtils::execute_request` handles them.
pub(crate) fn map_status_error(status: u16, path: &str, body: &str) -> ApiError {
    let raw_message = extract_message(body);

    match status {
        400 | 422 => ApiError::InvalidRequest {
            status,
            message: raw_message.unwrap_or_else(|| "Request rejected by server".to_string()),
        },
        401 | 403 => ApiError::Unauthorized { raw_message },
        404 => ApiError::NotFound {
            path: path.to_string(),
            raw_message,
        },
        409 => ApiError::Conflict { raw_message },
        500..=599 => ApiError::Server {
            status,
            raw_message,
        },
        _ => ApiError::Unknown {
            status: Some(status),
            raw_message: raw_message.unwrap_or_else(|| format!("Unexpected HTTP status {status}")),
        },
    }
}
