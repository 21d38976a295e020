//! Request helpers for [`HttpEnrollmentClient`]

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http_client::{HttpUtils, LOG_PREFIX};

use super::HttpEnrollmentClient;
use super::error::map_status_error;

/// Header carrying a per-submission key so retried POSTs are deduplicated server-side.
pub(crate) const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

impl HttpEnrollmentClient {
    /// GET and parse a JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self.client.get(url.clone());
        let text = self.send(request, "GET", &url).await?;
        HttpUtils::parse_json(&text)
    }

    /// POST a JSON body and return the raw response text.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<String> {
        // Serialize up front so the body is a plain string and the request stays clonable
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError {
            detail: e.to_string(),
        })?;

        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }

        self.send(request, "POST", &url).await
    }

    /// Send with retries; non-2xx statuses become mapped errors.
    async fn send(&self, request: RequestBuilder, method: &str, url: &Url) -> Result<String> {
        let (status, text) =
            HttpUtils::execute_request_with_retry(request, method, url.as_str(), self.max_retries)
                .await?;

        if (200..300).contains(&status) {
            return Ok(text);
        }

        let err = map_status_error(status, url.path(), &text);
        if err.is_expected() {
            log::warn!("{LOG_PREFIX} {method} {} failed: {err}", url.path());
        } else {
            log::error!("{LOG_PREFIX} {method} {} failed: {err}", url.path());
        }
        Err(err)
    }
}
