//! Shared HTTP plumbing for the console API.
//!
//! Sends requests, maps HTTP statuses to [`ApiError`] and unwraps the
//! `{status, message, data}` response envelope. Endpoints that answer with a
//! bare JSON payload are accepted too.

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Response body as returned by the server helpers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Envelope {
        #[allow(dead_code)]
        status: String,
        #[serde(default)]
        message: Option<String>,
        #[serde(default = "Option::default")]
        data: Option<T>,
    },
    Raw(T),
}

/// Error body: the envelope's `message`, or the legacy `{"error": ...}` shape.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and returns `(status, body)`.
    ///
    /// Transport failures become [`ApiError::NetworkError`] or
    /// [`ApiError::Timeout`]; HTTP 429 becomes [`ApiError::RateLimited`].
    /// Every other status is handed back to the caller.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method_name} {path} -> {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Rate limited (HTTP 429) on {path}, retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                retry_after,
                raw_message: error_message(&body),
            });
        }

        // Gateway failures are transient
        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Gateway error (HTTP {status_code}) on {path}");
            return Err(ApiError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Same as [`execute_request`](Self::execute_request) with retries for
    /// transient failures.
    ///
    /// Only use this for idempotent reads. Mutations must not be replayed.
    ///
    /// # Retry strategy
    /// - Retries `NetworkError`, `Timeout` and `RateLimited`
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    /// - `Retry-After` is honored for rate limits, capped at 30 seconds
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, path).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("Cannot clone request for {path}, disabling retry");
                return Self::execute_request(request_builder, method_name, path).await;
            };

            match Self::execute_request(req, method_name, path).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "{} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        method_name,
                        path,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Maps a non-2xx status to an [`ApiError`].
    ///
    /// `resource` names what the request addressed (e.g. `record 42`) and is
    /// used for 404s.
    pub fn check_status(status: u16, body: &str, resource: &str) -> Result<(), ApiError> {
        if (200..300).contains(&status) {
            return Ok(());
        }
        let raw_message = error_message(body);
        let error = match status {
            400 | 422 => ApiError::InvalidRequest { raw_message },
            401 => ApiError::Unauthorized { raw_message },
            403 => ApiError::Forbidden { raw_message },
            404 => ApiError::NotFound {
                resource: resource.to_string(),
                raw_message,
            },
            409 => ApiError::Conflict { raw_message },
            500..=599 => ApiError::ServerError {
                status,
                raw_message,
            },
            _ => ApiError::Unknown {
                status: Some(status),
                raw_message: raw_message.unwrap_or_default(),
            },
        };
        if error.is_expected() {
            log::warn!("HTTP {status} for {resource}: {error}");
        } else {
            log::error!("HTTP {status} for {resource}: {error}");
        }
        Err(error)
    }

    /// Parses a success body, unwrapping the envelope when present.
    ///
    /// Returns `Ok(None)` for an envelope without `data` or an empty body.
    pub fn parse_data<T>(response_text: &str) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if response_text.trim().is_empty() {
            return Ok(None);
        }
        let payload: Payload<T> = Self::parse_json(response_text)?;
        Ok(match payload {
            Payload::Envelope { data, message, .. } => {
                if let Some(message) = message.filter(|m| !m.is_empty()) {
                    log::debug!("Server message: {message}");
                }
                data
            }
            Payload::Raw(value) => Some(value),
        })
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

/// Extracts a human-readable message from an error body.
///
/// Handles the JSON envelope and falls back to the trimmed plain text that
/// `http.Error`-style handlers emit.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed)
        && let Some(msg) = parsed.message.or(parsed.error)
    {
        return Some(msg);
    }
    Some(truncate_for_log(trimmed))
}

/// Determine whether the error can be retried
fn is_retryable(error: &ApiError) -> bool {
    matches!(
        error,
        ApiError::NetworkError { .. } | ApiError::Timeout { .. } | ApiError::RateLimited { .. }
    )
}

/// `Retry-After` (capped at 30s) for rate limits, exponential backoff otherwise.
fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
