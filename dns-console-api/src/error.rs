use serde::{Deserialize, Serialize};

/// Unified error type for every remote API operation.
///
/// Variants carry the raw server message when one was available. All variants
/// are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client retries these with exponential backoff, but only
/// for idempotent reads. Mutations surface them immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The session is missing or expired (HTTP 401).
    Unauthorized {
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The user may not perform this operation (HTTP 403), e.g. the domain
    /// has not been verified yet.
    Forbidden {
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The addressed resource does not exist (HTTP 404).
    NotFound {
        /// Kind and id of the missing resource, e.g. `record 42`.
        resource: String,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The resource already exists (HTTP 409), e.g. a record with the same
    /// type and name.
    Conflict {
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The server rejected the request body (HTTP 400 / 422).
    InvalidRequest {
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The server failed to process the request (HTTP 5xx).
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the server's response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client configuration is unusable (e.g. a malformed base URL).
    InvalidConfig {
        /// What is wrong with it.
        detail: String,
    },

    /// Any response that does not fit the variants above.
    Unknown {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ApiError {
    /// Whether the error means the ambient session is no longer valid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::InvalidRequest { .. }
                | Self::RateLimited { .. }
        )
    }

    /// The server's own message, if the error carries one.
    #[must_use]
    pub fn raw_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { raw_message }
            | Self::Forbidden { raw_message }
            | Self::NotFound { raw_message, .. }
            | Self::Conflict { raw_message }
            | Self::InvalidRequest { raw_message }
            | Self::RateLimited { raw_message, .. }
            | Self::ServerError { raw_message, .. } => raw_message.as_deref(),
            Self::Unknown { raw_message, .. } => Some(raw_message),
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. }
            | Self::InvalidConfig { .. } => None,
        }
    }
}

/// Appends `: message` when the server supplied one.
fn write_with_message(
    f: &mut std::fmt::Formatter<'_>,
    head: &str,
    raw_message: Option<&String>,
) -> std::fmt::Result {
    match raw_message {
        Some(msg) if !msg.is_empty() => write!(f, "{head}: {msg}"),
        _ => f.write_str(head),
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Unauthorized { raw_message } => {
                write_with_message(f, "Session expired", raw_message.as_ref())
            }
            Self::Forbidden { raw_message } => {
                write_with_message(f, "Permission denied", raw_message.as_ref())
            }
            Self::NotFound {
                resource,
                raw_message,
            } => write_with_message(f, &format!("{resource} not found"), raw_message.as_ref()),
            Self::Conflict { raw_message } => {
                write_with_message(f, "Already exists", raw_message.as_ref())
            }
            Self::InvalidRequest { raw_message } => {
                write_with_message(f, "Invalid request", raw_message.as_ref())
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ServerError {
                status,
                raw_message,
            } => write_with_message(
                f,
                &format!("Server error (HTTP {status})"),
                raw_message.as_ref(),
            ),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::InvalidConfig { detail } => write!(f, "Invalid client configuration: {detail}"),
            Self::Unknown {
                status: Some(status),
                raw_message,
            } => write!(f, "HTTP {status}: {raw_message}"),
            Self::Unknown {
                status: None,
                raw_message,
            } => f.write_str(raw_message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
