//! `reqwest` implementation of the console HTTP API.

mod api;
mod http;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::redact_token;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// API root used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default retry budget for reads
const DEFAULT_MAX_RETRIES: u32 = 2;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Connection settings for [`HttpApiClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiClientConfig {
    /// API root, e.g. `https://dns.example.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `session` cookie, if already signed in.
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Retries for idempotent reads; mutations are never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_token: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Keeps the session token out of debug logs.
impl std::fmt::Debug for ApiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientConfig")
            .field("base_url", &self.base_url)
            .field(
                "session_token",
                &self.session_token.as_deref().map(redact_token),
            )
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// HTTP client for the console API.
///
/// Implements [`RecordApi`](crate::RecordApi), [`DomainApi`](crate::DomainApi)
/// and [`SessionProvider`](crate::SessionProvider). Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

impl HttpApiClient {
    /// Builds a client with a cookie store seeded from the session token.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let url = Url::parse(&base_url).map_err(|e| ApiError::InvalidConfig {
            detail: format!("base_url {base_url:?}: {e}"),
        })?;

        let jar = Jar::default();
        if let Some(token) = config.session_token.as_deref().filter(|t| !t.is_empty()) {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &url);
            log::debug!("Session cookie set ({})", redact_token(token));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_provider(Arc::new(jar))
            .build()
            .map_err(|e| ApiError::InvalidConfig {
                detail: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
