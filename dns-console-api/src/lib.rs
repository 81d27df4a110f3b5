//! # dns-console-api
//!
//! Typed client for the DNS console HTTP API: domains (zones), their resource
//! records, and the signed-in user.
//!
//! The core consumes the API through three traits so that tests and other
//! frontends can substitute their own implementations:
//!
//! - [`RecordApi`]: list, create, update and delete records of a domain
//! - [`DomainApi`]: list, get and create domains
//! - [`SessionProvider`]: resolve the current user
//!
//! [`HttpApiClient`] implements all three over JSON/HTTP using `reqwest`.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_console_api::{ApiClientConfig, HttpApiClient, RecordApi, SessionProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiClientConfig::new("https://dns.example.com/api")
//!         .with_session_token("session-cookie-value");
//!     let client = HttpApiClient::new(config)?;
//!
//!     let user = client.current_user().await?;
//!     println!("signed in as {}", user.email);
//!
//!     for record in client.list_records("domain-id").await? {
//!         println!("{} {} {}", record.record_type, record.name, record.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ApiError>`](ApiError). A 401 from any
//! endpoint is [`ApiError::Unauthorized`]; callers treat it as an expired
//! session rather than retrying. Transient failures (`NetworkError`, `Timeout`,
//! `RateLimited`) are retried with exponential backoff for reads only.

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::{ApiClientConfig, DEFAULT_BASE_URL, HttpApiClient, SESSION_COOKIE};
pub use error::{ApiError, Result};
pub use traits::{DomainApi, RecordApi, SessionProvider};
pub use types::{Domain, Record, RecordInput, RecordType, UnknownRecordType, User};

pub use utils::datetime;
pub use utils::log_sanitizer::{redact_token, truncate_for_log};
