//! Shared helpers for live API tests.

#![allow(dead_code)]

use std::env;

use dns_console_api::{ApiClientConfig, HttpApiClient, RecordApi, RecordInput, RecordType};

/// Returns early from a test when any of the given env vars is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts `Result` is `Ok` and yields the inner value.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const API_URL_VAR: &str = "DNS_CONSOLE_TEST_API_URL";
pub const SESSION_VAR: &str = "DNS_CONSOLE_TEST_SESSION";
pub const DOMAIN_ID_VAR: &str = "DNS_CONSOLE_TEST_DOMAIN_ID";

/// Unique, easy to spot name for throwaway records.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

pub fn txt_record(name: &str, value: &str) -> RecordInput {
    RecordInput {
        record_type: RecordType::Txt,
        name: name.to_string(),
        value: value.to_string(),
        ttl: 600,
        priority: None,
    }
}

/// Live client plus the domain the tests may write to.
pub struct TestContext {
    pub client: HttpApiClient,
    pub domain_id: String,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let base_url = env::var(API_URL_VAR).ok()?;
        let session = env::var(SESSION_VAR).ok()?;
        let domain_id = env::var(DOMAIN_ID_VAR).ok()?;

        let config = ApiClientConfig::new(base_url).with_session_token(session);
        let client = HttpApiClient::new(config).ok()?;
        Some(Self { client, domain_id })
    }

    /// A client for the same server without a session.
    pub fn anonymous(&self) -> Option<HttpApiClient> {
        HttpApiClient::new(ApiClientConfig::new(self.client.base_url())).ok()
    }

    /// Removes leftovers from earlier aborted runs.
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.client.list_records(&self.domain_id).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.client.delete_record(&record.id).await;
                }
            }
        }
    }
}
