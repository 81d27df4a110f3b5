//! Business logic service layer

mod domain_service;
mod domain_session;
mod record_store;
mod record_validator;
mod record_workflow;
mod search_filter;

pub use domain_service::DomainService;
pub use domain_session::DomainSession;
pub use record_store::RecordStore;
pub use record_validator::RecordValidator;
pub use record_workflow::RecordWorkflow;
pub use search_filter::SearchFilter;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dns_console_api::ApiError;

use crate::error::{CoreError, Operation};
use crate::traits::{DomainApi, Notifier, RecordApi, SessionListener, SessionProvider};
use crate::types::Notice;

/// Service context - holds all collaborators
///
/// The presentation layer creates one per page activation and injects its
/// API client, notifier and session listener.
pub struct ServiceContext {
    pub record_api: Arc<dyn RecordApi>,
    pub domain_api: Arc<dyn DomainApi>,
    pub session_provider: Arc<dyn SessionProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub session_listener: Arc<dyn SessionListener>,
    session_expired: AtomicBool,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        record_api: Arc<dyn RecordApi>,
        domain_api: Arc<dyn DomainApi>,
        session_provider: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        session_listener: Arc<dyn SessionListener>,
    ) -> Self {
        Self {
            record_api,
            domain_api,
            session_provider,
            notifier,
            session_listener,
            session_expired: AtomicBool::new(false),
        }
    }

    /// Classifies an API failure.
    ///
    /// A 401 raises the session-expired signal (once per context) and maps to
    /// [`CoreError::SessionExpired`]; anything else becomes
    /// [`CoreError::Remote`]. Nothing is notified here.
    pub fn handle_api_error(&self, operation: Operation, err: ApiError) -> CoreError {
        if err.is_unauthorized() {
            self.signal_session_expired();
            return CoreError::SessionExpired;
        }
        if err.is_expected() {
            log::warn!("Failed to {operation}: {err}");
        } else {
            log::error!("Failed to {operation}: {err}");
        }
        CoreError::Remote {
            operation,
            source: err,
        }
    }

    /// Whether a 401 has been seen; no further mutation may be attempted.
    pub fn is_session_expired(&self) -> bool {
        self.session_expired.load(Ordering::Acquire)
    }

    pub(crate) fn signal_session_expired(&self) {
        if !self.session_expired.swap(true, Ordering::AcqRel) {
            log::warn!("Session expired, signalling sign-in");
            self.session_listener.session_expired();
        }
    }

    /// Fails fast once the session is known to be gone.
    pub(crate) fn ensure_session(&self) -> Result<(), CoreError> {
        if self.is_session_expired() {
            Err(CoreError::SessionExpired)
        } else {
            Ok(())
        }
    }

    /// Notifies a remote failure; session expiry and local misuse stay silent.
    pub(crate) fn notify_failure(&self, err: &CoreError) {
        if let CoreError::Remote { .. } | CoreError::Consistency(_) = err {
            self.notifier.notify(Notice::error(err.to_string()));
        }
    }

    pub(crate) fn notify_success(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::success(message));
    }
}
