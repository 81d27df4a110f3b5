//! Terminal implementations of the core's outbound signals.

use std::sync::atomic::{AtomicBool, Ordering};

use dns_console_core::types::{Notice, NoticeLevel};
use dns_console_core::{Notifier, SessionListener};

use crate::config::SESSION_ENV;

/// Prints success notices to stdout and failures to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    failure_reported: AtomicBool,
}

impl ConsoleNotifier {
    /// Whether a failure notice has already been shown.
    pub fn failure_reported(&self) -> bool {
        self.failure_reported.load(Ordering::Acquire)
    }
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message),
        NoticeLevel::Error => format!("✗ {}", notice.message),
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(level = ?notice.level, "notice: {}", notice.message);
        if notice.is_error() {
            self.failure_reported.store(true, Ordering::Release);
            eprintln!("{}", render_notice(&notice));
        } else {
            println!("{}", render_notice(&notice));
        }
    }
}

/// Prints how to sign in again.
#[derive(Debug)]
pub struct ConsoleSessionListener {
    base_url: String,
}

impl ConsoleSessionListener {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn hint(&self) -> String {
        format!(
            "Session expired or missing. Sign in at {} and set {SESSION_ENV} \
             (or api.session_token in the config file) to the new session cookie.",
            self.base_url
        )
    }
}

impl SessionListener for ConsoleSessionListener {
    fn session_expired(&self) {
        tracing::warn!("Session rejected by {}", self.base_url);
        eprintln!("{}", self.hint());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_levels() {
        assert_eq!(render_notice(&Notice::success("Saved")), "✓ Saved");
        assert_eq!(render_notice(&Notice::error("Nope")), "✗ Nope");
    }

    #[test]
    fn tracks_failures_only() {
        let notifier = ConsoleNotifier::default();
        notifier.notify(Notice::success("Record added"));
        assert!(!notifier.failure_reported());
        notifier.notify(Notice::error("Failed to add record"));
        assert!(notifier.failure_reported());
    }

    #[test]
    fn hint_names_server_and_variable() {
        let hint = ConsoleSessionListener::new("https://dns.example.com").hint();
        assert!(hint.contains("https://dns.example.com"));
        assert!(hint.contains("DNS_CONSOLE_SESSION"));
    }
}
