//! Outbound signals to the presentation layer

use crate::types::Notice;

/// Surfaces transient success/failure messages.
///
/// Fire-and-forget: implementations must not block and cannot fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Receives the session-expired signal (the caller should redirect to sign-in).
///
/// Raised at most once per [`ServiceContext`](crate::ServiceContext).
pub trait SessionListener: Send + Sync {
    fn session_expired(&self);
}
