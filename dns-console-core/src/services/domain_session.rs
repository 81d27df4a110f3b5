//! Current user and current domain resolution

use std::sync::Arc;

use crate::error::{CoreResult, Operation};
use crate::services::ServiceContext;
use crate::types::{Domain, User};

/// Resolves who is signed in and which domain the page shows.
///
/// Both calls are idempotent; 401s raise the session-expired signal through
/// the context and are never retried.
pub struct DomainSession {
    ctx: Arc<ServiceContext>,
}

impl DomainSession {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Returns `cached` when it carries an identity, otherwise asks the
    /// session provider.
    pub async fn resolve_user(&self, cached: Option<&User>) -> CoreResult<User> {
        if let Some(user) = cached.filter(|u| u.has_identity()) {
            return Ok(user.clone());
        }
        self.ctx.ensure_session()?;
        self.ctx
            .session_provider
            .current_user()
            .await
            .map_err(|e| self.ctx.handle_api_error(Operation::LoadUser, e))
    }

    pub async fn resolve_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        self.ctx.ensure_session()?;
        self.ctx
            .domain_api
            .get_domain(domain_id)
            .await
            .map_err(|e| self.ctx.handle_api_error(Operation::LoadDomain, e))
    }
}
