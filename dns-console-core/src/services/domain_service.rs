//! Domain management service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult, Operation};
use crate::services::ServiceContext;
use crate::traits::{DomainNameValidator, SyntaxDomainNameValidator};
use crate::types::Domain;

/// Domain list, lookup and registration.
pub struct DomainService {
    ctx: Arc<ServiceContext>,
    validator: Arc<dyn DomainNameValidator>,
}

impl DomainService {
    /// Uses [`SyntaxDomainNameValidator`].
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_validator(ctx, Arc::new(SyntaxDomainNameValidator))
    }

    #[must_use]
    pub fn with_validator(
        ctx: Arc<ServiceContext>,
        validator: Arc<dyn DomainNameValidator>,
    ) -> Self {
        Self { ctx, validator }
    }

    /// Lists the current user's domains. Failures are notified.
    pub async fn list_domains(&self) -> CoreResult<Vec<Domain>> {
        self.ctx.ensure_session()?;
        match self.ctx.domain_api.list_domains().await {
            Ok(domains) => Ok(domains),
            Err(e) => {
                let err = self.ctx.handle_api_error(Operation::ListDomains, e);
                self.ctx.notify_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetches one domain; errors are returned, not notified.
    pub async fn get_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        self.ctx.ensure_session()?;
        self.ctx
            .domain_api
            .get_domain(domain_id)
            .await
            .map_err(|e| self.ctx.handle_api_error(Operation::LoadDomain, e))
    }

    /// Validates `name` locally, then registers it.
    ///
    /// An invalid name never reaches the network and is not notified. Remote
    /// success and failure each notify exactly once.
    pub async fn create_domain(&self, name: &str) -> CoreResult<Domain> {
        let normalized = self
            .validator
            .validate(name)
            .map_err(CoreError::InvalidDomainName)?;
        self.ctx.ensure_session()?;

        match self.ctx.domain_api.create_domain(&normalized).await {
            Ok(domain) => {
                log::info!("Domain created: {} ({})", domain.name, domain.id);
                self.ctx
                    .notify_success(format!("Domain {} created successfully", domain.name));
                Ok(domain)
            }
            Err(e) => {
                let err = self.ctx.handle_api_error(Operation::CreateDomain, e);
                self.ctx.notify_failure(&err);
                Err(err)
            }
        }
    }
}
