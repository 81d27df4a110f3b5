use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Domain, Record, RecordInput, User};

/// Remote record operations for one zone.
///
/// Every call carries the ambient session; a missing or expired session
/// surfaces as [`ApiError::Unauthorized`](crate::ApiError::Unauthorized).
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Lists a domain's records in server order.
    async fn list_records(&self, domain_id: &str) -> Result<Vec<Record>>;

    /// Creates a record; the returned value carries the server-assigned id.
    async fn create_record(&self, domain_id: &str, record: &RecordInput) -> Result<Record>;

    /// Replaces a record with the full body given.
    async fn update_record(&self, record_id: &str, record: &RecordInput) -> Result<Record>;

    /// Deletes a record.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}

/// Remote domain (zone) operations.
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// Lists the current user's domains.
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// Fetches one domain.
    async fn get_domain(&self, domain_id: &str) -> Result<Domain>;

    /// Registers a new domain; the name must already be validated.
    async fn create_domain(&self, domain_name: &str) -> Result<Domain>;
}

/// Source of the authenticated user.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current user, or `Unauthorized` when not signed in.
    async fn current_user(&self) -> Result<User>;
}
