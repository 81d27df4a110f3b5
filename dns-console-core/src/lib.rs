//! DNS Console Core Library
//!
//! Client-side record management for the DNS console:
//! - `RecordWorkflow`: the create/edit/delete state machine for one domain page
//! - `RecordStore` and `SearchFilter`: the local record cache and its filtered view
//! - `RecordValidator`: draft validation before anything reaches the network
//! - `DomainSession`: current user and domain resolution
//! - `DomainService`: domain list, lookup and registration
//!
//! Remote collaborators, the notifier and the session listener are injected
//! through a [`ServiceContext`], so any frontend can drive the same logic.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, Operation};
pub use services::ServiceContext;
pub use traits::{DomainNameValidator, Notifier, SessionListener};
