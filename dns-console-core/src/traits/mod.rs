//! Collaborator traits owned by the core
//!
//! Remote collaborators (`RecordApi`, `DomainApi`, `SessionProvider`) live in
//! `dns-console-api` and are re-exported here.

mod domain_name_validator;
mod notifier;

pub use domain_name_validator::{DomainNameValidator, SyntaxDomainNameValidator};
pub use notifier::{Notifier, SessionListener};

pub use dns_console_api::{DomainApi, RecordApi, SessionProvider};
