//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dns_console_api::ApiError;

use crate::types::ValidationErrors;

/// Remote operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListRecords,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
    LoadDomain,
    LoadUser,
    ListDomains,
    CreateDomain,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ListRecords => "load records",
            Self::CreateRecord => "create record",
            Self::UpdateRecord => "update record",
            Self::DeleteRecord => "delete record",
            Self::LoadDomain => "load domain",
            Self::LoadUser => "load user",
            Self::ListDomains => "load domains",
            Self::CreateDomain => "create domain",
        })
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Draft rejected locally; never reaches the network
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Domain name rejected by the domain name validator
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    /// Any 401; the session collaborator has already been told
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Any other remote failure
    #[error("Failed to {operation}: {source}")]
    Remote {
        operation: Operation,
        source: ApiError,
    },

    /// Local cache disagrees with the server (unknown id on update/delete)
    #[error("Record set out of sync: {0}")]
    Consistency(String),

    /// A submit is in flight; the editor cannot be re-entered
    #[error("A record is already being saved")]
    EditorBusy,

    /// No record editor is open
    #[error("No record editor is open")]
    NoEditor,

    /// `confirm_delete` without a preceding `request_delete`
    #[error("No record is awaiting delete confirmation")]
    NoPendingDelete,

    /// The workflow was torn down while the call was in flight
    #[error("Page is no longer active")]
    Deactivated,
}

impl CoreError {
    /// Whether it is expected behavior (user input, expired session, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::InvalidDomainName(_)
            | Self::SessionExpired
            | Self::EditorBusy
            | Self::NoEditor
            | Self::NoPendingDelete
            | Self::Deactivated => true,
            Self::Remote { source, .. } => source.is_expected(),
            Self::Consistency(_) => false,
        }
    }

    /// Whether the caller must send the user back to sign in.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
