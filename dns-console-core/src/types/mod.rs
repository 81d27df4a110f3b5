//! Type definitions

mod editor;
mod notice;
mod validation;

pub use editor::{DEFAULT_TTL, EditorMode, EditorPhase, EditorState, RecordDraft, WorkflowPhase};
pub use notice::{Notice, NoticeLevel, PageContext};
pub use validation::{RecordField, ValidationErrors};

// Re-export the API library's wire types
pub use dns_console_api::{Domain, Record, RecordInput, RecordType, User};
