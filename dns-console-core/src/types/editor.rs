//! Record editor state

use serde::Serialize;

use dns_console_api::{Record, RecordType};

use super::ValidationErrors;

/// TTL pre-filled for new records.
pub const DEFAULT_TTL: u32 = 3600;

/// Raw form input; every field is text until validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDraft {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    pub ttl: String,
    pub priority: String,
}

impl Default for RecordDraft {
    /// Blank template: type A, TTL 3600.
    fn default() -> Self {
        Self {
            record_type: RecordType::A.to_string(),
            name: String::new(),
            value: String::new(),
            ttl: DEFAULT_TTL.to_string(),
            priority: String::new(),
        }
    }
}

impl RecordDraft {
    /// Copies an existing record into editable form.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            record_type: record.record_type.to_string(),
            name: record.name.clone(),
            value: record.value.clone(),
            ttl: record.ttl.to_string(),
            priority: record.priority.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

/// What the open editor will do on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditorMode {
    Create,
    Edit { record_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPhase {
    Editing,
    /// A request is in flight; the editor is locked.
    Submitting,
}

/// An open record form. Discarded on cancel or successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub mode: EditorMode,
    pub draft: RecordDraft,
    pub phase: EditorPhase,
    /// Last remote failure, shown until the next submit.
    pub error: Option<String>,
    /// Per-field reasons from the last local validation.
    pub field_errors: ValidationErrors,
}

impl EditorState {
    pub(crate) fn new(mode: EditorMode, draft: RecordDraft) -> Self {
        Self {
            mode,
            draft,
            phase: EditorPhase::Editing,
            error: None,
            field_errors: ValidationErrors::default(),
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == EditorPhase::Submitting
    }
}

/// Coarse workflow state, as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Idle,
    Editing,
    Submitting,
}
