//! Record draft validation

use crate::types::{RecordDraft, RecordField, RecordInput, RecordType, ValidationErrors};

/// Pure check-and-normalize of a record draft before submission.
///
/// Collects every field error rather than stopping at the first.
pub struct RecordValidator;

impl RecordValidator {
    /// Returns the normalized record, or the reason per invalid field.
    ///
    /// All fields are trimmed. `priority` is required for MX/SRV and ignored
    /// for every other type.
    pub fn validate(draft: &RecordDraft) -> Result<RecordInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let record_type = match draft.record_type.parse::<RecordType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add(RecordField::RecordType, e.to_string());
                None
            }
        };

        let name = draft.name.trim();
        if name.is_empty() {
            errors.add(RecordField::Name, "Name is required (use @ for the zone apex)");
        }

        let value = draft.value.trim();
        if value.is_empty() {
            errors.add(RecordField::Value, "Value is required");
        }

        let ttl = match draft.ttl.trim().parse::<u32>() {
            Ok(ttl) if ttl > 0 => Some(ttl),
            _ => {
                errors.add(RecordField::Ttl, "TTL must be a positive integer");
                None
            }
        };

        let priority = match record_type {
            Some(t) if t.requires_priority() => {
                let raw = draft.priority.trim();
                if raw.is_empty() {
                    errors.add(RecordField::Priority, format!("Priority is required for {t}"));
                    None
                } else if let Ok(p) = raw.parse::<u16>() {
                    Some(p)
                } else {
                    errors.add(
                        RecordField::Priority,
                        "Priority must be an integer between 0 and 65535",
                    );
                    None
                }
            }
            _ => None,
        };

        match (record_type, ttl) {
            (Some(record_type), Some(ttl)) if errors.is_empty() => Ok(RecordInput {
                record_type,
                name: name.to_string(),
                value: value.to_string(),
                ttl,
                priority,
            }),
            _ => Err(errors),
        }
    }
}
