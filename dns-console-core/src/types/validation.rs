//! Field-level validation results

use std::collections::BTreeMap;

use serde::Serialize;

/// Editable field of a record draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    RecordType,
    Name,
    Value,
    Ttl,
    Priority,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RecordType => "type",
            Self::Name => "name",
            Self::Value => "value",
            Self::Ttl => "ttl",
            Self::Priority => "priority",
        })
    }
}

/// Field → reason map; serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<RecordField, String>);

impl ValidationErrors {
    /// Records a reason; the first reason per field wins.
    pub fn add(&mut self, field: RecordField, reason: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| reason.into());
    }

    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.0.iter().map(|(field, reason)| (*field, reason.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, reason)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {reason}")?;
        }
        Ok(())
    }
}
