//! Record search

use crate::types::Record;

/// Case-insensitive substring match over a record's name, type and value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.is_empty()
            || [
                record.name.as_str(),
                record.record_type.as_str(),
                record.value.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Matching records in their original order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
