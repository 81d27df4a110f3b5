//! In-memory record cache for one domain

use crate::error::{CoreError, CoreResult};
use crate::services::SearchFilter;
use crate::types::Record;

/// The live record set of the current domain plus the active search.
///
/// Records keep the order the API returned them in. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    query: String,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole set after a full refresh.
    ///
    /// Later duplicates of an id are dropped.
    pub fn load(&mut self, records: Vec<Record>) {
        let mut unique: Vec<Record> = Vec::with_capacity(records.len());
        for record in records {
            if unique.iter().any(|r| r.id == record.id) {
                log::warn!("Dropping duplicate record id {} from list", record.id);
            } else {
                unique.push(record);
            }
        }
        self.records = unique;
    }

    /// Appends a confirmed new record.
    pub fn apply_created(&mut self, record: Record) -> CoreResult<()> {
        if self.contains(&record.id) {
            return Err(CoreError::Consistency(format!(
                "record {} already present",
                record.id
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replaces the record with the same id, in place.
    pub fn apply_updated(&mut self, record: Record) -> CoreResult<()> {
        let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) else {
            return Err(CoreError::Consistency(format!(
                "record {} not found for update",
                record.id
            )));
        };
        *slot = record;
        Ok(())
    }

    /// Removes a confirmed deleted record and returns it.
    pub fn apply_deleted(&mut self, id: &str) -> CoreResult<Record> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Err(CoreError::Consistency(format!(
                "record {id} not found for delete"
            )));
        };
        Ok(self.records.remove(index))
    }

    pub fn set_query(&mut self, text: &str) {
        text.clone_into(&mut self.query);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records matching the current query, recomputed on every call.
    pub fn filtered_view(&self) -> Vec<Record> {
        SearchFilter::new(&self.query)
            .apply(&self.records)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
