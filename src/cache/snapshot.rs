use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{Record, RecordId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Duplicate record ID: {0}")]
    DuplicateRecordId(RecordId),
}

/// A complete, immutable set of records produced by one refresh cycle.
///
/// Iteration order is the order the records were supplied in. The snapshot
/// never changes after construction; a refresh builds a new one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    installed_at: Option<DateTime<Utc>>,
    records: Vec<Record>,
    by_id: HashMap<RecordId, usize>,
}

impl Snapshot {
    /// The empty snapshot a store starts with.
    pub fn empty() -> Self {
        Self {
            generation: 0,
            installed_at: None,
            records: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Build a snapshot, rejecting the whole batch on a repeated identifier.
    pub fn build(records: Vec<Record>) -> Result<Self, SnapshotError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if by_id.insert(record.id, pos).is_some() {
                return Err(SnapshotError::DuplicateRecordId(record.id));
            }
        }

        Ok(Self {
            generation: 0,
            installed_at: None,
            records,
            by_id,
        })
    }

    // Only the store stamps snapshots, right before publishing them.
    pub(crate) fn stamp(&mut self, generation: u64, at: DateTime<Utc>) {
        self.generation = generation;
        self.installed_at = Some(at);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn installed_at(&self) -> Option<DateTime<Utc>> {
        self.installed_at
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.by_id.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
