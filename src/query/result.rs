//! Result types for profile queries

use serde::Serialize;

use crate::records::{RecordStore, StudentRecord};

/// Indices of the facts that satisfied a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMatch {
    /// Rule that was evaluated
    pub rule: String,
    /// Matching record indices, strictly ascending
    pub indices: Vec<usize>,
    /// Number of facts evaluated
    pub scanned_count: usize,
    /// Fact base generation the query ran against
    pub generation: u64,
}

impl ProfileMatch {
    /// Returns true if no fact matched
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of matching records
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Maps the matching indices back to records
    pub fn records<'a>(&self, store: &'a RecordStore) -> Vec<&'a StudentRecord> {
        store.select(&self.indices)
    }

    /// First `n` matching records
    pub fn preview<'a>(&self, store: &'a RecordStore, n: usize) -> Vec<&'a StudentRecord> {
        let end = n.min(self.indices.len());
        store.select(&self.indices[..end])
    }
}
