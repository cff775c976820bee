//! Index-addressable in-memory table of student records

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::StudentRecord;
use super::validator::RecordValidator;

/// Ordered, read-only collection of validated student records.
///
/// Invariant: `records[i].index == i` for every record.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    /// Creates a store from already-built records.
    ///
    /// # Errors
    ///
    /// `PLACEMENT_RECORD_INDEX_MISMATCH` if a record's index differs from
    /// its position.
    pub fn from_records(records: Vec<StudentRecord>) -> SchemaResult<Self> {
        for (position, record) in records.iter().enumerate() {
            if record.index != position {
                return Err(SchemaError::index_mismatch(position, record.index));
            }
        }
        Ok(Self { records })
    }

    /// Validates raw JSON rows and builds a store from them.
    pub fn from_rows(rows: &[Value]) -> SchemaResult<Self> {
        Ok(Self {
            records: RecordValidator::validate_rows(rows)?,
        })
    }

    /// Returns the record at `index`
    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    /// Returns all records in index order
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maps indices back to records, skipping any index out of range.
    pub fn select(&self, indices: &[usize]) -> Vec<&StudentRecord> {
        indices.iter().filter_map(|&i| self.records.get(i)).collect()
    }

    /// Number of rows that carry a placement outcome
    pub fn labeled_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_labeled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{SchemaErrorCode, YesNo};

    fn record(index: usize) -> StudentRecord {
        StudentRecord {
            index,
            college_id: format!("CLG{:04}", index),
            iq: 100.0,
            prev_sem_result: 7.0,
            cgpa: 7.0,
            academic_performance: 5.0,
            internship_experience: YesNo::Yes,
            extra_curricular_score: 5.0,
            communication_skills: 5.0,
            projects_completed: 2.0,
            placement: if index % 2 == 0 { Some(YesNo::Yes) } else { None },
        }
    }

    #[test]
    fn test_from_records_checks_positions() {
        let store = RecordStore::from_records(vec![record(0), record(1)]).unwrap();
        assert_eq!(store.len(), 2);

        let err = RecordStore::from_records(vec![record(0), record(5)]).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::PlacementRecordIndexMismatch);
    }

    #[test]
    fn test_select_preserves_requested_order() {
        let store = RecordStore::from_records((0..4).map(record).collect()).unwrap();
        let picked = store.select(&[3, 1, 9]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].index, 3);
        assert_eq!(picked[1].index, 1);
    }

    #[test]
    fn test_labeled_count() {
        let store = RecordStore::from_records((0..5).map(record).collect()).unwrap();
        assert_eq!(store.labeled_count(), 3);
    }
}
