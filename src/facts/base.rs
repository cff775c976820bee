//! Fact base construction and atomic replacement
//!
//! A `FactBase` is an immutable snapshot. `FactStore` owns the current
//! snapshot behind `RwLock<Arc<_>>`; a rebuild constructs the complete new
//! base before swapping the reference, so a reader never sees a mix of old
//! and new facts.

use std::sync::{Arc, RwLock};

use crate::observability::{log_event_with_fields, Event, METRICS};
use crate::records::{Attribute, RecordStore, SchemaError, SchemaResult, StudentRecord, ValidationDetails};

use super::fact::Fact;

/// Immutable set of facts, one per record, in index order.
#[derive(Debug, Clone, Default)]
pub struct FactBase {
    facts: Vec<Fact>,
    generation: u64,
}

impl FactBase {
    /// Creates a base from pre-built facts.
    ///
    /// Facts are ordered by index; this is used for hand-built or partial
    /// fact sets.
    pub fn from_facts(mut facts: Vec<Fact>) -> Self {
        facts.sort_by_key(Fact::index);
        Self { facts, generation: 0 }
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Generation number, incremented on every store rebuild
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

/// Builds one fact per record.
///
/// Index and attribute values are preserved verbatim; categorical values are
/// lower-cased.
///
/// # Errors
///
/// - `PLACEMENT_RECORD_INDEX_MISMATCH` if a record's index is not its position
/// - `PLACEMENT_SCHEMA_VALIDATION_FAILED` if a numeric attribute is not finite
pub fn build_facts(records: &[StudentRecord]) -> SchemaResult<FactBase> {
    let mut facts = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        if record.index != position {
            return Err(SchemaError::index_mismatch(position, record.index));
        }
        facts.push(fact_from_record(record)?);
    }

    Ok(FactBase { facts, generation: 0 })
}

fn fact_from_record(record: &StudentRecord) -> SchemaResult<Fact> {
    let mut fact = Fact::new(record.index);

    for attribute in Attribute::ALL {
        if let Some(value) = record.numeric(attribute) {
            if !value.is_finite() {
                return Err(SchemaError::validation_failed(
                    record.index,
                    ValidationDetails::type_mismatch(attribute.column_name(), "finite number", value.to_string()),
                ));
            }
            fact = fact.with_number(attribute, value);
        } else if let Some(symbol) = record.categorical(attribute) {
            fact = fact.with_symbol(attribute, symbol);
        } else if attribute.is_required() {
            return Err(SchemaError::validation_failed(
                record.index,
                ValidationDetails::missing_field(attribute.column_name()),
            ));
        }
    }

    Ok(fact)
}

/// Holder of the current fact base.
#[derive(Debug, Default)]
pub struct FactStore {
    current: RwLock<Arc<FactBase>>,
}

impl FactStore {
    /// Creates a store and builds the first generation from `records`.
    pub fn build(records: &RecordStore) -> SchemaResult<Self> {
        let store = Self::default();
        store.rebuild(records)?;
        Ok(store)
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` stays valid and unchanged across later rebuilds.
    pub fn snapshot(&self) -> Arc<FactBase> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Rebuilds the fact base from `records` and swaps it in.
    ///
    /// On error the previous base stays current.
    pub fn rebuild(&self, records: &RecordStore) -> SchemaResult<Arc<FactBase>> {
        let next_generation = self.snapshot().generation() + 1;
        let base = match build_facts(records.records()) {
            Ok(base) => Arc::new(base.with_generation(next_generation)),
            Err(err) => {
                log_event_with_fields(
                    Event::FactsRebuildRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                return Err(err);
            }
        };

        {
            let mut guard = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = Arc::clone(&base);
        }

        METRICS.increment_fact_rebuilds();
        log_event_with_fields(
            Event::FactsRebuilt,
            &[
                ("facts", base.len().to_string().as_str()),
                ("generation", next_generation.to_string().as_str()),
            ],
        );

        Ok(base)
    }
}
