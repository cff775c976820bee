//! Frozen categorical value → code maps

use serde::Serialize;
use std::collections::BTreeMap;

use crate::records::{Attribute, StudentRecord};

use super::errors::{EncodingError, EncodingResult};

/// Value → code map for one categorical column.
///
/// Codes are zero-based and follow the sorted order of the distinct values
/// seen at fit time. The map cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingMap {
    column: Attribute,
    codes: BTreeMap<String, usize>,
}

impl EncodingMap {
    /// Fits a map from the values of `column` across `records`.
    ///
    /// Records without a value (unlabeled Placement) are skipped.
    pub fn fit(records: &[StudentRecord], column: Attribute) -> EncodingResult<Self> {
        if column.is_numeric() {
            return Err(EncodingError::NotCategorical(column.column_name().to_string()));
        }

        let values = records
            .iter()
            .filter_map(|r| r.categorical(column))
            .map(normalize);
        Ok(Self::from_values(column, values))
    }

    /// Builds a map from arbitrary values; duplicates collapse.
    pub fn from_values(column: Attribute, values: impl IntoIterator<Item = String>) -> Self {
        let mut codes: BTreeMap<String, usize> = values.into_iter().map(|v| (v, 0)).collect();
        for (code, slot) in codes.values_mut().enumerate() {
            *slot = code;
        }
        Self { column, codes }
    }

    pub fn column(&self) -> Attribute {
        self.column
    }

    /// Looks up the code for `value`, after trimming and lower-casing it.
    pub fn encode(&self, value: &str) -> EncodingResult<usize> {
        let key = normalize(value);
        self.codes
            .get(&key)
            .copied()
            .ok_or_else(|| EncodingError::UnseenValue {
                column: self.column.column_name().to_string(),
                value: value.to_string(),
            })
    }

    /// Reverse lookup
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.codes.iter().find(|(_, &c)| c == code).map(|(v, _)| v.as_str())
    }

    /// Known values in code order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// One fitted map per categorical column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodingSet {
    maps: BTreeMap<Attribute, EncodingMap>,
}

impl EncodingSet {
    /// Fits a map for each of `columns`
    pub fn fit(records: &[StudentRecord], columns: &[Attribute]) -> EncodingResult<Self> {
        let mut maps = BTreeMap::new();
        for &column in columns {
            maps.insert(column, EncodingMap::fit(records, column)?);
        }
        Ok(Self { maps })
    }

    /// Assembles a set from pre-built maps
    pub fn from_maps(maps: impl IntoIterator<Item = EncodingMap>) -> Self {
        Self {
            maps: maps.into_iter().map(|m| (m.column(), m)).collect(),
        }
    }

    pub fn get(&self, column: Attribute) -> Option<&EncodingMap> {
        self.maps.get(&column)
    }

    /// Encodes `value` with the map for `column`
    pub fn encode(&self, column: Attribute, value: &str) -> EncodingResult<usize> {
        self.maps
            .get(&column)
            .ok_or_else(|| EncodingError::NotFitted(column.column_name().to_string()))?
            .encode(value)
    }

    pub fn columns(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.maps.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
