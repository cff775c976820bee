//! Records and raw rows → numeric feature rows

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::records::{Attribute, StudentRecord};

use super::errors::{EncodingError, EncodingResult};
use super::map::EncodingSet;

/// Ordered list of feature columns; fixes the column order of every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    columns: Vec<Attribute>,
}

impl FeatureLayout {
    pub fn new(columns: Vec<Attribute>) -> Self {
        Self { columns }
    }

    /// The eight model features in dataset order
    pub fn standard() -> Self {
        Self::new(Attribute::FEATURES.to_vec())
    }

    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    /// Column names in layout order
    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.column_name()).collect()
    }

    /// Categorical columns of the layout
    pub fn categorical(&self) -> Vec<Attribute> {
        self.columns.iter().copied().filter(|c| !c.is_numeric()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// One raw attribute value as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Raw attributes of a single candidate, keyed by column name
pub type RawAttributes = BTreeMap<String, RawValue>;

/// Transforms records into a feature matrix in layout order.
pub fn transform(
    records: &[StudentRecord],
    layout: &FeatureLayout,
    encodings: &EncodingSet,
) -> EncodingResult<Vec<Vec<f64>>> {
    records.iter().map(|r| transform_record(r, layout, encodings)).collect()
}

fn transform_record(record: &StudentRecord, layout: &FeatureLayout, encodings: &EncodingSet) -> EncodingResult<Vec<f64>> {
    let mut row = Vec::with_capacity(layout.len());
    for &column in layout.columns() {
        let value = if column.is_numeric() {
            record.numeric(column)
        } else {
            match record.categorical(column) {
                Some(v) => Some(encodings.encode(column, v)? as f64),
                None => None,
            }
        };
        row.push(value.ok_or_else(|| EncodingError::MissingValue(column.column_name().to_string()))?);
    }
    Ok(row)
}

/// Transforms one raw attribute set into a feature row in layout order.
///
/// Numeric columns pass through; categorical values are trimmed,
/// lower-cased and encoded. Keys outside the layout are ignored.
pub fn transform_row(raw: &RawAttributes, layout: &FeatureLayout, encodings: &EncodingSet) -> EncodingResult<Vec<f64>> {
    let mut row = Vec::with_capacity(layout.len());
    for &column in layout.columns() {
        let name = column.column_name();
        let value = raw
            .get(name)
            .ok_or_else(|| EncodingError::MissingValue(name.to_string()))?;

        let encoded = match (column.is_numeric(), value) {
            (true, RawValue::Number(n)) if n.is_finite() => *n,
            (false, RawValue::Text(s)) => encodings.encode(column, s)? as f64,
            (numeric, _) => {
                return Err(EncodingError::InvalidValue {
                    column: name.to_string(),
                    expected: if numeric { "finite number" } else { "string" }.to_string(),
                })
            }
        };
        row.push(encoded);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodingMap;

    fn encodings() -> EncodingSet {
        EncodingSet::from_maps(vec![EncodingMap::from_values(
            Attribute::InternshipExperience,
            vec!["no".to_string(), "yes".to_string()],
        )])
    }

    fn layout() -> FeatureLayout {
        FeatureLayout::new(vec![Attribute::InternshipExperience, Attribute::Cgpa])
    }

    fn raw(internship: RawValue, cgpa: RawValue) -> RawAttributes {
        let mut raw = RawAttributes::new();
        raw.insert("Internship_Experience".into(), internship);
        raw.insert("CGPA".into(), cgpa);
        raw
    }

    #[test]
    fn test_row_in_layout_order() {
        let row = transform_row(
            &raw(RawValue::Text("Yes".into()), RawValue::Number(90.0)),
            &layout(),
            &encodings(),
        )
        .unwrap();
        assert_eq!(row, vec![1.0, 90.0]);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut input = raw(RawValue::Text("no".into()), RawValue::Number(40.0));
        input.insert("Nickname".into(), RawValue::Text("x".into()));
        assert_eq!(transform_row(&input, &layout(), &encodings()).unwrap(), vec![0.0, 40.0]);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let err = transform_row(
            &raw(RawValue::Text("no".into()), RawValue::Text("90".into())),
            &layout(),
            &encodings(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_INVALID_VALUE");
    }

    #[test]
    fn test_missing_column() {
        let mut input = RawAttributes::new();
        input.insert("CGPA".into(), RawValue::Number(1.0));
        assert_eq!(
            transform_row(&input, &layout(), &encodings()).unwrap_err(),
            EncodingError::MissingValue("Internship_Experience".into())
        );
    }

    #[test]
    fn test_standard_layout_excludes_identity_and_label() {
        let names = FeatureLayout::standard().names();
        assert_eq!(names.len(), 8);
        assert!(!names.contains(&"College_ID"));
        assert!(!names.contains(&"Placement"));
        assert_eq!(FeatureLayout::standard().categorical(), vec![Attribute::InternshipExperience]);
    }
}
