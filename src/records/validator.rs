//! Row validator for the student dataset
//!
//! Validation semantics:
//! - Row is a JSON object
//! - All required columns are present
//! - No undeclared columns exist
//! - Numeric columns hold JSON numbers, categorical columns hold strings
//! - Yes/no columns hold "yes" or "no" in any letter case
//! - No nulls, no defaults, no coercion

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{Attribute, AttributeKind, StudentRecord, YesNo};

/// Converts raw JSON rows into `StudentRecord`s.
///
/// Validation is deterministic and does not mutate its input.
pub struct RecordValidator;

impl RecordValidator {
    /// Validates one row and assigns it the given position as its index.
    ///
    /// # Errors
    ///
    /// Returns `PLACEMENT_SCHEMA_VALIDATION_FAILED` if:
    /// - the row is not an object
    /// - a required column is missing or null
    /// - an undeclared column is present
    /// - a value has the wrong JSON type
    pub fn validate_row(position: usize, row: &Value) -> SchemaResult<StudentRecord> {
        let obj = row.as_object().ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::type_mismatch("$row", "object", json_type_name(row)),
            )
        })?;

        // No undeclared columns
        for key in obj.keys() {
            if Attribute::from_column(key).is_none() {
                return Err(SchemaError::validation_failed(
                    position,
                    ValidationDetails::extra_field(key.as_str()),
                ));
            }
        }

        let placement = match Self::optional(position, obj, Attribute::Placement)? {
            Some(value) => Some(Self::yes_no(position, Attribute::Placement, value)?),
            None => None,
        };

        Ok(StudentRecord {
            index: position,
            college_id: Self::text(position, obj, Attribute::CollegeId)?,
            iq: Self::number(position, obj, Attribute::Iq)?,
            prev_sem_result: Self::number(position, obj, Attribute::PrevSemResult)?,
            cgpa: Self::number(position, obj, Attribute::Cgpa)?,
            academic_performance: Self::number(position, obj, Attribute::AcademicPerformance)?,
            internship_experience: Self::yes_no(
                position,
                Attribute::InternshipExperience,
                Self::required(position, obj, Attribute::InternshipExperience)?,
            )?,
            extra_curricular_score: Self::number(position, obj, Attribute::ExtraCurricularScore)?,
            communication_skills: Self::number(position, obj, Attribute::CommunicationSkills)?,
            projects_completed: Self::number(position, obj, Attribute::ProjectsCompleted)?,
            placement,
        })
    }

    /// Validates a sequence of rows, stopping at the first violation.
    pub fn validate_rows(rows: &[Value]) -> SchemaResult<Vec<StudentRecord>> {
        rows.iter()
            .enumerate()
            .map(|(position, row)| Self::validate_row(position, row))
            .collect()
    }

    fn required<'v>(
        position: usize,
        obj: &'v Map<String, Value>,
        attribute: Attribute,
    ) -> SchemaResult<&'v Value> {
        Self::optional(position, obj, attribute)?.ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::missing_field(attribute.column_name()),
            )
        })
    }

    fn optional<'v>(
        position: usize,
        obj: &'v Map<String, Value>,
        attribute: Attribute,
    ) -> SchemaResult<Option<&'v Value>> {
        match obj.get(attribute.column_name()) {
            Some(Value::Null) => Err(SchemaError::validation_failed(
                position,
                ValidationDetails::null_value(attribute.column_name()),
            )),
            other => Ok(other),
        }
    }

    fn number(position: usize, obj: &Map<String, Value>, attribute: Attribute) -> SchemaResult<f64> {
        debug_assert_eq!(attribute.kind(), AttributeKind::Numeric);
        let value = Self::required(position, obj, attribute)?;
        value.as_f64().ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::type_mismatch(
                    attribute.column_name(),
                    AttributeKind::Numeric.type_name(),
                    json_type_name(value),
                ),
            )
        })
    }

    fn text(position: usize, obj: &Map<String, Value>, attribute: Attribute) -> SchemaResult<String> {
        let value = Self::required(position, obj, attribute)?;
        value.as_str().map(str::to_string).ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::type_mismatch(
                    attribute.column_name(),
                    AttributeKind::Categorical.type_name(),
                    json_type_name(value),
                ),
            )
        })
    }

    fn yes_no(position: usize, attribute: Attribute, value: &Value) -> SchemaResult<YesNo> {
        let raw = value.as_str().ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::type_mismatch(
                    attribute.column_name(),
                    AttributeKind::Categorical.type_name(),
                    json_type_name(value),
                ),
            )
        })?;

        YesNo::parse(raw).ok_or_else(|| {
            SchemaError::validation_failed(
                position,
                ValidationDetails::new(attribute.column_name(), "\"yes\" or \"no\"", format!("\"{}\"", raw)),
            )
        })
    }
}

/// Returns the JSON type name of a value
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
