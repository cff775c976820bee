//! Single-column comparison filter
//!
//! No coercion across kinds: numeric columns compare numbers, categorical
//! columns compare lower-cased strings for equality only.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::observability::{log_event_with_fields, Event, METRICS};
use crate::records::{Attribute, RecordStore, StudentRecord};

use super::errors::{SearchError, SearchResult};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchOp {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Ne,
}

impl SearchOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            SearchOp::Gt => ">",
            SearchOp::Lt => "<",
            SearchOp::Gte => ">=",
            SearchOp::Lte => "<=",
            SearchOp::Eq => "==",
            SearchOp::Ne => "!=",
        }
    }

    /// True for `==` and `!=`
    pub fn is_equality(&self) -> bool {
        matches!(self, SearchOp::Eq | SearchOp::Ne)
    }

    fn compare(&self, actual: f64, bound: f64) -> bool {
        match self {
            SearchOp::Gt => actual > bound,
            SearchOp::Lt => actual < bound,
            SearchOp::Gte => actual >= bound,
            SearchOp::Lte => actual <= bound,
            SearchOp::Eq => actual == bound,
            SearchOp::Ne => actual != bound,
        }
    }
}

impl FromStr for SearchOp {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(SearchOp::Gt),
            "<" => Ok(SearchOp::Lt),
            ">=" => Ok(SearchOp::Gte),
            "<=" => Ok(SearchOp::Lte),
            "==" => Ok(SearchOp::Eq),
            "!=" => Ok(SearchOp::Ne),
            other => Err(SearchError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for SearchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Number(f64),
    Symbol(String),
}

/// A validated `column op value` filter
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    column: Attribute,
    op: SearchOp,
    operand: Operand,
}

impl ColumnFilter {
    /// Parses and validates a filter.
    ///
    /// The column name is matched exactly; the value is parsed as a number
    /// for numeric columns.
    pub fn parse(column: &str, op: &str, value: &str) -> SearchResult<Self> {
        let attribute = Attribute::from_column(column.trim()).ok_or_else(|| SearchError::UnknownColumn(column.to_string()))?;
        let op: SearchOp = op.parse()?;

        let operand = if attribute.is_numeric() {
            let n = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| SearchError::InvalidValue {
                    column: attribute.column_name().to_string(),
                    value: value.to_string(),
                })?;
            Operand::Number(n)
        } else {
            if !op.is_equality() {
                return Err(SearchError::UnsupportedOperator {
                    column: attribute.column_name().to_string(),
                    op: op.symbol().to_string(),
                });
            }
            Operand::Symbol(value.trim().to_lowercase())
        };

        Ok(Self {
            column: attribute,
            op,
            operand,
        })
    }

    pub fn column(&self) -> Attribute {
        self.column
    }

    pub fn op(&self) -> SearchOp {
        self.op
    }

    /// Checks one record. A missing value never matches.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match &self.operand {
            Operand::Number(bound) => match record.numeric(self.column) {
                Some(actual) => self.op.compare(actual, *bound),
                None => false,
            },
            Operand::Symbol(expected) => match record.categorical(self.column) {
                Some(actual) => {
                    let equal = actual.to_lowercase() == *expected;
                    if self.op == SearchOp::Eq {
                        equal
                    } else {
                        !equal
                    }
                }
                None => false,
            },
        }
    }

    /// Indices of all matching records, ascending
    pub fn apply(&self, store: &RecordStore) -> Vec<usize> {
        store.iter().filter(|r| self.matches(r)).map(|r| r.index).collect()
    }
}

impl fmt::Display for ColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::Number(n) => write!(f, "{} {} {}", self.column, self.op, n),
            Operand::Symbol(s) => write!(f, "{} {} {}", self.column, self.op, s),
        }
    }
}

/// Parses a filter and returns the ascending indices it selects.
pub fn search(store: &RecordStore, column: &str, op: &str, value: &str) -> SearchResult<Vec<usize>> {
    let filter = ColumnFilter::parse(column, op, value)?;
    let indices = filter.apply(store);

    METRICS.increment_searches_executed();
    log_event_with_fields(
        Event::SearchExecuted,
        &[
            ("filter", filter.to_string().as_str()),
            ("matched", indices.len().to_string().as_str()),
        ],
    );
    Ok(indices)
}
