//! Fact representation used by the rule evaluator

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::Attribute;

/// A single attribute value inside a fact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Numeric attribute value
    Number(f64),
    /// Categorical value, always lower case
    Symbol(String),
}

impl FactValue {
    /// Creates a symbol, normalizing it to lower case
    pub fn symbol(raw: &str) -> Self {
        FactValue::Symbol(raw.trim().to_lowercase())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FactValue::Number(n) => Some(*n),
            FactValue::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            FactValue::Symbol(s) => Some(s.as_str()),
            FactValue::Number(_) => None,
        }
    }
}

/// One record's attributes plus the index of the record it came from.
///
/// Attributes are optional so that partial facts can be represented; a rule
/// inspecting an absent attribute simply does not match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    index: usize,
    values: BTreeMap<Attribute, FactValue>,
}

impl Fact {
    /// Creates an empty fact for the record at `index`
    pub fn new(index: usize) -> Self {
        Self {
            index,
            values: BTreeMap::new(),
        }
    }

    /// Adds a numeric attribute
    pub fn with_number(mut self, attribute: Attribute, value: f64) -> Self {
        self.values.insert(attribute, FactValue::Number(value));
        self
    }

    /// Adds a categorical attribute (normalized to lower case)
    pub fn with_symbol(mut self, attribute: Attribute, value: &str) -> Self {
        self.values.insert(attribute, FactValue::symbol(value));
        self
    }

    /// Index of the record this fact mirrors
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns an attribute value, `None` if absent
    pub fn get(&self, attribute: Attribute) -> Option<&FactValue> {
        self.values.get(&attribute)
    }

    /// Number of attributes carried
    pub fn arity(&self) -> usize {
        self.values.len()
    }
}
