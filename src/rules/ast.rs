//! Rule condition structures
//!
//! A condition is a tree of threshold comparisons and categorical equality
//! tests joined by all-of / any-of.

use serde::Serialize;
use std::fmt;

use crate::records::Attribute;

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    /// field >= bound
    Gte,
    /// field > bound
    Gt,
    /// field <= bound
    Lte,
    /// field < bound
    Lt,
}

impl CompareOp {
    /// Applies the operator
    pub fn holds(&self, actual: f64, bound: f64) -> bool {
        match self {
            CompareOp::Gte => actual >= bound,
            CompareOp::Gt => actual > bound,
            CompareOp::Lte => actual <= bound,
            CompareOp::Lt => actual < bound,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gte => ">=",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Lt => "<",
        }
    }
}

/// Boolean combination of attribute tests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Numeric attribute compared against a constant
    Threshold {
        attribute: Attribute,
        op: CompareOp,
        bound: f64,
    },
    /// Categorical attribute equal to a lower-case constant
    Equals { attribute: Attribute, value: String },
    /// Every child holds
    All { conditions: Vec<Condition> },
    /// At least one child holds
    Any { conditions: Vec<Condition> },
}

impl Condition {
    pub fn gte(attribute: Attribute, bound: f64) -> Self {
        Condition::Threshold { attribute, op: CompareOp::Gte, bound }
    }

    pub fn gt(attribute: Attribute, bound: f64) -> Self {
        Condition::Threshold { attribute, op: CompareOp::Gt, bound }
    }

    pub fn lte(attribute: Attribute, bound: f64) -> Self {
        Condition::Threshold { attribute, op: CompareOp::Lte, bound }
    }

    pub fn lt(attribute: Attribute, bound: f64) -> Self {
        Condition::Threshold { attribute, op: CompareOp::Lt, bound }
    }

    /// Equality test; the expected value is stored lower-cased
    pub fn equals(attribute: Attribute, value: &str) -> Self {
        Condition::Equals {
            attribute,
            value: value.to_lowercase(),
        }
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::All { conditions }
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any { conditions }
    }

    /// Attributes inspected anywhere in this condition, deduplicated and sorted
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_attributes(&self, out: &mut Vec<Attribute>) {
        match self {
            Condition::Threshold { attribute, .. } | Condition::Equals { attribute, .. } => out.push(*attribute),
            Condition::All { conditions } | Condition::Any { conditions } => {
                for c in conditions {
                    c.collect_attributes(out);
                }
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Threshold { attribute, op, bound } => write!(f, "{} {} {}", attribute, op.symbol(), bound),
            Condition::Equals { attribute, value } => write!(f, "{} = {}", attribute, value),
            Condition::All { conditions } => write_joined(f, conditions, " AND "),
            Condition::Any { conditions } => write_joined(f, conditions, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in conditions.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, ")")
}
