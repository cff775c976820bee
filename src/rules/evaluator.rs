//! Condition evaluation against facts
//!
//! Evaluation is pure. No type coercion: a threshold only applies to a
//! number, an equality only to a symbol.

use crate::facts::{Fact, FactValue};

use super::ast::Condition;

/// Evaluates conditions against facts
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Checks whether `fact` satisfies `condition`
    pub fn matches(fact: &Fact, condition: &Condition) -> bool {
        match condition {
            Condition::Threshold { attribute, op, bound } => match fact.get(*attribute) {
                Some(FactValue::Number(actual)) => op.holds(*actual, *bound),
                // Missing attribute or symbol = no match
                _ => false,
            },
            Condition::Equals { attribute, value } => match fact.get(*attribute) {
                Some(FactValue::Symbol(actual)) => actual == value,
                _ => false,
            },
            Condition::All { conditions } => conditions.iter().all(|c| Self::matches(fact, c)),
            Condition::Any { conditions } => conditions.iter().any(|c| Self::matches(fact, c)),
        }
    }
}
