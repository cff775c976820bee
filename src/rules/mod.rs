//! Rule Catalog
//!
//! Profiles are typed predicates evaluated in-process. Each rule is a
//! boolean combination of threshold comparisons and categorical equality
//! tests; thresholds are constants baked into the rule.
//!
//! # Invariants
//!
//! - Rules are pure and immutable once defined
//! - Rules never reference the record index
//! - A fact missing an inspected attribute does not match (never an error)
//!
//! The last point hides schema drift: a renamed column silently empties
//! every profile that reads it.

mod ast;
pub mod catalog;
mod errors;
mod evaluator;

pub use ast::{CompareOp, Condition};
pub use catalog::{Rule, RuleCatalog};
pub use errors::{RuleError, RuleResult};
pub use evaluator::RuleEvaluator;
