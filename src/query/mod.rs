//! Profile Query Engine
//!
//! Rule name in, ascending record indices out.
//!
//! # Invariants
//!
//! - Results are strictly ascending by index
//! - Every returned index satisfies the rule when re-evaluated
//! - Unknown rule names are rejected without touching the fact base

mod engine;
mod errors;
mod result;

pub use engine::{query_profile, ProfileQueryEngine};
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use result::ProfileMatch;
