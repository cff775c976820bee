//! Fact Base
//!
//! One fact per student record, tagged with the record's index so query
//! results can be mapped back to rows. Facts are derived deterministically
//! and the whole base is replaced on every reload.

mod base;
mod fact;

pub use base::{build_facts, FactBase, FactStore};
pub use fact::{Fact, FactValue};
