//! Column Search
//!
//! `column op value` filtering over the record store.

mod errors;
mod filter;

pub use errors::{SearchError, SearchResult};
pub use filter::{search, ColumnFilter, SearchOp};
