//! Feature Encoder
//!
//! Categorical columns are mapped to integer codes once, at fit time, and
//! the maps are frozen afterwards. Numeric columns pass through unchanged.

mod errors;
mod map;
mod transform;

pub use errors::{EncodingError, EncodingResult};
pub use map::{EncodingMap, EncodingSet};
pub use transform::{transform, transform_row, FeatureLayout, RawAttributes, RawValue};
