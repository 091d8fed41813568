//! Record transformation
//!
//! Normalizes field names, coerces values against a stream schema, strips
//! pictographs on request and collects relation edges from link fields.

pub mod normalize;
pub mod projector;
pub mod relations;
pub mod sanitize;

pub use normalize::normalize_field_name;
pub use projector::RecordProjector;
pub use relations::{extract_relations, random_token, RelationAccumulator, RelationListPolicy};
pub use sanitize::strip_pictographs;
