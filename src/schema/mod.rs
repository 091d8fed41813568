//! Stream schemas and catalog discovery
//!
//! Schemas describe each table's columns with a typed, nullable field tag.
//! The catalog is the list of discovered streams that a sync run reads back.

pub mod catalog;
pub mod types;

pub use catalog::{BaseMetadata, Catalog, CatalogEntry};
pub use types::{FieldType, Property, Schema, KEY_FIELD, RELATIONS_STREAM};
