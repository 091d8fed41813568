//! Catalog discovery
//!
//! Maps the base's metadata (tables and their fields) into one schema per
//! table. Every discovered field is typed as a nullable string.

use crate::schema::types::{FieldType, Property, Schema};
use serde::{Deserialize, Serialize};

/// Field name skipped during discovery; it would collide with the `id` key
const RESERVED_ID_FIELD: &str = "Id";

/// Body of the metadata endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseMetadata {
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableMetadata {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub stream: String,
    pub table_name: String,
    pub metadata: Schema,
}

/// The document printed by discovery and read back by sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from base metadata
    pub fn from_metadata(metadata: BaseMetadata, selected_by_default: bool) -> Self {
        let streams = metadata
            .tables
            .into_iter()
            .map(|table| {
                let schema = table
                    .fields
                    .iter()
                    .filter(|field| field.name != RESERVED_ID_FIELD)
                    .fold(Schema::new(&table.name, selected_by_default), |schema, field| {
                        schema.with_property(&field.name, Property::new(FieldType::String))
                    });

                CatalogEntry {
                    stream: table.name.clone(),
                    table_name: table.name,
                    metadata: schema,
                }
            })
            .collect();

        Catalog { streams }
    }
}
