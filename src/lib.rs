//! # tap-airtable - Singer tap for Airtable bases
//!
//! Reads every selected table of a base through the REST API and writes the
//! rows as Singer `SCHEMA`/`RECORD` messages, plus a synthetic `relations`
//! stream built from link fields.
//!
//! ## Modules
//!
//! - **schema**: typed stream schemas and catalog discovery
//! - **transform**: field-name normalization, value coercion, pictograph stripping and relation extraction
//! - **client**: paginated HTTP access to the metadata and records endpoints
//! - **sync**: per-table sync driver
//! - **singer**: message output
//!
//! ## Quick Start
//!
//! ```rust
//! use tap_airtable::schema::{FieldType, Property, Schema};
//! use tap_airtable::transform::{RecordProjector, RelationAccumulator, RelationListPolicy};
//! use tap_airtable::types::RawRecord;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = Schema::new("Projects", true)
//!     .with_property("Project Name", Property::new(FieldType::String))
//!     .with_property("Tasks", Property::new(FieldType::Array))
//!     .normalized();
//!
//! let raw = RawRecord::new(
//!     "recP1",
//!     serde_json::from_value(json!({"Project Name": "Launch 🚀", "Tasks": ["recT1", "recT2"]}))?,
//! );
//!
//! let mut relations = RelationAccumulator::new(RelationListPolicy::default());
//! let rows = RecordProjector::new(&schema, true).project(vec![raw], &mut relations);
//!
//! assert_eq!(rows[0]["project_name"], "Launch ");
//! assert_eq!(relations.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod schema;
pub mod singer;
pub mod sync;
pub mod transform;
pub mod types;

// Re-export commonly used types for convenience
pub use client::{AirtableClient, RecordSource};
pub use config::{SyncSettings, TapConfig};
pub use error::{Result, TapError};
pub use schema::{Catalog, Schema};
pub use singer::{SingerWriter, StreamEmitter};
pub use sync::{SyncOrchestrator, SyncSummary};

use tracing::info;

/// Discovery mode: describe every table of the configured base
pub fn discover(client: &AirtableClient, config: &TapConfig) -> Result<Catalog> {
    let metadata = client.fetch_metadata(&config.base_id)?;
    let catalog = Catalog::from_metadata(metadata, config.selected_by_default);
    info!(streams = catalog.streams.len(), "Discovered streams");
    Ok(catalog)
}

/// Sync mode: write every selected stream of `catalog`, then the relations stream
pub fn sync<S: RecordSource, E: StreamEmitter>(
    source: &S,
    config: &TapConfig,
    catalog: Catalog,
    emitter: &mut E,
) -> Result<SyncSummary> {
    let settings = config.sync_settings();
    SyncOrchestrator::new(source, &settings).run(catalog, emitter)
}
