use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized output row: one key per schema property plus `id`
pub type Record = Map<String, Value>;

/// A record as returned by the records endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Remote record id, e.g. "recXXXXXXXXXXXXXX"
    pub id: String,

    /// User-defined fields, keyed by the field name as typed in the base.
    /// The API omits this entirely for empty rows.
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        RawRecord {
            id: id.into(),
            fields: Some(fields),
        }
    }
}

/// One page of the records endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Option<Vec<RawRecord>>,

    /// Continuation token; absent on the last page
    #[serde(default)]
    pub offset: Option<String>,
}

impl RecordPage {
    /// Records on this page; a missing `records` key means no data
    pub fn into_records(self) -> Vec<RawRecord> {
        self.records.unwrap_or_default()
    }

    /// The offset to request next, if the API signalled more pages
    pub fn next_offset(&self) -> Option<&str> {
        self.offset.as_deref().filter(|o| !o.is_empty())
    }
}

/// A link between two records discovered in a list-of-ids field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    /// Random 12-letter lowercase token
    pub id: String,

    /// Record holding the link field
    pub relation1: String,

    /// Record referenced by the link field
    pub relation2: String,
}

impl RelationEdge {
    /// Flatten into an output row for the `relations` stream
    pub fn to_record(&self) -> Record {
        let mut record = Map::new();
        record.insert("id".to_string(), Value::String(self.id.clone()));
        record.insert("relation1".to_string(), Value::String(self.relation1.clone()));
        record.insert("relation2".to_string(), Value::String(self.relation2.clone()));
        record
    }
}
