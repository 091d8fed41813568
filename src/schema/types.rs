//! Typed stream schemas
//!
//! Each property carries a closed [`FieldType`] tag instead of a raw JSON
//! type list, so coercion can match on it exhaustively.

use crate::error::TapError;
use crate::transform::normalize_field_name;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the synthetic stream carrying relation edges
pub const RELATIONS_STREAM: &str = "relations";

/// Key property every stream is emitted with
pub const KEY_FIELD: &str = "id";

/// Nullable JSON Schema type of a property.
///
/// Serialized as `["null", "<tag>"]`, the shape discovery writes into catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    fn tag(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "integer" => Some(FieldType::Integer),
            "boolean" => Some(FieldType::Boolean),
            "array" => Some(FieldType::Array),
            "object" => Some(FieldType::Object),
            _ => None,
        }
    }
}

impl TryFrom<Vec<String>> for FieldType {
    type Error = TapError;

    fn try_from(types: Vec<String>) -> Result<Self, Self::Error> {
        let field_type = match types.as_slice() {
            [null, tag] if null == "null" => FieldType::from_tag(tag),
            _ => None,
        };
        field_type.ok_or(TapError::InvalidFieldType(types))
    }
}

impl From<FieldType> for Vec<String> {
    fn from(field_type: FieldType) -> Self {
        vec!["null".to_string(), field_type.tag().to_string()]
    }
}

/// A single column of a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
}

impl Property {
    pub fn new(field_type: FieldType) -> Self {
        Property {
            field_type,
            key: None,
        }
    }

    pub fn key(field_type: FieldType) -> Self {
        Property {
            field_type,
            key: Some(true),
        }
    }
}

/// Schema of one table, as stored in the catalog's `metadata`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Remote table name, used verbatim in the records URL
    pub name: String,

    #[serde(default)]
    pub selected: bool,

    /// Columns in source order, `id` first
    pub properties: IndexMap<String, Property>,
}

impl Schema {
    /// A schema holding only the `id` key property
    pub fn new(name: impl Into<String>, selected: bool) -> Self {
        let mut properties = IndexMap::new();
        properties.insert(KEY_FIELD.to_string(), Property::key(FieldType::String));
        Schema {
            name: name.into(),
            selected,
            properties,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Rewrite every property key through the field-name normalizer.
    ///
    /// Record field keys go through the same function before lookup. When two
    /// names collapse onto one key, the later one in source order wins and the
    /// key keeps the position of the first.
    pub fn normalized(self) -> Self {
        let properties = self
            .properties
            .into_iter()
            .map(|(name, property)| (normalize_field_name(&name), property))
            .collect();
        Schema { properties, ..self }
    }

    /// The fixed schema of the synthetic relations stream
    pub fn relations() -> Self {
        Schema {
            name: RELATIONS_STREAM.to_string(),
            selected: true,
            properties: [KEY_FIELD, "relation1", "relation2"]
                .into_iter()
                .map(|name| (name.to_string(), Property::new(FieldType::String)))
                .collect(),
        }
    }
}
