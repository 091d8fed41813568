//! Schema-guided record projection
//!
//! Turns raw API records into flat rows with exactly the schema's columns.
//! Link fields found along the way are handed to the relation accumulator.

use crate::schema::{FieldType, Schema, KEY_FIELD};
use crate::transform::normalize::normalize_field_name;
use crate::transform::relations::RelationAccumulator;
use crate::transform::sanitize::strip_pictographs;
use crate::types::{RawRecord, Record};
use serde_json::{Map, Value};

/// Values the API uses for "nothing here": null, false, 0, "", [] and {}
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Projects raw records onto a normalized schema
pub struct RecordProjector<'a> {
    schema: &'a Schema,
    sanitize: bool,
}

impl<'a> RecordProjector<'a> {
    /// `schema` must already have normalized property keys
    pub fn new(schema: &'a Schema, sanitize: bool) -> Self {
        RecordProjector { schema, sanitize }
    }

    /// Project a batch, one output row per input record
    pub fn project(&self, records: Vec<RawRecord>, relations: &mut RelationAccumulator) -> Vec<Record> {
        records
            .into_iter()
            .map(|record| self.project_record(record, relations))
            .collect()
    }

    fn project_record(&self, record: RawRecord, relations: &mut RelationAccumulator) -> Record {
        let fields: Map<String, Value> = record
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(|(name, value)| (normalize_field_name(&name), value))
            .collect();

        let mut row = Map::new();
        for (key, property) in &self.schema.properties {
            let output = match fields.get(key) {
                Some(value) if !is_blank(value) => self.coerce(value, property.field_type),
                _ => Value::Null,
            };
            row.insert(key.clone(), output);

            if let Some(value) = fields.get(key) {
                relations.observe(value, &record.id);
            }
        }

        row.insert(KEY_FIELD.to_string(), Value::String(record.id));
        row
    }

    fn coerce(&self, value: &Value, field_type: FieldType) -> Value {
        match field_type {
            FieldType::String | FieldType::Number => {
                let text = stringify(value);
                Value::String(if self.sanitize { strip_pictographs(&text) } else { text })
            }
            FieldType::Integer | FieldType::Boolean | FieldType::Array | FieldType::Object => {
                match value {
                    Value::String(s) if self.sanitize => Value::String(strip_pictographs(s)),
                    other => other.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Property;
    use crate::transform::relations::RelationListPolicy;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new("People", true)
            .with_property("Name", Property::new(FieldType::String))
            .with_property("Age", Property::new(FieldType::Number))
            .with_property("Projects", Property::new(FieldType::String))
            .with_property("Meta", Property::new(FieldType::Object))
            .normalized()
    }

    fn raw(id: &str, fields: Value) -> RawRecord {
        RawRecord::new(id, serde_json::from_value(fields).unwrap())
    }

    fn relations() -> RelationAccumulator {
        RelationAccumulator::with_seed(RelationListPolicy::default(), 3)
    }

    #[test]
    fn test_key_set_matches_schema() {
        let schema = schema();
        let projector = RecordProjector::new(&schema, false);
        let records = vec![
            raw("rec1", json!({"Name": "Alice", "Extra Column": "dropped"})),
            raw("rec2", json!({})),
            RawRecord { id: "rec3".to_string(), fields: None },
        ];

        let rows = projector.project(records, &mut relations());
        assert_eq!(rows.len(), 3);
        for row in &rows {
            let keys: Vec<&str> = row.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["id", "name", "age", "projects", "meta"]);
        }
        assert_eq!(rows[2].get("id").unwrap(), "rec3");
        assert_eq!(rows[2].get("name").unwrap(), &Value::Null);
    }

    #[test]
    fn test_missing_and_blank_fields_are_null() {
        let schema = schema();
        let projector = RecordProjector::new(&schema, false);
        let rows = projector.project(
            vec![raw("rec1", json!({"Name": "", "Age": 0, "Meta": {}}))],
            &mut relations(),
        );

        assert_eq!(rows[0]["name"], Value::Null);
        assert_eq!(rows[0]["age"], Value::Null);
        assert_eq!(rows[0]["meta"], Value::Null);
        assert_eq!(rows[0]["projects"], Value::Null);
    }

    #[test]
    fn test_string_and_number_types_are_stringified() {
        let schema = schema();
        let projector = RecordProjector::new(&schema, false);
        let rows = projector.project(
            vec![raw("rec1", json!({"Name": "Alice", "Age": 42, "Meta": {"a": 1}}))],
            &mut relations(),
        );

        assert_eq!(rows[0]["name"], json!("Alice"));
        assert_eq!(rows[0]["age"], json!("42"));
        assert_eq!(rows[0]["meta"], json!({"a": 1}));
        assert_eq!(rows[0]["id"], json!("rec1"));
    }

    #[test]
    fn test_raw_keys_are_normalized_before_lookup() {
        let schema = Schema::new("T", true)
            .with_property("First Name", Property::new(FieldType::String))
            .normalized();
        let projector = RecordProjector::new(&schema, false);
        let rows = projector.project(vec![raw("rec1", json!({"First  Name": "Bo"}))], &mut relations());

        assert_eq!(rows[0]["first_name"], json!("Bo"));
    }

    #[test]
    fn test_emoji_stripping_follows_flag() {
        let schema = schema();
        let record = || vec![raw("rec1", json!({"Name": "Hello 😀 World"}))];

        let rows = RecordProjector::new(&schema, true).project(record(), &mut relations());
        assert_eq!(rows[0]["name"], json!("Hello  World"));

        let rows = RecordProjector::new(&schema, false).project(record(), &mut relations());
        assert_eq!(rows[0]["name"], json!("Hello 😀 World"));
    }

    #[test]
    fn test_untyped_strings_are_sanitized_when_enabled() {
        let schema = Schema::new("T", true)
            .with_property("Note", Property::new(FieldType::Object))
            .with_property("Tags", Property::new(FieldType::Array))
            .normalized();
        let rows = RecordProjector::new(&schema, true).project(
            vec![raw("rec1", json!({"Note": "ok 👍", "Tags": ["🔥"]}))],
            &mut relations(),
        );

        assert_eq!(rows[0]["note"], json!("ok "));
        assert_eq!(rows[0]["tags"], json!(["🔥"]));
    }

    #[test]
    fn test_link_fields_feed_relations() {
        let schema = schema();
        let projector = RecordProjector::new(&schema, false);
        let mut relations = relations();
        let rows = projector.project(
            vec![
                raw("recA", json!({"Projects": ["recP1", "recP2"]})),
                raw("recB", json!({"Projects": ["recP1", "oops", "recP3"], "Unlisted": ["recX"]})),
            ],
            &mut relations,
        );

        assert_eq!(rows[0]["projects"], json!(r#"["recP1","recP2"]"#));

        let pairs: Vec<(&str, &str)> = relations
            .edges()
            .iter()
            .map(|e| (e.relation1.as_str(), e.relation2.as_str()))
            .collect();
        assert_eq!(pairs, vec![("recA", "recP1"), ("recA", "recP2"), ("recB", "recP1")]);
    }

    #[test]
    fn test_colliding_raw_keys_take_later_value() {
        let schema = Schema::new("T", true)
            .with_property("Zeta", Property::new(FieldType::String))
            .normalized();
        let rows = RecordProjector::new(&schema, false)
            .project(vec![raw("rec1", json!({"zeta": "a", "Zeta": "b"}))], &mut relations());

        assert_eq!(rows[0]["zeta"], json!("b"));
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "zeta"]);
    }

    #[test]
    fn test_record_id_wins_over_id_field() {
        let schema = schema();
        let rows = RecordProjector::new(&schema, false)
            .project(vec![raw("rec1", json!({"id": "spoofed"}))], &mut relations());
        assert_eq!(rows[0]["id"], json!("rec1"));
    }
}
