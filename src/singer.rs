//! Singer message output
//!
//! Schemas and records go to the output as newline-delimited JSON messages,
//! one `SCHEMA` per stream followed by its `RECORD`s.

use crate::error::Result;
use crate::schema::Schema;
use crate::types::Record;
use serde::Serialize;
use std::io::Write;

/// Sink for the streams a sync run produces
pub trait StreamEmitter {
    fn emit_schema(&mut self, stream: &str, schema: &Schema, key_field: &str) -> Result<()>;

    fn emit_records(&mut self, stream: &str, records: &[Record]) -> Result<()>;
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum Message<'a> {
    Schema {
        stream: &'a str,
        schema: &'a Schema,
        key_properties: [&'a str; 1],
    },
    Record {
        stream: &'a str,
        record: &'a Record,
    },
}

/// Writes Singer messages as JSON lines
pub struct SingerWriter<W: Write> {
    writer: W,
}

impl<W: Write> SingerWriter<W> {
    pub fn new(writer: W) -> Self {
        SingerWriter { writer }
    }

    fn write_message(&mut self, message: &Message<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StreamEmitter for SingerWriter<W> {
    fn emit_schema(&mut self, stream: &str, schema: &Schema, key_field: &str) -> Result<()> {
        self.write_message(&Message::Schema {
            stream,
            schema,
            key_properties: [key_field],
        })
    }

    fn emit_records(&mut self, stream: &str, records: &[Record]) -> Result<()> {
        for record in records {
            self.write_message(&Message::Record { stream, record })?;
        }
        Ok(())
    }
}
