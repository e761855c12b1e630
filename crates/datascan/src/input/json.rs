//! JSON report parser.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DatascanError, Result};
use super::cell::Cell;
use super::parser::FormatParser;
use super::source::{Dataset, SourceFormat};

/// Header used when the document is an array of scalars.
const VALUE_HEADER: &str = "Value";

/// Parses JSON documents into a dataset.
///
/// Accepted shapes:
/// - an array of objects: headers are the first object's keys in document
///   order; later objects are read by those keys, missing keys become null
/// - an array of arrays: headers are the first array's indices (`0`, `1`,
///   ...); later arrays are read by position
/// - an array of scalars: a single `Value` column
/// - a single object: one row
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl JsonParser {
    pub fn new() -> Self {
        Self
    }

    fn object_rows(first: &Map<String, Value>, items: &[Value]) -> (Vec<String>, Vec<Vec<Cell>>) {
        let headers: Vec<String> = first.keys().cloned().collect();
        let rows = Self::keyed_rows(&headers, items);
        (headers, rows)
    }

    /// Arrays of arrays are read positionally, with column indices as headers.
    fn indexed_rows(first: &[Value], items: &[Value]) -> (Vec<String>, Vec<Vec<Cell>>) {
        let headers: Vec<String> = (0..first.len()).map(|i| i.to_string()).collect();
        let rows = Self::keyed_rows(&headers, items);
        (headers, rows)
    }

    fn keyed_rows(headers: &[String], items: &[Value]) -> Vec<Vec<Cell>> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(obj) => headers
                    .iter()
                    .map(|h| obj.get(h).map(Cell::from_json).unwrap_or(Cell::Null))
                    .collect(),
                Value::Array(values) => (0..headers.len())
                    .map(|i| values.get(i).map(Cell::from_json).unwrap_or(Cell::Null))
                    .collect(),
                // A stray scalar keeps its value in the first column.
                other => vec![Cell::from_json(other)],
            })
            .collect()
    }
}

impl FormatParser for JsonParser {
    fn parse(&self, text: &str, file_name: &str) -> Result<Dataset> {
        let document: Value = serde_json::from_str(text)?;

        let (headers, rows, shape) = match &document {
            Value::Array(items) => match items.first() {
                None => {
                    return Err(DatascanError::EmptyFile("JSON array is empty".to_string()));
                }
                Some(Value::Object(first)) => {
                    let (headers, rows) = Self::object_rows(first, items);
                    (headers, rows, "array of objects")
                }
                Some(Value::Array(first)) => {
                    let (headers, rows) = Self::indexed_rows(first, items);
                    (headers, rows, "array of arrays")
                }
                Some(_) => {
                    let rows = items.iter().map(|item| vec![Cell::from_json(item)]).collect();
                    (vec![VALUE_HEADER.to_string()], rows, "array of values")
                }
            },
            Value::Object(obj) => {
                let headers: Vec<String> = obj.keys().cloned().collect();
                let row = obj.values().map(Cell::from_json).collect();
                (headers, vec![row], "single object")
            }
            _ => {
                return Err(DatascanError::InvalidStructure(
                    "Invalid JSON structure for report data".to_string(),
                ));
            }
        };

        debug!(
            file = file_name,
            shape,
            columns = headers.len(),
            rows = rows.len(),
            "parsed JSON document"
        );

        Ok(Dataset::new(headers, rows, file_name, SourceFormat::Json))
    }
}
