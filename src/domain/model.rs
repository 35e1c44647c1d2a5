use serde::Serialize;
use serde_json::{Map, Value};

/// Default key under which the extra cells of an over-long row are collected.
pub const OVERFLOW_KEY: &str = "__overflow__";

/// Ordered column names taken from the first CSV record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// [`OVERFLOW_KEY`], suffixed with a number when a column already uses that name.
    pub fn overflow_key(&self) -> String {
        let taken = |key: &str| self.columns.iter().any(|c| c == key);
        if !taken(OVERFLOW_KEY) {
            return OVERFLOW_KEY.to_string();
        }
        (1..)
            .map(|n| format!("{OVERFLOW_KEY}{n}"))
            .find(|key| !taken(key.as_str()))
            .unwrap_or_else(|| OVERFLOW_KEY.to_string())
    }
}

/// A data record as tokenized from the source, before it is keyed by the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based source line on which the record starts.
    pub line: u64,
    pub fields: Vec<String>,
}

/// One converted data row: column name -> cell text, in header order.
///
/// Padding placeholders are `null`; everything read from the source stays a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Later duplicates of a column replace the value but keep the first position.
    pub fn insert_text(&mut self, column: &str, value: String) {
        self.0.insert(column.to_string(), Value::String(value));
    }

    pub fn insert_null(&mut self, column: &str) {
        self.0.insert(column.to_string(), Value::Null);
    }

    pub fn set_overflow(&mut self, key: String, extra: Vec<String>) {
        let extra = extra.into_iter().map(Value::String).collect();
        self.0.insert(key, Value::Array(extra));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All rows of one source file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of fitting one record to the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub row: Row,
    /// Columns filled with a `null` placeholder.
    pub padded: usize,
    /// Cells kept under the header's overflow key.
    pub overflow: usize,
}

/// What to do when a data row does not have as many fields as the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Pad short rows with `null`, collect extras under [`OVERFLOW_KEY`].
    #[default]
    Permissive,
    /// Abort the conversion on the first mismatch.
    Strict,
}
