//! Fetched result rows.

use rusqlite::types::Value as SqlValue;

/// One row returned by the data store, columns kept in select order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    columns: Vec<(String, SqlValue)>,
}

impl ResultRow {
    /// Build a row from `(column, value)` pairs.
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Look up a column by name.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column value rendered for display, or `None` if the column is absent.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(display_value)
    }

    /// Iterate `(column, value)` pairs in select order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Flatten to `"col: value, col: value"`.
    pub fn flatten(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}: {}", name, display_value(value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Render a SQLite value for human-readable output.
///
/// NULL renders as `NULL`; blobs render as their byte length.
pub fn display_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Integer(i) => i.to_string(),
        SqlValue::Real(f) => f.to_string(),
        SqlValue::Text(s) => s.clone(),
        SqlValue::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
