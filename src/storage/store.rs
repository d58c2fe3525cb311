//! SQLite data store accessor.
//!
//! Question answering never mutates the store. Every call opens its own
//! read-only connection, and the connection is closed when the
//! `StoreConnection` is dropped, on every exit path.

use crate::telemetry::{db_query_span, record_db_metrics};
use crate::types::{QaError, Result, ResultRow};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Location of the store; cheap to clone, holds no open handle.
#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    /// Point at an existing SQLite database file.
    ///
    /// Nothing is opened here; see [`DataStore::connect`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a scoped read-only connection.
    ///
    /// # Errors
    ///
    /// Returns `QaError::StorageError` if the file is missing or not a database
    pub fn connect(&self) -> Result<StoreConnection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(StoreConnection {
            conn,
            source: DEFAULT_SOURCE,
        })
    }
}

/// Source label used when the caller does not set one.
pub const DEFAULT_SOURCE: &str = "direct";

/// One open read-only connection.
pub struct StoreConnection {
    conn: Connection,
    source: &'static str,
}

impl StoreConnection {
    /// Label queries on this connection with who produced the SQL
    /// (`model`, `keyword`, `cli`); recorded as `query.source` on each span.
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Execute `sql` with positional parameters and fetch at most `row_cap` rows.
    ///
    /// # Arguments
    ///
    /// * `sql` - Statement text (from a template or from the model)
    /// * `params` - Positional parameters bound as `?1`, `?2`, ...
    /// * `row_cap` - Maximum rows to fetch; further rows are not stepped
    ///
    /// # Returns
    ///
    /// Rows with column names in select order
    ///
    /// # Errors
    ///
    /// Returns `QaError::QueryExecutionError` on prepare, bind, or step failure
    pub fn query_rows(
        &self,
        sql: &str,
        params: &[SqlValue],
        row_cap: usize,
    ) -> Result<Vec<ResultRow>> {
        let span = db_query_span(sql, self.source);
        let _guard = span.enter();

        let mut statement = self
            .conn
            .prepare(sql)
            .map_err(|e| QaError::query(format!("failed to prepare query: {}", e)))?;

        let column_names: Vec<String> = statement
            .column_names()
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = statement
            .query(params_from_iter(params.iter()))
            .map_err(|e| QaError::query(format!("failed to execute query: {}", e)))?;

        let mut result = Vec::new();
        while result.len() < row_cap {
            let Some(row) = rows
                .next()
                .map_err(|e| QaError::query(format!("failed to fetch row: {}", e)))?
            else {
                break;
            };

            let mut columns = Vec::with_capacity(column_names.len());
            for (index, name) in column_names.iter().enumerate() {
                let value: SqlValue = row
                    .get(index)
                    .map_err(|e| QaError::query(format!("failed to decode column {}: {}", name, e)))?;
                columns.push((name.clone(), value));
            }
            result.push(ResultRow::new(columns));
        }

        record_db_metrics(result.len());
        tracing::debug!(rows = result.len(), "query executed");
        Ok(result)
    }

    /// Fetch the first row, if any.
    pub fn query_first(&self, sql: &str, params: &[SqlValue]) -> Result<Option<ResultRow>> {
        Ok(self.query_rows(sql, params, 1)?.into_iter().next())
    }
}
