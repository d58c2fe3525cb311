//! Tracing instrumentation.
//!
//! Span fields follow the OpenTelemetry database semantic conventions:
//! - `db.system.name`: always `"sqlite"`
//! - `db.operation.name`: `query`, `load`, ...
//! - `db.query.text`: the SQL being executed
//!
//! # Example
//!
//! ```rust,ignore
//! use cricket_qa::telemetry::db_query_span;
//!
//! let span = db_query_span("SELECT COUNT(*) FROM Matches", "keyword");
//! let _guard = span.enter();
//! ```

pub mod db;
pub mod subscriber;

pub use db::{db_query_span, db_span, llm_span, record_db_metrics, DbOperation};
pub use subscriber::init_tracing;
