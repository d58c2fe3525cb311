//! Database and model-call spans.

use tracing::{field, span, Level, Span};

/// Database operation types (maps to `db.operation.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOperation {
    /// Read-only query
    Query,
    /// Loader transaction for one file
    Load,
    /// DDL
    CreateSchema,
}

impl DbOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Load => "load",
            Self::CreateSchema => "create_schema",
        }
    }
}

/// Create a span for one SQL statement.
///
/// # Arguments
///
/// * `query_text` - SQL text
/// * `source` - Who produced the SQL (`model`, `keyword`, `cli`, or `direct`)
///
/// # Returns
///
/// Span with `db.response.returned_rows` left empty for [`record_db_metrics`]
pub fn db_query_span(query_text: &str, source: &str) -> Span {
    span!(
        Level::DEBUG,
        "db.query",
        otel.kind = "client",
        db.system.name = "sqlite",
        db.operation.name = DbOperation::Query.as_str(),
        db.query.text = query_text,
        query.source = source,
        db.response.returned_rows = field::Empty,
    )
}

/// Create a span for a non-query database operation.
pub fn db_span(operation: DbOperation, target: Option<&str>) -> Span {
    let span = span!(
        Level::DEBUG,
        "db",
        otel.kind = "client",
        db.system.name = "sqlite",
        db.operation.name = operation.as_str(),
        db.collection.name = field::Empty,
    );
    if let Some(target) = target {
        span.record("db.collection.name", target);
    }
    span
}

/// Create a span around one LLM round trip.
pub fn llm_span(model: &str) -> Span {
    span!(
        Level::DEBUG,
        "llm.request",
        otel.kind = "client",
        gen_ai.request.model = model,
    )
}

/// Record the number of returned rows on the current span.
pub fn record_db_metrics(rows_returned: usize) {
    Span::current().record("db.response.returned_rows", rows_returned);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_operation_names() {
        assert_eq!(DbOperation::Query.as_str(), "query");
        assert_eq!(DbOperation::Load.as_str(), "load");
        assert_eq!(DbOperation::CreateSchema.as_str(), "create_schema");
    }

    #[test]
    fn test_span_names() {
        let span = db_query_span("SELECT 1", "cli");
        assert_eq!(span.metadata().unwrap().name(), "db.query");

        let span = db_span(DbOperation::Load, Some("Matches"));
        assert_eq!(span.metadata().unwrap().name(), "db");

        let span = llm_span("gpt-3.5-turbo");
        assert_eq!(span.metadata().unwrap().name(), "llm.request");
    }
}
