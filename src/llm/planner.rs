//! Model reply contract and the strategy seam.

use crate::schema::SchemaDescriptor;
use crate::types::{QaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// SQL plus a one-line explanation, as returned by the model.
///
/// Parsing is strict: both keys required, both strings, nothing else allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelQuery {
    /// SQL to run against the store
    pub sql: String,

    /// Human-readable one-liner describing the result
    pub explanation: String,
}

impl ModelQuery {
    /// Parse a model reply.
    ///
    /// # Errors
    ///
    /// Returns `QaError::MalformedResponse` if the text is not a JSON object
    /// with exactly the string keys `sql` and `explanation`, or if `sql` is blank
    pub fn parse(text: &str) -> Result<Self> {
        let query: ModelQuery = serde_json::from_str(text.trim())
            .map_err(|e| QaError::MalformedResponse(format!("{}: {}", e, text)))?;

        if query.sql.trim().is_empty() {
            return Err(QaError::MalformedResponse("empty sql".to_string()));
        }

        Ok(query)
    }
}

/// Something that can map a question to SQL given the schema.
///
/// Implemented by [`crate::llm::LlmQueryBuilder`]; tests provide fakes.
#[async_trait]
pub trait QueryModel: Send + Sync {
    /// Resolve `question` into a [`ModelQuery`].
    ///
    /// One outbound call per question, no retry.
    async fn resolve_via_model(
        &self,
        question: &str,
        schema: &SchemaDescriptor,
    ) -> Result<ModelQuery>;

    /// Model name for logs.
    fn model_name(&self) -> &str;
}
