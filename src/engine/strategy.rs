//! Resolution strategies.
//!
//! Each strategy turns a question into a finished answer, reports that it
//! has nothing to say, or reports a failure. The orchestrator tries them in
//! order and falls back on anything but an answer.

use crate::llm::QueryModel;
use crate::query::{
    render_model_answer, render_plan, resolve_via_keywords, QuestionAnalyzer,
};
use crate::schema::SchemaDescriptor;
use crate::storage::DataStore;
use crate::types::{QaError, Result, ResultRow};
use async_trait::async_trait;

/// Outcome of one strategy.
#[derive(Debug)]
pub enum Resolution {
    /// Final answer text
    Answered(String),
    /// Strategy had no plan, or its plan produced no rows
    NoMatch,
    /// Strategy failed
    Failed(QaError),
}

/// One way of answering a question.
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn resolve(&self, question: &str, store: &DataStore) -> Resolution;
}

/// Model-first strategy: ask the LLM for SQL, run it, render the first row.
pub struct ModelStrategy {
    model: Box<dyn QueryModel>,
    schema: SchemaDescriptor,
}

impl ModelStrategy {
    pub fn new(model: Box<dyn QueryModel>, schema: SchemaDescriptor) -> Self {
        Self { model, schema }
    }

    /// Run model SQL; every store failure counts as an execution error so
    /// the keyword strategy still gets its turn.
    async fn execute(store: &DataStore, sql: String) -> Result<Vec<ResultRow>> {
        let store = store.clone();
        run_blocking(move || {
            let conn = store
                .connect()
                .map_err(|e| QaError::query(format!("store unavailable: {}", e)))?
                .with_source("model");
            conn.query_rows(&sql, &[], 1)
        })
        .await
    }
}

#[async_trait]
impl ResolutionStrategy for ModelStrategy {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn resolve(&self, question: &str, store: &DataStore) -> Resolution {
        let query = match self.model.resolve_via_model(question, &self.schema).await {
            Ok(query) => query,
            Err(e) => return Resolution::Failed(e),
        };
        tracing::debug!(model = self.model.model_name(), sql = %query.sql, "model produced sql");

        match Self::execute(store, query.sql).await {
            Ok(rows) => match render_model_answer(&query.explanation, &rows) {
                Some(answer) => Resolution::Answered(answer),
                None => Resolution::NoMatch,
            },
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// Rule-based strategy over analyzed keywords and entities.
pub struct KeywordStrategy {
    analyzer: Box<dyn QuestionAnalyzer>,
}

impl KeywordStrategy {
    pub fn new(analyzer: Box<dyn QuestionAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl ResolutionStrategy for KeywordStrategy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn resolve(&self, question: &str, store: &DataStore) -> Resolution {
        let analysis = self.analyzer.analyze(question);
        let Some(plan) = resolve_via_keywords(&analysis.keywords, &analysis.entities) else {
            return Resolution::NoMatch;
        };

        let store = store.clone();
        let answer = run_blocking(move || {
            let conn = store.connect()?.with_source("keyword");
            let rows = conn.query_rows(plan.sql, &plan.params, plan.row_cap())?;
            Ok(render_plan(&plan, &rows))
        })
        .await;

        match answer {
            Ok(answer) => Resolution::Answered(answer),
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// Run synchronous SQLite work off the async worker threads.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| QaError::InternalError(format!("store task failed: {}", e)))?
}
