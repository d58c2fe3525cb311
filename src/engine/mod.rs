//! Question orchestration.
//!
//! `Engine::answer` is the single entry point for hosts. It runs the
//! strategy chain (model, then keywords) and always returns a string:
//!
//! 1. Model strategy: SQL from the LLM, executed read-only. One or more rows
//!    is an answer; zero rows or any model/SQL failure falls through.
//! 2. Keyword strategy: analyzed keywords matched against the rule table.
//! 3. No strategy answered: the fixed help message.
//!
//! Unrecoverable failures (e.g. the store cannot be opened for the keyword
//! path) become `"An error occurred while processing your question: ..."`.

pub mod strategy;

pub use strategy::{KeywordStrategy, ModelStrategy, Resolution, ResolutionStrategy};

use crate::config::Config;
use crate::llm::{LlmQueryBuilder, QueryModel};
use crate::query::{RuleAnalyzer, DEFAULT_HELP};
use crate::schema::SchemaDescriptor;
use crate::storage::DataStore;
use crate::types::Result;

/// Prefix for answers produced from an unrecoverable failure.
pub const ERROR_PREFIX: &str = "An error occurred while processing your question: ";

/// Question-answering engine. Holds no per-question state.
pub struct Engine {
    store: DataStore,
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl Engine {
    /// Create an engine with an explicit strategy chain.
    pub fn new(store: DataStore, strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { store, strategies }
    }

    /// Model strategy first, keyword strategy second.
    pub fn with_model(store: DataStore, model: Box<dyn QueryModel>) -> Self {
        Self::new(
            store,
            vec![
                Box::new(ModelStrategy::new(model, SchemaDescriptor::cricket())),
                Box::new(KeywordStrategy::new(Box::new(RuleAnalyzer))),
            ],
        )
    }

    /// Keyword strategy only; no model calls are made.
    pub fn keyword_only(store: DataStore) -> Self {
        Self::new(store, vec![Box::new(KeywordStrategy::new(Box::new(RuleAnalyzer)))])
    }

    /// Build the default chain from configuration.
    ///
    /// # Errors
    ///
    /// Returns `QaError::ConfigError` if the provider credential is missing
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = LlmQueryBuilder::from_config(config)?;
        tracing::info!(model = %config.model, db = %config.db_path.display(), "engine ready");
        Ok(Self::with_model(DataStore::open(&config.db_path), Box::new(model)))
    }

    /// Answer a question. Never fails; every outcome is a message.
    pub async fn answer(&self, question: &str) -> String {
        match self.try_answer(question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "question failed");
                format!("{}{}", ERROR_PREFIX, e)
            }
        }
    }

    async fn try_answer(&self, question: &str) -> Result<String> {
        for strategy in &self.strategies {
            match strategy.resolve(question, &self.store).await {
                Resolution::Answered(answer) => {
                    tracing::info!(strategy = strategy.name(), "question answered");
                    return Ok(answer);
                }
                Resolution::NoMatch => {
                    tracing::debug!(strategy = strategy.name(), "no answer, falling back");
                }
                Resolution::Failed(e) if e.is_recoverable() => {
                    tracing::warn!(strategy = strategy.name(), error = %e, "strategy failed, falling back");
                }
                Resolution::Failed(e) => return Err(e),
            }
        }
        Ok(DEFAULT_HELP.to_string())
    }
}
