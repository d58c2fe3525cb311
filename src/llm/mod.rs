//! LLM-backed question-to-SQL resolution.

pub mod planner;
pub mod query_builder;

pub use planner::{ModelQuery, QueryModel};
pub use query_builder::{LlmProvider, LlmQueryBuilder};
