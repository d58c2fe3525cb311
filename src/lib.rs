//! Natural-language questions over a SQLite store of cricket match data.
//!
//! A question is resolved first by an LLM that writes SQL against a fixed
//! schema description, then by an ordered table of keyword rules. The
//! engine always answers with a string.
//!
//! ```rust,ignore
//! use cricket_qa::{Config, Engine};
//!
//! let engine = Engine::from_config(&Config::from_env()?)?;
//! println!("{}", engine.answer("Which player has scored the most runs?").await);
//! ```

pub mod config;
pub mod engine;
pub mod ingest;
pub mod llm;
pub mod query;
pub mod schema;
pub mod storage;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use ingest::MatchLoader;
pub use llm::{LlmQueryBuilder, ModelQuery, QueryModel};
pub use schema::SchemaDescriptor;
pub use storage::DataStore;
pub use types::{QaError, Result, ResultRow};
