//! Core types shared across the question-answering pipeline.
//!
//! - `QaError`: error taxonomy for every stage
//! - `Result`: crate-wide result alias
//! - `ResultRow`: one fetched row with its column names in select order

pub mod error;
pub mod row;

pub use error::{QaError, Result};
pub use row::{display_value, ResultRow};
