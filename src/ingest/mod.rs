//! Loading Cricsheet-style match files into the five tables.
//!
//! Loading is a separate preparation step; question answering only reads.

pub mod cricsheet;
pub mod loader;
pub mod schema;

pub use cricsheet::CricsheetMatch;
pub use loader::{LoadOutcome, LoadSummary, MatchLoader};
pub use schema::CREATE_TABLES;
