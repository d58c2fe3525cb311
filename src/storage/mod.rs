//! Read-only access to the relational store.

pub mod store;

pub use store::{DataStore, StoreConnection, DEFAULT_SOURCE};
