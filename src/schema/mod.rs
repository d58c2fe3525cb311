//! Static description of the cricket tables, used as model context.

pub mod descriptor;

pub use descriptor::{SchemaDescriptor, TableDescriptor};
