//! Infrastructure Layer
//!
//! Database implementations and schema bootstrap.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteCrmRepository;
