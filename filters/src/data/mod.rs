//! Data layer
//!
//! - `filters` - Filter declaration, validation and resolution
//! - `sql` - SQL-backed queryable and dialects
//! - `sqlite` - SQLite schema introspection and execution

pub mod filters;
pub mod sql;
pub mod sqlite;
