//! SQLite integration
//!
//! Schema introspection feeding [`FieldMap`](crate::data::filters::FieldMap)
//! and execution of [`SqlQuery`](crate::data::sql::SqlQuery) through sqlx.

mod execute;
mod schema;

pub use execute::fetch_all;
pub use schema::{sqlite_column_type, table_fields};

#[cfg(test)]
mod students_tests;
