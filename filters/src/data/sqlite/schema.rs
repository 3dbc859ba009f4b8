//! Column type introspection

use sqlx::SqlitePool;

use crate::data::filters::{FieldMap, PrimitiveType};

/// Map a declared SQLite column type onto a filterable primitive
///
/// Length and precision suffixes are ignored (`VARCHAR(255)` is a string).
/// Types outside the primitive set (dates, blobs, ...) return `None`.
pub fn sqlite_column_type(declared: &str) -> Option<PrimitiveType> {
    let base = declared
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();

    match base.as_str() {
        "BIGINT" | "UNSIGNED BIG INT" | "INT8" => Some(PrimitiveType::Bigint),
        "INT" | "INTEGER" | "SMALLINT" | "TINYINT" | "MEDIUMINT" | "INT2" => {
            Some(PrimitiveType::Integer)
        }
        "BOOL" | "BOOLEAN" => Some(PrimitiveType::Boolean),
        "DECIMAL" | "NUMERIC" => Some(PrimitiveType::Decimal),
        "REAL" | "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" => Some(PrimitiveType::Float),
        "VARCHAR" | "CHAR" | "CHARACTER" | "NCHAR" | "NVARCHAR" | "VARYING CHARACTER"
        | "STRING" => Some(PrimitiveType::String),
        "TEXT" | "CLOB" => Some(PrimitiveType::Text),
        _ => None,
    }
}

/// Filterable columns of a table
///
/// Columns whose declared type is not a supported primitive are left out,
/// so declaring an attribute filter on them fails.
pub async fn table_fields(pool: &SqlitePool, table: &str) -> Result<FieldMap, sqlx::Error> {
    let columns: Vec<(String, String)> =
        sqlx::query_as("SELECT name, type FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(pool)
            .await?;

    let mut fields = FieldMap::new();
    for (name, declared) in columns {
        match sqlite_column_type(&declared) {
            Some(primitive) => fields.insert(name, primitive),
            None => {
                tracing::trace!(%table, column = %name, %declared, "Column not filterable");
            }
        }
    }
    tracing::debug!(%table, fields = fields.len(), "Introspected filterable columns");
    Ok(fields)
}
