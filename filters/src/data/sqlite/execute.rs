//! Query execution

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use crate::data::filters::FilterValue;
use crate::data::sql::SqlQuery;

/// Run a filtered query, binding parameters in order
pub async fn fetch_all(pool: &SqlitePool, query: &SqlQuery) -> Result<Vec<SqliteRow>, sqlx::Error> {
    let sql = query.to_sql();
    tracing::trace!(%sql, params = query.params().values.len(), "Executing filtered query");

    let mut statement = sqlx::query::<sqlx::Sqlite>(&sql);
    for value in &query.params().values {
        statement = match value {
            FilterValue::Text(s) => statement.bind(s.clone()),
            FilterValue::Integer(i) => statement.bind(*i),
            FilterValue::Float(f) => statement.bind(*f),
            FilterValue::Boolean(b) => statement.bind(*b),
        };
    }
    statement.fetch_all(pool).await
}
