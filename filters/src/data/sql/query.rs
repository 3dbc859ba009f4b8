//! SQL query builder
//!
//! Conditions are stored with their `?` marker position next to an ordered
//! parameter list and only rendered into backend placeholders by
//! [`SqlQuery::to_sql`]. A `?` inside a quoted string literal is never a
//! marker. Every builder method returns a new query.

use super::Backend;
use crate::data::filters::{FilterValue, Queryable};
use crate::utils::sql::{LikeMatch, like_pattern};

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlParams {
    pub values: Vec<FilterValue>,
}

/// One `WHERE` term; `marker` is the byte offset of its bound `?`, if any
#[derive(Debug, Clone)]
struct Condition {
    sql: String,
    marker: Option<usize>,
}

/// Byte offsets of `?` markers outside single-quoted literals
fn marker_offsets(condition: &str) -> Vec<usize> {
    let mut in_literal = false;
    condition
        .char_indices()
        .filter_map(|(i, ch)| match ch {
            '\'' => {
                in_literal = !in_literal;
                None
            }
            '?' if !in_literal => Some(i),
            _ => None,
        })
        .collect()
}

/// Conjunctive `SELECT` over one table
#[derive(Debug, Clone)]
pub struct SqlQuery {
    backend: Backend,
    table: String,
    joins: Vec<String>,
    conditions: Vec<Condition>,
    params: SqlParams,
}

impl SqlQuery {
    /// Query over every row of `table` (SQLite dialect)
    pub fn new(table: impl Into<String>) -> Self {
        Self::for_backend(Backend::Sqlite, table)
    }

    pub fn for_backend(backend: Backend, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
            joins: Vec::new(),
            conditions: Vec::new(),
            params: SqlParams::default(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Table-qualified column name
    pub fn column(&self, field: &str) -> String {
        format!("{}.{}", self.table, field)
    }

    /// Condition templates, in the order they were added
    pub fn conditions(&self) -> Vec<&str> {
        self.conditions.iter().map(|c| c.sql.as_str()).collect()
    }

    pub fn params(&self) -> &SqlParams {
        &self.params
    }

    /// Add a JOIN clause (never carries parameters)
    pub fn join(&self, clause: &str) -> Self {
        let mut next = self.clone();
        next.joins.push(clause.to_string());
        next
    }

    /// Whether a JOIN on `table` was added earlier
    pub fn joins_table(&self, table: &str) -> bool {
        self.joins
            .iter()
            .any(|clause| clause.split_whitespace().any(|word| word == table))
    }

    /// Add a parameter-free condition, rendered verbatim
    pub fn filter(&self, condition: &str) -> Self {
        let mut next = self.clone();
        next.conditions.push(Condition {
            sql: condition.to_string(),
            marker: None,
        });
        next
    }

    /// Case-insensitive LIKE on a column expression, with `value` escaped
    pub fn where_like(&self, column: &str, value: &str, mode: LikeMatch) -> Self {
        let condition = self.backend.dialect().like_ignore_case(column);
        self.where_raw(&condition, FilterValue::Text(like_pattern(value, mode)))
    }

    /// Render the query with backend placeholders
    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT {table}.* FROM {table}", table = self.table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.conditions.is_empty() {
            let dialect = self.backend.dialect();
            let mut index = 0;
            let rendered: Vec<String> = self
                .conditions
                .iter()
                .map(|condition| match condition.marker {
                    Some(offset) => {
                        index += 1;
                        format!(
                            "{}{}{}",
                            &condition.sql[..offset],
                            dialect.placeholder(index),
                            &condition.sql[offset + 1..]
                        )
                    }
                    None => condition.sql.clone(),
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&rendered.join(" AND "));
        }
        sql
    }
}

impl Queryable for SqlQuery {
    fn where_all(&self) -> Self {
        self.clone()
    }

    fn where_equals(&self, field: &str, value: &FilterValue) -> Self {
        let condition = format!("{} = ?", self.column(field));
        self.where_raw(&condition, value.clone())
    }

    /// # Panics
    ///
    /// If `condition` does not carry exactly one `?` marker outside string
    /// literals. Binding by position would misalign otherwise.
    fn where_raw(&self, condition: &str, value: FilterValue) -> Self {
        let markers = marker_offsets(condition);
        assert!(
            markers.len() == 1,
            "condition must carry exactly one ? marker, found {}: {}",
            markers.len(),
            condition
        );
        let mut next = self.clone();
        next.conditions.push(Condition {
            sql: condition.to_string(),
            marker: Some(markers[0]),
        });
        next.params.values.push(value);
        next
    }

    fn where_equals_ignore_case(&self, field: &str, value: &str) -> Self {
        let column = self.backend.dialect().lower(&self.column(field));
        self.where_raw(
            &format!("{} = ?", column),
            FilterValue::Text(value.to_lowercase()),
        )
    }
}
