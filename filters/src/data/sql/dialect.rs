//! SQL dialect trait for multi-database support
//!
//! Filter predicates are written once with `?` markers and rendered per
//! backend when the query is turned into SQL.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Case-insensitive pattern matching
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Lower-case a column expression
    fn lower(&self, col: &str) -> String {
        format!("lower({})", col)
    }

    /// Case-insensitive LIKE against one bound pattern, `\` as escape
    ///
    /// - SQLite: `col LIKE ? ESCAPE '\'` (LIKE is ASCII case-insensitive)
    /// - PostgreSQL: `col ILIKE ? ESCAPE '\'`
    fn like_ignore_case(&self, col: &str) -> String {
        format!("{} LIKE ? ESCAPE '\\'", col)
    }
}
