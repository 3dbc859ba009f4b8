//! SQL utility functions

/// How a LIKE pattern anchors the user value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMatch {
    Exact,
    Contains,
    StartsWith,
    EndsWith,
}

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching.
///
/// # Example
///
/// ```
/// use secure_filters::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build an escaped LIKE pattern (for use with `ESCAPE '\'`)
pub fn like_pattern(value: &str, mode: LikeMatch) -> String {
    let escaped = escape_like_pattern(value);
    match mode {
        LikeMatch::Exact => escaped,
        LikeMatch::Contains => format!("%{}%", escaped),
        LikeMatch::StartsWith => format!("{}%", escaped),
        LikeMatch::EndsWith => format!("%{}", escaped),
    }
}
