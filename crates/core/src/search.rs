//! Question search helpers.
//!
//! Search is a case-insensitive substring match on the question text. The
//! repository turns the term into an `ILIKE` pattern; the in-memory store
//! uses [`matches_term`] directly.

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Build an `ILIKE` pattern that matches `term` anywhere in a column.
///
/// `%`, `_` and the escape character itself are escaped so the term is
/// matched literally.
pub fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring check equivalent to [`substring_pattern`].
pub fn matches_term(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}
