//! Literal escaping for generated SQL text.
//!
//! Every user-supplied value interpolated into SQL must pass through
//! [`escape_default`] (or a connection's charset-specific override of
//! [`Connection::escape`](crate::Connection::escape)). Identifiers are never
//! escaped; table and column names are taken only from server-reported
//! metadata.

/// Escape a value for embedding between single quotes in SQL text.
///
/// Matches the classic client-library behavior for backslash-capable
/// character sets: NUL, quotes, backslash, and the control characters that
/// would terminate or corrupt a statement are rewritten as escape sequences.
pub fn escape_default(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
