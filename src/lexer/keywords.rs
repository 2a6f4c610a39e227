//! Keyword recognition.
//!
//! Keywords are plain identifiers to the lexer. The builder classifies them
//! case-insensitively when deciding whether an identifier can start a path.

/// Identifiers with special meaning to the expression builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `OUTER(path)`.
    Outer,
    /// `SIZE(path)`.
    Size,
    /// `x MEMBER OF path`.
    Member,
    /// `path IS EMPTY`.
    Empty,
    /// Any other reserved word. Never starts a path.
    Reserved,
}

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<Keyword> {
    match name.to_ascii_uppercase().as_str() {
        "OUTER" => Some(Keyword::Outer),
        "SIZE" => Some(Keyword::Size),
        "MEMBER" => Some(Keyword::Member),
        "EMPTY" => Some(Keyword::Empty),

        "AND" | "OR" | "NOT" | "IS" | "NULL" | "TRUE" | "FALSE" | "IN" | "LIKE" | "BETWEEN"
        | "ESCAPE" | "OF" | "DISTINCT" | "CASE" | "WHEN" | "THEN" | "ELSE" | "END" | "AS"
        | "ASC" | "DESC" | "NULLS" | "FIRST" | "LAST" | "EXISTS" | "ALL" | "ANY" | "SOME" => {
            Some(Keyword::Reserved)
        }

        _ => None,
    }
}

/// Returns true if `name` is a keyword and therefore cannot start a path.
pub fn is_keyword(name: &str) -> bool {
    lookup_keyword(name).is_some()
}
