//! Canonical text rendering.
//!
//! Rendering drops the original whitespace. A single space is written only where
//! two word characters would otherwise run together, which keeps the output
//! re-parsable into an equal tree.

use std::fmt::{self, Display, Formatter, Write};

use crate::ast::expression::{
    ArrayExpression, CompositeExpression, Expression, FooExpression, OuterExpression,
    ParameterExpression, PathElement, PathExpression, PropertyExpression, SubqueryExpression,
};

/// Characters that fuse into a single token when adjacent.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\''
}

/// True when `left` followed directly by `right` needs a separating space.
pub(crate) fn needs_separator(left: &str, right: &str) -> bool {
    match (left.chars().next_back(), right.chars().next()) {
        (Some(l), Some(r)) => is_word_char(l) && is_word_char(r),
        _ => false,
    }
}

/// Appends `fragment` to `out`, inserting a space if the two would fuse.
pub(crate) fn push_fragment(out: &mut String, fragment: &str) {
    if needs_separator(out, fragment) {
        out.push(' ');
    }
    out.push_str(fragment);
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Foo(foo) => foo.fmt(f),
            Expression::Property(property) => property.fmt(f),
            Expression::Parameter(parameter) => parameter.fmt(f),
            Expression::Array(array) => array.fmt(f),
            Expression::Path(path) => path.fmt(f),
            Expression::Composite(composite) => composite.fmt(f),
            Expression::Outer(outer) => outer.fmt(f),
            Expression::Subquery(subquery) => subquery.fmt(f),
        }
    }
}

impl Display for FooExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Display for PropertyExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for ParameterExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

impl Display for ArrayExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.base(), self.index())
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Property(property) => property.fmt(f),
            PathElement::Array(array) => array.fmt(f),
        }
    }
}

impl Display for PathExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements().iter().enumerate() {
            if i > 0 {
                f.write_char('.')?;
            }
            element.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for CompositeExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for child in self.children() {
            push_fragment(&mut out, &child.to_string());
        }
        f.write_str(&out)
    }
}

impl Display for OuterExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "OUTER({})", self.path())
    }
}

impl Display for SubqueryExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.subquery().render(f)
    }
}
