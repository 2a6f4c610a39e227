//! Source spans for tokens and diagnostics.

use std::ops::Range;

/// A byte range in the expression text.
pub type Span = Range<usize>;

/// A value paired with the span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Where the value appears in the source text.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Extracts the inner value, discarding the span.
    pub fn into_inner(self) -> T {
        self.node
    }
}

/// Returns the smallest span covering both `a` and `b`.
pub fn cover(a: &Span, b: &Span) -> Span {
    a.start.min(b.start)..a.end.max(b.end)
}
