//! JPQL path expression parser.
//!
//! Expression text is split into structured paths, bind parameters and
//! `OUTER(...)` calls, with everything else kept as opaque text fragments.
//! Trees can be walked with [`Visit`]/[`VisitMut`] and rewritten one child slot
//! at a time through the modifiers in [`ast::modifier`].
//!
//! # Example
//!
//! ```
//! use jpql_expr::{Expression, parse};
//!
//! let expression = parse("AVG(d.age) + 1").unwrap();
//! let Expression::Composite(composite) = &expression else {
//!     panic!("expected a composite");
//! };
//!
//! assert_eq!(composite.len(), 3);
//! assert_eq!(composite.children()[1].to_string(), "d.age");
//! assert_eq!(expression.to_string(), "AVG(d.age)+1");
//! ```

pub mod ast;
pub mod diag;
pub mod error;
mod factory;
pub mod lexer;
pub mod parser;

// Re-export syntax span primitives.
pub use ast::{Span, Spanned};

// Re-export the AST surface.
pub use ast::{
    ArrayExpression, BoundModifier, CompositeExpression, Expression, ExpressionModifier,
    FooExpression, OuterExpression, ParameterExpression, PathElement, PathExpression,
    PathResolution, PathResolver, PropertyExpression, SlotPath, Subquery, SubqueryExpression,
    Visit, VisitMut, collect_slots, resolve_paths,
};

pub use diag::{Diag, DiagLabel, LabelRole};
pub use error::{ExpressionError, ModifierError, SyntaxError};
pub use factory::ExpressionFactory;
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::{Parser, ParserConfig};

/// Parses expression text with the default configuration.
///
/// Equivalent to [`ExpressionFactory::create_simple_expression`].
pub fn parse(text: &str) -> Result<Expression, ExpressionError> {
    ExpressionFactory::new().create_simple_expression(text)
}

/// Parses text that must be a single path expression.
pub fn parse_path(text: &str) -> Result<PathExpression, ExpressionError> {
    ExpressionFactory::new().create_path_expression(text)
}
