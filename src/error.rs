//! Error types returned by the public API.

use miette::LabeledSpan;

use crate::ast::{Slot, Span};
use crate::diag::{Diag, SourceFile};

/// Errors produced by [`crate::ExpressionFactory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ExpressionError {
    /// The input was empty or blank.
    #[error("invalid argument: {argument} must not be empty or blank")]
    #[diagnostic(code(jpql_expr::invalid_argument))]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: &'static str,
    },

    /// The input could not be lexed or parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// The requested grammar is not implemented.
    #[error("the {grammar} expression grammar is not supported")]
    #[diagnostic(code(jpql_expr::unsupported_grammar))]
    UnsupportedGrammar {
        /// Name of the grammar.
        grammar: &'static str,
    },
}

impl ExpressionError {
    /// Returns the syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ExpressionError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// A lexical or structural violation in expression text.
///
/// Renders as `Could not parse expression '<text>', line L:C <message>` and,
/// through miette, as a labeled snippet of the expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("Could not parse expression '{expression}', line {line}:{column} {message}")]
#[diagnostic(code(jpql_expr::syntax))]
pub struct SyntaxError {
    #[source_code]
    expression: String,
    #[label(collection)]
    labels: Vec<LabeledSpan>,
    #[help]
    help: Option<String>,
    span: Span,
    line: usize,
    column: usize,
    message: String,
    code: Option<String>,
}

impl SyntaxError {
    /// Creates an error at `span` with a single label.
    pub fn new(expression: &str, span: Span, message: impl Into<String>) -> Self {
        Self::from_diag(expression, &Diag::error(message).with_primary_label(span, "here"))
    }

    /// Converts a lexer or builder diagnostic.
    pub fn from_diag(expression: &str, diag: &Diag) -> Self {
        let source = SourceFile::new(expression);
        let span = source.clamp_span(
            &diag
                .primary_span()
                .unwrap_or(expression.len()..expression.len()),
        );
        let (line, column) = source.line_col(span.start);
        Self {
            expression: expression.to_owned(),
            labels: source.labeled_spans(diag),
            help: diag.help.clone(),
            span,
            line,
            column,
            message: diag.message.clone(),
            code: diag.code.clone(),
        }
    }

    /// The expression text that failed to parse.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Byte range of the offending input.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// 1-based line of the offending input.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based character column of the offending input.
    pub fn column(&self) -> usize {
        self.column
    }

    /// What went wrong, without the position prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Internal error code such as `L001` or `P006`.
    pub fn error_code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Errors from applying a modifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// The modifier has no target parent.
    #[error("modifier is not bound to a parent expression")]
    Unbound,

    /// The slot index is past the end of the parent's children.
    #[error("slot index {index} is out of bounds for a parent with {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The slot does not exist on the node found at that position.
    #[error("slot {slot:?} does not exist on a {found} expression")]
    SlotMismatch { slot: Slot, found: &'static str },
}
