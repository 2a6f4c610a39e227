//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! - [`parse_ok`] - parse text, panicking with the error on failure
//! - [`parse_err`] - parse text, expecting a syntax error
//! - [`rendered_children`] - render the top-level children of a parse

#![allow(dead_code)]

use jpql_expr::{Expression, ExpressionError, PathExpression, SyntaxError, parse};

/// Parses `text` and panics with the error if it fails.
pub fn parse_ok(text: &str) -> Expression {
    match parse(text) {
        Ok(expression) => expression,
        Err(err) => panic!("expected `{text}` to parse, got: {err}"),
    }
}

/// Parses `text` and returns the syntax error it must produce.
pub fn parse_err(text: &str) -> SyntaxError {
    match parse(text) {
        Ok(expression) => panic!("expected `{text}` to fail, got: {expression:?}"),
        Err(ExpressionError::Syntax(err)) => err,
        Err(other) => panic!("expected a syntax error for `{text}`, got: {other:?}"),
    }
}

/// Parses `text`, which must yield a single path.
pub fn parse_single_path(text: &str) -> PathExpression {
    match parse_ok(text) {
        Expression::Path(path) => path,
        other => panic!("expected `{text}` to be a single path, got: {other:?}"),
    }
}

/// Renders each top-level child; a non-composite result counts as one child.
pub fn rendered_children(text: &str) -> Vec<String> {
    match parse_ok(text) {
        Expression::Composite(composite) => {
            composite.children().iter().map(ToString::to_string).collect()
        }
        other => vec![other.to_string()],
    }
}

/// Short variant name of each top-level child.
pub fn child_kinds(text: &str) -> Vec<&'static str> {
    match parse_ok(text) {
        Expression::Composite(composite) => {
            composite.children().iter().map(Expression::kind_name).collect()
        }
        other => vec![other.kind_name()],
    }
}
