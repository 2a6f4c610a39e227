//! Public entry points that turn expression text into trees.

use tracing::debug;

use crate::ast::{CompositeExpression, Expression, PathExpression};
use crate::error::{ExpressionError, SyntaxError};
use crate::lexer::tokenize;
use crate::parser::{Parser, ParserConfig};

const TARGET: &str = "jpql_expr::factory";

/// Parses expression text with a fixed [`ParserConfig`].
///
/// The factory holds no per-parse state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExpressionFactory {
    config: ParserConfig,
}

impl ExpressionFactory {
    /// Creates a factory with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with a custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The configuration every parse uses.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `text`, returning the only child if the result has exactly one.
    pub fn create_simple_expression(&self, text: &str) -> Result<Expression, ExpressionError> {
        let composite = self.create_composite(text, "expression")?;
        let unwrap = composite.len() == 1;
        debug!(target: TARGET, children = composite.len(), unwrap, "expression parsed");
        Ok(composite.simplify())
    }

    /// Parses `text`, which must consist of exactly one path.
    pub fn create_path_expression(&self, text: &str) -> Result<PathExpression, ExpressionError> {
        match self.create_composite(text, "path")?.simplify().into_path() {
            Ok(path) => Ok(path),
            Err(other) => {
                debug!(target: TARGET, found = other.kind_name(), "expected a path expression");
                let trimmed = text.trim_start();
                let start = text.len() - trimmed.len();
                let end = start + trimmed.trim_end().len();
                let message = format!(
                    "expected a path expression, found {} expression",
                    other.kind_name()
                );
                Err(SyntaxError::new(text, start..end, message).into())
            }
        }
    }

    /// Parses every item of an `IN (...)` list with the simple grammar.
    pub fn create_in_item_expressions(
        &self,
        items: &[&str],
    ) -> Result<Vec<Expression>, ExpressionError> {
        if items.is_empty() {
            return Err(ExpressionError::InvalidArgument { argument: "in items" });
        }
        items
            .iter()
            .map(|item| self.create_simple_expression(item))
            .collect()
    }

    /// Case operands use a grammar this crate does not implement.
    pub fn create_case_operand_expression(
        &self,
        _text: &str,
    ) -> Result<Expression, ExpressionError> {
        unsupported("case operand")
    }

    /// Scalar expressions use a grammar this crate does not implement.
    pub fn create_scalar_expression(&self, _text: &str) -> Result<Expression, ExpressionError> {
        unsupported("scalar")
    }

    /// Join paths (with `TREAT`, `KEY`, `VALUE`) use a grammar this crate does not implement.
    pub fn create_join_path_expression(
        &self,
        _text: &str,
    ) -> Result<Expression, ExpressionError> {
        unsupported("join path")
    }

    /// Order-by items use a grammar this crate does not implement.
    pub fn create_order_by_expression(&self, _text: &str) -> Result<Expression, ExpressionError> {
        unsupported("order by")
    }

    /// Arithmetic expressions use a grammar this crate does not implement.
    pub fn create_arithmetic_expression(
        &self,
        _text: &str,
    ) -> Result<Expression, ExpressionError> {
        unsupported("arithmetic")
    }

    /// String expressions use a grammar this crate does not implement.
    pub fn create_string_expression(&self, _text: &str) -> Result<Expression, ExpressionError> {
        unsupported("string")
    }

    fn create_composite(
        &self,
        text: &str,
        argument: &'static str,
    ) -> Result<CompositeExpression, ExpressionError> {
        if text.trim().is_empty() {
            return Err(ExpressionError::InvalidArgument { argument });
        }
        debug!(target: TARGET, expression = text, "parsing expression");

        let lexed = tokenize(text);
        if let Some(diag) = lexed.diagnostics.first() {
            debug!(target: TARGET, error = %diag.message, "lexing failed");
            return Err(SyntaxError::from_diag(text, diag).into());
        }

        Parser::new(lexed.tokens, text)
            .with_config(self.config.clone())
            .parse()
            .map_err(|diag| SyntaxError::from_diag(text, &diag).into())
    }
}

fn unsupported(grammar: &'static str) -> Result<Expression, ExpressionError> {
    debug!(target: TARGET, grammar, "unsupported expression grammar requested");
    Err(ExpressionError::UnsupportedGrammar { grammar })
}
