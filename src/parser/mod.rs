//! Parser infrastructure for expression text.
//!
//! The parser consumes the lexer's token stream and builds a
//! [`CompositeExpression`]. There is no error recovery: the first violation
//! ends the parse.

pub mod base;
mod builder;

use smol_str::SmolStr;
use tracing::debug;

use crate::ast::CompositeExpression;
use crate::lexer::token::{Token, TokenKind};
use base::ParseResult;
use builder::ExpressionBuilder;

/// Default limit for nested bracket sub-expressions.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Configuration for expression parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested index sub-expressions.
    pub max_nesting_depth: usize,

    /// Function names whose following path is flagged as a collection-function
    /// argument. Compared case-insensitively.
    pub collection_functions: Vec<SmolStr>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            collection_functions: vec![SmolStr::new_static("SIZE")],
        }
    }
}

impl ParserConfig {
    /// Sets the maximum number of nested index sub-expressions.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Adds function names to the collection-function set.
    pub fn with_collection_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.collection_functions
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true if `name` is configured as a collection function.
    pub fn is_collection_function(&self, name: &str) -> bool {
        self.collection_functions
            .iter()
            .any(|f| f.eq_ignore_ascii_case(name))
    }
}

/// Expression parser over a token stream.
pub struct Parser<'source> {
    tokens: Vec<Token>,
    source: &'source str,
    config: ParserConfig,
}

impl<'source> Parser<'source> {
    /// Creates a new parser from a token stream.
    pub fn new(mut tokens: Vec<Token>, source: &'source str) -> Self {
        if !matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)) {
            let eof_pos = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));
        }

        Self {
            tokens,
            source,
            config: ParserConfig::default(),
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses the token stream into a composite expression.
    pub fn parse(self) -> ParseResult<CompositeExpression> {
        let result = ExpressionBuilder::new(&self.tokens, &self.config).build();
        if let Err(diag) = &result {
            debug!(
                target: "jpql_expr::parser",
                expression = self.source,
                error = %diag.message,
                "expression rejected"
            );
        }
        result
    }
}
