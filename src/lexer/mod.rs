//! Lexical analysis for expressions.
//!
//! Scanning is done by a `logos`-generated tokenizer. Its raw tokens are mapped
//! onto the public [`TokenKind`] and the first unrecognized input stops the scan
//! with a single diagnostic.

pub mod keywords;
pub mod token;

use logos::Logos;
use tracing::trace;

use crate::diag::Diag;
use token::{Token, TokenKind};

/// Result of lexical analysis.
///
/// Contains both the tokens produced and the diagnostic that stopped the scan, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// At most one diagnostic; lexing stops at the first error.
    pub diagnostics: Vec<Diag>,
}

impl LexerResult {
    /// Returns true if no error was reported.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Identifier,

    #[regex(r":[\p{L}_$][\p{L}\p{N}_$]*")]
    Parameter,

    #[regex(r"[0-9]+[lL]?")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9]+[fFdD]")]
    Decimal,

    #[regex(r"'([^']|'')*'")]
    String,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("||")]
    Concat,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::Parameter => TokenKind::Parameter,
            RawToken::Integer => TokenKind::IntegerLiteral,
            RawToken::Decimal => TokenKind::DecimalLiteral,
            RawToken::String => TokenKind::StringLiteral,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Concat => TokenKind::Concat,
        }
    }
}

/// A lexical analyzer for expression text.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenizes the source text, stopping at the first error.
    pub fn tokenize(self) -> LexerResult {
        let mut raw = RawToken::lexer(self.source);
        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();

        while let Some(next) = raw.next() {
            let span = raw.span();
            let slice = raw.slice();
            match next {
                Ok(RawToken::Parameter) => {
                    tokens.push(Token::new(TokenKind::Parameter, span, &slice[1..]));
                }
                Ok(kind) => tokens.push(Token::new(kind.into(), span, slice)),
                Err(()) => {
                    diagnostics.push(lex_error(self.source, span));
                    break;
                }
            }
        }

        let eof_pos = self.source.len();
        tokens.push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));
        trace!(
            target: "jpql_expr::lexer",
            tokens = tokens.len(),
            failed = !diagnostics.is_empty(),
            "tokenized expression"
        );

        LexerResult {
            tokens,
            diagnostics,
        }
    }
}

fn lex_error(source: &str, span: crate::ast::Span) -> Diag {
    let rest = source.get(span.start..).unwrap_or_default();
    if rest.starts_with('\'') {
        return Diag::error("unclosed string literal")
            .with_primary_label(span.start..source.len(), "string starts here")
            .with_help("close the literal with a single quote; write '' for a quote inside it")
            .with_code("L002");
    }
    let ch = rest.chars().next().unwrap_or(' ');
    let end = span.start + ch.len_utf8();
    let diag = Diag::error(format!("unexpected character '{ch}'"))
        .with_primary_label(span.start..end, "not valid here")
        .with_code("L001");
    if ch == ':' || ch == '?' {
        diag.with_help("parameters are written as ':name'")
    } else {
        diag
    }
}

/// Convenience function to tokenize source text.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}
