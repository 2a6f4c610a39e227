//! Context-tracking expression builder.
//!
//! The builder walks the token stream once and keeps a stack of frames. The
//! bottom frame collects the top-level result; every bracketed index that is
//! not a bare parameter or a plain dotted path gets its own frame, which is
//! popped and folded into the suspended array on the matching `]`.
//!
//! Each frame is in exactly one [`Context`] at a time:
//!
//! * `FreeText` accumulates opaque text and starts paths, parameters and
//!   `OUTER(` calls.
//! * `Path` extends the in-progress path until something ends it.
//! * `ArrayIndex` reads the index after a `[`, either directly or by pushing
//!   a nested frame.
//! * `OuterCall` expects the wrapped path and then the closing `)`.

use std::mem;

use tracing::{debug, trace};

use crate::ast::{
    ArrayExpression, CompositeExpression, Expression, FooExpression, OuterExpression,
    ParameterExpression, PathElement, PathExpression, PropertyExpression, Span, Spanned, cover,
    push_fragment,
};
use crate::diag::Diag;
use crate::lexer::keywords::{Keyword, is_keyword, lookup_keyword};
use crate::lexer::token::{Token, TokenKind};

use super::ParserConfig;
use super::base::{ParseError, ParseResult, TokenStream};

const TARGET: &str = "jpql_expr::parser";

/// What the current frame is in the middle of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    FreeText,
    Path,
    ArrayIndex,
    OuterCall,
}

#[derive(Debug)]
struct OuterCall {
    path: Option<PathExpression>,
    open: Span,
}

/// Builder state for one (possibly nested) expression.
#[derive(Debug)]
struct Frame {
    context: Context,
    children: Vec<Expression>,
    text: String,
    path: PathExpression,
    array_base: Option<Spanned<PropertyExpression>>,
    outer: Option<OuterCall>,
    collection_function_pending: bool,
    /// The `[` this frame is the index of; `None` for the root frame.
    open_bracket: Option<Span>,
}

impl Frame {
    fn new(open_bracket: Option<Span>) -> Self {
        Self {
            context: Context::FreeText,
            children: Vec::new(),
            text: String::new(),
            path: PathExpression::default(),
            array_base: None,
            outer: None,
            collection_function_pending: false,
            open_bracket,
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.children.push(FooExpression::new(text).into());
        }
    }

    fn finish(mut self) -> CompositeExpression {
        self.flush_text();
        CompositeExpression::new(self.children)
    }
}

/// Outcome of a single builder step.
enum Step {
    Continue,
    Done(CompositeExpression),
}

pub(crate) struct ExpressionBuilder<'t, 'c> {
    stream: TokenStream<'t>,
    config: &'c ParserConfig,
    frames: Vec<Frame>,
}

impl<'t, 'c> ExpressionBuilder<'t, 'c> {
    pub(crate) fn new(tokens: &'t [Token], config: &'c ParserConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            config,
            frames: vec![Frame::new(None)],
        }
    }

    /// Runs the builder to the end of input.
    pub(crate) fn build(mut self) -> ParseResult<CompositeExpression> {
        loop {
            let context = self.frame()?.context;
            let step = match context {
                Context::FreeText => self.free_text()?,
                Context::Path => self.continue_path()?,
                Context::ArrayIndex => self.array_index()?,
                Context::OuterCall => self.outer_call()?,
            };
            if let Step::Done(result) = step {
                return Ok(result);
            }
        }
    }

    fn frame(&self) -> ParseResult<&Frame> {
        self.frames.last().ok_or_else(|| state_error(&self.stream))
    }

    fn frame_mut(&mut self) -> ParseResult<&mut Frame> {
        match self.frames.last_mut() {
            Some(frame) => Ok(frame),
            None => Err(state_error(&self.stream)),
        }
    }

    fn transition(&mut self, to: Context) -> ParseResult<()> {
        let depth = self.frames.len();
        let frame = self.frame_mut()?;
        trace!(target: TARGET, from = ?frame.context, to = ?to, depth, "context transition");
        frame.context = to;
        Ok(())
    }

    fn push_text(&mut self, token: &Token) -> ParseResult<()> {
        let text = token.source_text();
        let frame = self.frame_mut()?;
        push_fragment(&mut frame.text, &text);
        Ok(())
    }

    // ------------------------------------------------------------------
    // FREE_TEXT
    // ------------------------------------------------------------------

    fn free_text(&mut self) -> ParseResult<Step> {
        let token = self.stream.current().clone();
        match token.kind {
            TokenKind::Eof => self.end_of_input(),
            TokenKind::RBracket => {
                if self.frame()?.open_bracket.is_none() {
                    return Err(self
                        .stream
                        .error_here_with_code("unexpected ']' without a matching '['", "P001"));
                }
                self.close_bracket()?;
                Ok(Step::Continue)
            }
            TokenKind::LBracket => Err(self.stream.error_here_with_code(
                "'[' must directly follow a property name",
                "P004",
            )),
            TokenKind::Parameter => {
                self.parameter(&token)?;
                Ok(Step::Continue)
            }
            TokenKind::Identifier => {
                self.identifier(&token)?;
                Ok(Step::Continue)
            }
            TokenKind::RParen => {
                self.frame_mut()?.collection_function_pending = false;
                self.push_text(&token)?;
                self.stream.advance();
                Ok(Step::Continue)
            }
            _ => {
                self.push_text(&token)?;
                self.stream.advance();
                Ok(Step::Continue)
            }
        }
    }

    fn end_of_input(&mut self) -> ParseResult<Step> {
        if self.frames.len() > 1 {
            let open = self.frame()?.open_bracket.clone().unwrap_or_default();
            let at = self.stream.current().span.clone();
            return Err(Box::new(
                Diag::error("unclosed '[' in path index")
                    .with_secondary_label(open, "opened here")
                    .with_primary_label(at, "expected ']'")
                    .with_code("P010"),
            ));
        }
        let root = self.frames.pop().ok_or_else(|| state_error(&self.stream))?;
        let result = root.finish();
        trace!(target: TARGET, children = result.len(), "expression complete");
        Ok(Step::Done(result))
    }

    fn parameter(&mut self, token: &Token) -> ParseResult<()> {
        reject_parameter_continuation(&self.stream)?;
        let frame = self.frame_mut()?;
        frame.flush_text();
        frame.collection_function_pending = false;
        frame
            .children
            .push(ParameterExpression::new(token.text.clone()).into());
        self.stream.advance();
        Ok(())
    }

    fn identifier(&mut self, token: &Token) -> ParseResult<()> {
        let keyword = lookup_keyword(&token.text);

        if self.stream.peek_kind() == TokenKind::LParen {
            if keyword == Some(Keyword::Outer) {
                return self.open_outer();
            }
            if self.config.is_collection_function(&token.text) {
                self.frame_mut()?.collection_function_pending = true;
            }
            // Function name and its parenthesis stay opaque.
            self.push_text(token)?;
            self.stream.advance();
            let paren = self.stream.current().clone();
            self.push_text(&paren)?;
            self.stream.advance();
            return Ok(());
        }

        // Reserved words are soft: `first.name` and `end[1]` are paths.
        if matches!(
            self.stream.peek_kind(),
            TokenKind::Dot | TokenKind::LBracket
        ) {
            return self.begin_path();
        }

        match keyword {
            None => self.begin_path(),
            Some(Keyword::Member) => {
                self.frame_mut()?.collection_function_pending = true;
                self.push_text(token)?;
                self.stream.advance();
                Ok(())
            }
            Some(Keyword::Empty) => {
                let frame = self.frame_mut()?;
                if let Some(Expression::Path(path)) = frame.children.last_mut() {
                    path.mark_used_in_collection_function();
                }
                self.push_text(token)?;
                self.stream.advance();
                Ok(())
            }
            Some(_) => {
                self.push_text(token)?;
                self.stream.advance();
                Ok(())
            }
        }
    }

    fn open_outer(&mut self) -> ParseResult<()> {
        let start = self.stream.current().span.clone();
        self.stream.advance();
        let paren = self.stream.expect(TokenKind::LParen)?;
        let frame = self.frame_mut()?;
        frame.flush_text();
        frame.outer = Some(OuterCall {
            path: None,
            open: cover(&start, &paren),
        });
        self.transition(Context::OuterCall)
    }

    // ------------------------------------------------------------------
    // PATH
    // ------------------------------------------------------------------

    fn begin_path(&mut self) -> ParseResult<()> {
        let frame = self.frame_mut()?;
        frame.flush_text();
        let flagged = mem::take(&mut frame.collection_function_pending);
        frame.path = PathExpression::default().with_used_in_collection_function(flagged);
        self.transition(Context::Path)?;
        self.segment()
    }

    /// Consumes one identifier segment; a following `[` opens an index.
    fn segment(&mut self) -> ParseResult<()> {
        let token = self.stream.current().clone();
        if token.kind != TokenKind::Identifier {
            return Err(self
                .stream
                .error_here_with_code("expected a property name", "P002"));
        }
        self.stream.advance();

        let property = PropertyExpression::new(token.text.clone());
        if self.stream.check(TokenKind::LBracket) {
            self.stream.advance();
            let bracket = self.stream.previous_span();
            let frame = self.frame_mut()?;
            frame.array_base = Some(Spanned::new(property, cover(&token.span, &bracket)));
            return self.transition(Context::ArrayIndex);
        }

        self.frame_mut()?.path.push(property.into());
        Ok(())
    }

    fn continue_path(&mut self) -> ParseResult<Step> {
        match self.stream.current().kind {
            TokenKind::Dot => {
                self.stream.advance();
                if !self.stream.check(TokenKind::Identifier) {
                    return Err(self
                        .stream
                        .error_here_with_code("expected a property name after '.'", "P002"));
                }
                self.segment()?;
            }
            TokenKind::LBracket => {
                return Err(self
                    .stream
                    .error_here_with_code("an index must follow a property name", "P003"));
            }
            _ => self.end_path()?,
        }
        Ok(Step::Continue)
    }

    /// Completes the in-progress path without consuming the current token.
    fn end_path(&mut self) -> ParseResult<()> {
        let frame = self.frame_mut()?;
        let path = mem::take(&mut frame.path);
        match frame.outer.as_mut() {
            Some(outer) if outer.path.is_none() => {
                outer.path = Some(path);
                self.transition(Context::OuterCall)
            }
            _ => {
                frame.children.push(path.into());
                self.transition(Context::FreeText)
            }
        }
    }

    // ------------------------------------------------------------------
    // ARRAY_INDEX
    // ------------------------------------------------------------------

    fn array_index(&mut self) -> ParseResult<Step> {
        let current = self.stream.current().clone();
        match current.kind {
            TokenKind::RBracket => {
                return Err(self
                    .stream
                    .error_here_with_code("empty index in '[]'", "P005"));
            }
            TokenKind::Parameter => {
                reject_parameter_continuation(&self.stream)?;
                if self.stream.peek_kind() == TokenKind::RBracket {
                    self.stream.advance();
                    self.stream.advance();
                    self.complete_array(ParameterExpression::new(current.text).into())?;
                    return Ok(Step::Continue);
                }
            }
            TokenKind::Identifier
                if !is_keyword(&current.text) || self.stream.peek_kind() == TokenKind::Dot =>
            {
                if let Some(path) = self.simple_index_path() {
                    self.complete_array(path.into())?;
                    return Ok(Step::Continue);
                }
            }
            _ => {}
        }
        self.push_nested()?;
        Ok(Step::Continue)
    }

    /// Reads `a.b.c]` directly. Rewinds and returns `None` for anything else.
    fn simple_index_path(&mut self) -> Option<PathExpression> {
        let start = self.stream.position();
        let mut path = PathExpression::default();
        loop {
            if !self.stream.check(TokenKind::Identifier) {
                break;
            }
            path.push(PropertyExpression::new(self.stream.current().text.clone()).into());
            self.stream.advance();
            if self.stream.consume(TokenKind::RBracket) {
                return Some(path);
            }
            if !self.stream.consume(TokenKind::Dot) {
                break;
            }
        }
        self.stream.set_position(start);
        None
    }

    fn push_nested(&mut self) -> ParseResult<()> {
        let depth = self.frames.len();
        if depth > self.config.max_nesting_depth {
            return Err(Box::new(
                Diag::error(format!(
                    "index nesting exceeds the maximum depth of {}",
                    self.config.max_nesting_depth
                ))
                .with_primary_label(self.stream.current().span.clone(), "here")
                .with_code("P007"),
            ));
        }
        let open = self
            .frame()?
            .array_base
            .as_ref()
            .map(|base| base.span.clone());
        debug!(target: TARGET, depth, "descending into index expression");
        self.frames.push(Frame::new(open));
        Ok(())
    }

    fn close_bracket(&mut self) -> ParseResult<()> {
        self.stream.advance();
        let nested = self.frames.pop().ok_or_else(|| state_error(&self.stream))?;
        let composite = nested.finish();
        let unwrap = composite.len() == 1;
        debug!(
            target: TARGET,
            depth = self.frames.len(),
            children = composite.len(),
            unwrap,
            "index expression complete"
        );
        self.complete_array(composite.simplify())
    }

    fn complete_array(&mut self, index: Expression) -> ParseResult<()> {
        let frame = self.frame_mut()?;
        let base = frame.array_base.take();
        let Some(base) = base else {
            return Err(state_error(&self.stream));
        };
        frame
            .path
            .push(PathElement::Array(ArrayExpression::new(base.into_inner(), index)));
        self.transition(Context::Path)
    }

    // ------------------------------------------------------------------
    // OUTER_CALL
    // ------------------------------------------------------------------

    fn outer_call(&mut self) -> ParseResult<Step> {
        let frame = self.frame()?;
        let Some(outer) = frame.outer.as_ref() else {
            return Err(state_error(&self.stream));
        };

        if outer.path.is_none() {
            if !self.stream.check(TokenKind::Identifier) {
                return Err(self
                    .stream
                    .error_here_with_code("expected a path inside OUTER(...)", "P008"));
            }
            self.begin_path()?;
            return Ok(Step::Continue);
        }

        if !self.stream.check(TokenKind::RParen) {
            let open = outer.open.clone();
            return Err(Box::new(
                Diag::error("expected ')' to close OUTER(")
                    .with_secondary_label(open, "OUTER( opened here")
                    .with_primary_label(self.stream.current().span.clone(), "expected ')'")
                    .with_code("P009"),
            ));
        }
        self.stream.advance();

        let frame = self.frame_mut()?;
        if let Some(OuterCall {
            path: Some(path), ..
        }) = frame.outer.take()
        {
            frame
                .children
                .push(OuterExpression::new(path).into());
        }
        self.transition(Context::FreeText)?;
        Ok(Step::Continue)
    }
}

/// A parameter can never be navigated or indexed.
fn reject_parameter_continuation(stream: &TokenStream<'_>) -> ParseResult<()> {
    match stream.peek_kind() {
        TokenKind::Dot | TokenKind::LBracket => {
            let param = stream.current().span.clone();
            let at = stream
                .peek()
                .map_or_else(|| param.clone(), |t| t.span.clone());
            Err(Box::new(
                Diag::error(format!(
                    "parameter ':{}' cannot be followed by a path continuation",
                    stream.current().text
                ))
                .with_secondary_label(param, "parameter")
                .with_primary_label(at, "unexpected continuation")
                .with_help("parameters can only be used as a whole index, e.g. 'items[:index]'")
                .with_code("P006"),
            ))
        }
        _ => Ok(()),
    }
}

fn state_error(stream: &TokenStream<'_>) -> ParseError {
    stream.error_here_with_code("inconsistent expression builder state", "P000")
}
