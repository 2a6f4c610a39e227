//! Internal diagnostic model for lexer and builder errors.
//!
//! The lexer and builder report problems as [`Diag`] values. The factory turns
//! the first one into a [`crate::SyntaxError`], which is what callers see.

use crate::ast::Span;
use miette::LabeledSpan;

/// Role of a diagnostic label in the overall diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The location the error is reported at.
    Primary,
    /// A supporting location, e.g. the bracket left open.
    Secondary,
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    pub span: Span,
    pub message: String,
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured error message produced while lexing or building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The main diagnostic message.
    pub message: String,
    /// Labeled spans showing relevant source locations.
    pub labels: Vec<DiagLabel>,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
    /// Optional diagnostic code (e.g., "L001" or "P003").
    pub code: Option<String>,
}

impl Diag {
    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
            help: None,
            code: None,
        }
    }

    /// Adds a primary label to this diagnostic.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    /// Adds a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::secondary(span, message));
        self
    }

    /// Sets the help text for this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.role == LabelRole::Primary)
            .map(|label| label.span.clone())
    }
}

/// Expression text with position helpers for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    content: &'a str,
}

impl<'a> SourceFile<'a> {
    /// Wraps expression text.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Clamps a span to valid bounds within this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }

    /// 1-based line and 0-based character column of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let before = self.content.get(..offset).unwrap_or(self.content);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count();
        (line, column)
    }

    /// Converts the labels of `diag` to miette labels, clamping spans to the source.
    pub fn labeled_spans(&self, diag: &Diag) -> Vec<LabeledSpan> {
        diag.labels
            .iter()
            .map(|label| {
                let span = self.clamp_span(&label.span);
                let span = (span.start, span.end - span.start);
                match label.role {
                    LabelRole::Primary => {
                        LabeledSpan::new_primary_with_span(Some(label.message.clone()), span)
                    }
                    LabelRole::Secondary => {
                        LabeledSpan::new_with_span(Some(label.message.clone()), span)
                    }
                }
            })
            .collect()
    }
}
