//! Immutable AST visitor infrastructure.

use std::ops::ControlFlow;

use crate::ast::expression::{
    ArrayExpression, CompositeExpression, Expression, FooExpression, OuterExpression,
    ParameterExpression, PathElement, PathExpression, PropertyExpression, SubqueryExpression,
};

use super::visit_macros::define_visit_api;

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

define_visit_api!(Visit, [&], as_ref);

impl Expression {
    /// Hands this node to `visitor`. Children are only visited if the visitor walks them.
    pub fn accept<V: Visit + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        visitor.visit_expression(self)
    }
}
