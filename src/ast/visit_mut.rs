//! Mutable AST visitor infrastructure.

use std::ops::ControlFlow;

use crate::ast::expression::{
    ArrayExpression, CompositeExpression, Expression, FooExpression, OuterExpression,
    ParameterExpression, PathElement, PathExpression, PropertyExpression, SubqueryExpression,
};

use super::visit::VisitResult;
use super::visit_macros::define_visit_api;

define_visit_api!(VisitMut, [&mut], as_mut);

impl Expression {
    /// Hands this node to a mutable visitor.
    pub fn accept_mut<V: VisitMut + ?Sized>(&mut self, visitor: &mut V) -> VisitResult<V::Break> {
        visitor.visit_expression(self)
    }
}
