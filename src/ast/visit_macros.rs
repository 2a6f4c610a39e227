/// Generates a visitor trait and its `walk_*` helpers for one reference kind.
///
/// Every `visit_*` default is a no-op except `visit_expression`, which only
/// dispatches to the variant method for the same node. Descending into children
/// is opt-in: an implementation calls the matching `walk_*` function, which goes
/// exactly one level down.
macro_rules! define_visit_api {
    ($trait_name:ident, [$($ref:tt)+], $agg_access:ident) => {
        macro_rules! try_visit {
            ($expr:expr) => {
                match $expr {
                    ControlFlow::Continue(()) => {}
                    ControlFlow::Break(b) => return ControlFlow::Break(b),
                }
            };
        }

pub trait $trait_name {
    /// Early-exit payload produced when traversal stops.
    type Break;

    fn visit_expression(&mut self, expression: $($ref)+ Expression) -> VisitResult<Self::Break> {
        walk_expression(self, expression)
    }

    fn visit_foo(&mut self, _foo: $($ref)+ FooExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_property(&mut self, _property: $($ref)+ PropertyExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_parameter(&mut self, _parameter: $($ref)+ ParameterExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_array(&mut self, _array: $($ref)+ ArrayExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_path(&mut self, _path: $($ref)+ PathExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_composite(&mut self, _composite: $($ref)+ CompositeExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_outer(&mut self, _outer: $($ref)+ OuterExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_subquery(&mut self, _subquery: $($ref)+ SubqueryExpression) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }
}

/// Dispatches an expression to the visit method of its variant.
pub fn walk_expression<V: $trait_name + ?Sized>(
    visitor: &mut V,
    expression: $($ref)+ Expression,
) -> VisitResult<V::Break> {
    match expression {
        Expression::Foo(foo) => visitor.visit_foo(foo),
        Expression::Property(property) => visitor.visit_property(property),
        Expression::Parameter(parameter) => visitor.visit_parameter(parameter),
        Expression::Array(array) => visitor.visit_array(array),
        Expression::Path(path) => visitor.visit_path(path),
        Expression::Composite(composite) => visitor.visit_composite(composite),
        Expression::Outer(outer) => visitor.visit_outer(outer),
        Expression::Subquery(subquery) => visitor.visit_subquery(subquery),
    }
}

/// Visits each element of a path.
pub fn walk_path<V: $trait_name + ?Sized>(
    visitor: &mut V,
    path: $($ref)+ PathExpression,
) -> VisitResult<V::Break> {
    for element in $($ref)+ path.elements {
        try_visit!(walk_path_element(visitor, element));
    }
    ControlFlow::Continue(())
}

/// Dispatches a path element to `visit_property` or `visit_array`.
pub fn walk_path_element<V: $trait_name + ?Sized>(
    visitor: &mut V,
    element: $($ref)+ PathElement,
) -> VisitResult<V::Break> {
    match element {
        PathElement::Property(property) => visitor.visit_property(property),
        PathElement::Array(array) => visitor.visit_array(array),
    }
}

/// Visits the base property, then the index expression.
pub fn walk_array<V: $trait_name + ?Sized>(
    visitor: &mut V,
    array: $($ref)+ ArrayExpression,
) -> VisitResult<V::Break> {
    try_visit!(visitor.visit_property($($ref)+ array.base));
    visitor.visit_expression(array.index.$agg_access())
}

/// Visits each child of a composite in order.
pub fn walk_composite<V: $trait_name + ?Sized>(
    visitor: &mut V,
    composite: $($ref)+ CompositeExpression,
) -> VisitResult<V::Break> {
    for child in $($ref)+ composite.children {
        try_visit!(visitor.visit_expression(child));
    }
    ControlFlow::Continue(())
}

/// Visits the wrapped path.
pub fn walk_outer<V: $trait_name + ?Sized>(
    visitor: &mut V,
    outer: $($ref)+ OuterExpression,
) -> VisitResult<V::Break> {
    visitor.visit_path($($ref)+ outer.path)
}

    };
}

pub(crate) use define_visit_api;
