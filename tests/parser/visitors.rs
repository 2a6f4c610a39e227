//! Visitor traversal: one level per call, explicit descent, early exit.

use std::ops::ControlFlow;

use jpql_expr::ast::{visit, visit_mut};
use jpql_expr::{
    ArrayExpression, CompositeExpression, Expression, OuterExpression, ParameterExpression,
    PathExpression, PropertyExpression, Visit, VisitMut,
};

use crate::common::parse_ok;

/// Counts nodes without descending.
#[derive(Default)]
struct Shallow {
    visited: usize,
}

impl Visit for Shallow {
    type Break = ();

    fn visit_composite(&mut self, _: &CompositeExpression) -> ControlFlow<()> {
        self.visited += 1;
        ControlFlow::Continue(())
    }

    fn visit_path(&mut self, _: &PathExpression) -> ControlFlow<()> {
        self.visited += 1;
        ControlFlow::Continue(())
    }
}

#[test]
fn visiting_a_node_does_not_descend() {
    let mut visitor = Shallow::default();
    let _ = parse_ok("d.age + SUM(d.children.age)").accept(&mut visitor);
    assert_eq!(visitor.visited, 1);

    let mut visitor = Shallow::default();
    let _ = parse_ok("d.b[x.y]").accept(&mut visitor);
    assert_eq!(visitor.visited, 1);
}

/// Collects every property name by walking all the way down.
#[derive(Default)]
struct Properties {
    names: Vec<String>,
}

impl Visit for Properties {
    type Break = ();

    fn visit_composite(&mut self, composite: &CompositeExpression) -> ControlFlow<()> {
        visit::walk_composite(self, composite)
    }

    fn visit_path(&mut self, path: &PathExpression) -> ControlFlow<()> {
        visit::walk_path(self, path)
    }

    fn visit_array(&mut self, array: &ArrayExpression) -> ControlFlow<()> {
        visit::walk_array(self, array)
    }

    fn visit_outer(&mut self, outer: &OuterExpression) -> ControlFlow<()> {
        visit::walk_outer(self, outer)
    }

    fn visit_property(&mut self, property: &PropertyExpression) -> ControlFlow<()> {
        self.names.push(property.name().to_owned());
        ControlFlow::Continue(())
    }
}

#[test]
fn explicit_walks_reach_every_property() {
    let mut visitor = Properties::default();
    let _ = parse_ok("d.b[x.y] + OUTER(e.list[:i].id)").accept(&mut visitor);
    assert_eq!(visitor.names, ["d", "b", "x", "y", "e", "list", "id"]);
}

/// Stops at the first parameter.
struct FirstParameter;

impl Visit for FirstParameter {
    type Break = String;

    fn visit_composite(&mut self, composite: &CompositeExpression) -> ControlFlow<String> {
        visit::walk_composite(self, composite)
    }

    fn visit_path(&mut self, path: &PathExpression) -> ControlFlow<String> {
        visit::walk_path(self, path)
    }

    fn visit_array(&mut self, array: &ArrayExpression) -> ControlFlow<String> {
        visit::walk_array(self, array)
    }

    fn visit_parameter(&mut self, parameter: &ParameterExpression) -> ControlFlow<String> {
        ControlFlow::Break(parameter.name().to_owned())
    }
}

#[test]
fn break_ends_the_traversal() {
    let parsed = parse_ok("d.items[:first] + :second");
    assert_eq!(
        parsed.accept(&mut FirstParameter),
        ControlFlow::Break("first".to_owned())
    );
    assert_eq!(
        parse_ok("d.a + d.b").accept(&mut FirstParameter),
        ControlFlow::Continue(())
    );
}

/// Renames every parameter in place.
struct RenameParameters;

impl VisitMut for RenameParameters {
    type Break = ();

    fn visit_composite(&mut self, composite: &mut CompositeExpression) -> ControlFlow<()> {
        visit_mut::walk_composite(self, composite)
    }

    fn visit_path(&mut self, path: &mut PathExpression) -> ControlFlow<()> {
        visit_mut::walk_path(self, path)
    }

    fn visit_array(&mut self, array: &mut ArrayExpression) -> ControlFlow<()> {
        visit_mut::walk_array(self, array)
    }

    fn visit_expression(&mut self, expression: &mut Expression) -> ControlFlow<()> {
        if let Expression::Parameter(parameter) = expression {
            *parameter = ParameterExpression::new(format!("{}_1", parameter.name()));
            return ControlFlow::Continue(());
        }
        visit_mut::walk_expression(self, expression)
    }
}

#[test]
fn mutable_visitor_rewrites_in_place() {
    let mut parsed = parse_ok("d.items[:i].price > :min");
    let _ = parsed.accept_mut(&mut RenameParameters);
    assert_eq!(parsed.to_string(), "d.items[:i_1].price>:min_1");
}
