//! `OUTER(path)` calls.

use jpql_expr::{Expression, OuterExpression, PathExpression};

use crate::common::{child_kinds, parse_ok, rendered_children};

#[test]
fn outer_wraps_a_path() {
    assert_eq!(
        parse_ok("OUTER(d.manager.id)"),
        Expression::Outer(OuterExpression::new(PathExpression::from_properties([
            "d", "manager", "id"
        ])))
    );
}

#[test]
fn outer_is_case_insensitive() {
    let parsed = parse_ok("outer( d.id )");
    assert_eq!(parsed.as_outer().map(|o| o.path().to_string()).as_deref(), Some("d.id"));
    assert_eq!(parsed.to_string(), "OUTER(d.id)");
}

#[test]
fn outer_path_may_carry_indices() {
    let parsed = parse_ok("OUTER(d.items[:i].owner)");
    let outer = parsed.as_outer().expect("outer");
    assert_eq!(outer.path().len(), 3);
    assert!(outer.path().elements()[1].as_array().is_some());
}

#[test]
fn outer_sits_between_other_children() {
    assert_eq!(
        child_kinds("OUTER(d.id) = e.id"),
        vec!["outer", "foo", "path"]
    );
    assert_eq!(
        rendered_children("COALESCE(OUTER(d.id), 0)"),
        vec!["COALESCE(", "OUTER(d.id)", ",0)"]
    );
}

#[test]
fn outer_without_parenthesis_stays_opaque() {
    assert_eq!(rendered_children("d.id outer"), vec!["d.id", "outer"]);
}

#[test]
fn outer_followed_by_a_dot_is_a_path() {
    assert_eq!(child_kinds("outer.value"), vec!["path"]);
}
