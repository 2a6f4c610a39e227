//! Attaching join-node resolutions to parsed paths.

use jpql_expr::ast::JoinNodeId;
use jpql_expr::{Expression, PathExpression, PathResolution, resolve_paths};

use crate::common::parse_ok;

#[test]
fn resolver_sees_every_path() {
    let mut parsed = parse_ok("d.contacts[x.y] + OUTER(e.manager)");
    let mut seen = Vec::new();
    let resolved = resolve_paths(&mut parsed, &mut |path: &PathExpression| {
        seen.push(path.to_string());
        None
    });

    assert_eq!(resolved, 0);
    assert_eq!(seen, ["d.contacts[x.y]", "x.y", "e.manager"]);
}

#[test]
fn resolutions_are_stored_on_the_path() {
    let mut parsed = parse_ok("SIZE(d.contacts)");
    let resolved = resolve_paths(&mut parsed, &mut |path: &PathExpression| {
        Some(
            PathResolution::new(JoinNodeId(7))
                .with_field(path.elements()[path.len() - 1].property_name())
                .with_collection_valued(path.is_used_in_collection_function()),
        )
    });
    assert_eq!(resolved, 1);

    let path = parsed
        .as_composite()
        .and_then(|c| c.children().iter().find_map(Expression::as_path))
        .expect("path");
    let resolution = path.resolution().expect("resolved");
    assert_eq!(resolution.base_node, JoinNodeId(7));
    assert_eq!(resolution.field.as_deref(), Some("contacts"));
    assert!(resolution.collection_valued);
}

#[test]
fn resolution_does_not_affect_equality() {
    let unresolved = parse_ok("d.age");
    let mut resolved = unresolved.clone();
    resolve_paths(&mut resolved, &mut |_: &PathExpression| {
        Some(PathResolution::new(JoinNodeId(1)))
    });
    assert_eq!(resolved, unresolved);
}
