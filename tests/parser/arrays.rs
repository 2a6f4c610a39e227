//! Array indices: direct parameters, direct paths and nested sub-expressions.

use jpql_expr::{
    ArrayExpression, Expression, FooExpression, ParameterExpression, PathElement, PathExpression,
    PropertyExpression,
};
use rstest::rstest;

use crate::common::{parse_single_path, rendered_children};

fn array_at(path: &PathExpression, i: usize) -> &ArrayExpression {
    path.elements()[i]
        .as_array()
        .unwrap_or_else(|| panic!("element {i} of {path} is not an array"))
}

#[test]
fn path_index_is_a_nested_path() {
    let path = parse_single_path("d[a]");
    assert_eq!(path.len(), 1);

    let array = array_at(&path, 0);
    assert_eq!(array.base().name(), "d");
    assert_eq!(
        array.index(),
        &Expression::Path(PathExpression::from_properties(["a"]))
    );
}

#[test]
fn interleaved_indices_keep_element_order() {
    let path = parse_single_path("d.b[a].c[e].f");
    let rendered: Vec<String> = path.elements().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["d", "b[a]", "c[e]", "f"]);

    assert!(matches!(path.elements()[0], PathElement::Property(_)));
    assert_eq!(array_at(&path, 1).base().name(), "b");
    assert_eq!(array_at(&path, 2).base().name(), "c");
    assert!(matches!(path.elements()[3], PathElement::Property(_)));
}

#[test]
fn parameter_index_is_kept_whole() {
    let path = parse_single_path("versions[:index]");
    let array = array_at(&path, 0);

    assert_eq!(array.parameter_index(), Some(&ParameterExpression::new("index")));
    assert_eq!(path.to_string(), "versions[:index]");
}

#[test]
fn dotted_index_path_is_structured() {
    let path = parse_single_path("d.versions[x.y.z].label");
    let array = array_at(&path, 1);
    assert_eq!(
        array.index(),
        &Expression::Path(PathExpression::from_properties(["x", "y", "z"]))
    );
}

#[rstest]
#[case("versions[2]", "2")]
#[case("versions[2 + 1]", "2+1")]
#[case("versions['key']", "'key'")]
fn literal_indices_are_opaque(#[case] text: &str, #[case] index: &str) {
    let path = parse_single_path(text);
    assert_eq!(
        array_at(&path, 0).index(),
        &Expression::Foo(FooExpression::new(index))
    );
}

#[test]
fn compound_index_is_a_composite() {
    let path = parse_single_path("versions[d.count - 1]");
    let index = array_at(&path, 0).index().as_composite().expect("composite");
    let rendered: Vec<String> = index.children().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["d.count", "-1"]);
}

#[test]
fn index_can_itself_contain_arrays() {
    let path = parse_single_path("a[b[:i].c]");
    let inner = array_at(&path, 0).index().as_path().expect("path index");
    let expected = PathExpression::new(vec![
        ArrayExpression::new(PropertyExpression::new("b"), ParameterExpression::new("i")).into(),
        PropertyExpression::new("c").into(),
    ]);
    assert_eq!(inner, &expected);
}

#[test]
fn deeply_nested_indices_parse() {
    let path = parse_single_path("a[b[c[d + 1] + 1] + 1]");
    assert_eq!(path.to_string(), "a[b[c[d+1]+1]+1]");
}

#[test]
fn arrays_mix_with_opaque_text() {
    assert_eq!(
        rendered_children("SUM(d.items[:i].price) * 2"),
        vec!["SUM(", "d.items[:i].price", ")*2"]
    );
}
