//! Opaque text passthrough and whitespace normalization.

use jpql_expr::{Expression, FooExpression};
use rstest::rstest;

use crate::common::{child_kinds, parse_ok, rendered_children};

#[rstest]
#[case("NULLIF(1,1)", "NULLIF(1,1)")]
#[case("NULLIF( 1 , 1 )", "NULLIF(1,1)")]
#[case("1 + 2", "1+2")]
#[case("'a  b'", "'a  b'")]
#[case("TRUE AND NOT FALSE", "TRUE AND NOT FALSE")]
#[case("3.5e2 * 10L", "3.5e2*10L")]
fn pathless_input_is_a_single_opaque_fragment(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(parse_ok(text), Expression::Foo(FooExpression::new(expected)));
}

#[test]
fn word_boundaries_keep_one_space() {
    assert_eq!(
        rendered_children("d.kind   IN   ('a',  'b')"),
        vec!["d.kind", "IN('a','b')"]
    );
}

#[test]
fn adjacent_text_merges_into_one_fragment() {
    assert_eq!(child_kinds("COUNT(*) + 1 - 2"), vec!["foo"]);
}

#[test]
fn parameters_split_text() {
    assert_eq!(
        child_kinds("COALESCE(:a, :b, 0)"),
        vec!["foo", "parameter", "foo", "parameter", "foo"]
    );
    assert_eq!(
        rendered_children("COALESCE(:a, :b, 0)"),
        vec!["COALESCE(", ":a", ",", ":b", ",0)"]
    );
}

#[test]
fn escaped_quotes_survive() {
    assert_eq!(
        rendered_children("d.name = 'it''s'"),
        vec!["d.name", "='it''s'"]
    );
}

#[test]
fn keyword_case_is_preserved() {
    assert_eq!(
        rendered_children("d.flag is not null"),
        vec!["d.flag", "is not null"]
    );
}
