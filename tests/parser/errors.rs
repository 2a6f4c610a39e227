//! Syntax errors: codes, positions and rendering.

use jpql_expr::{ExpressionError, ExpressionFactory, ParserConfig, parse};
use miette::Diagnostic;
use rstest::rstest;

use crate::common::parse_err;

#[rstest]
#[case::stray_bracket("a + ]", "P001")]
#[case::dot_without_property("d.", "P002")]
#[case::dot_before_bracket("d.[x]", "P002")]
#[case::double_index("d[1][2]", "P003")]
#[case::bracket_in_text("[1]", "P004")]
#[case::bracket_after_text("d.age + [1]", "P004")]
#[case::empty_index("versions[]", "P005")]
#[case::indexed_parameter_path("versions[:index.b]", "P006")]
#[case::parameter_path(":p.name", "P006")]
#[case::indexed_parameter(":p[1]", "P006")]
#[case::empty_outer("OUTER()", "P008")]
#[case::outer_of_literal("OUTER(1)", "P008")]
#[case::unclosed_outer("OUTER(d.id", "P009")]
#[case::outer_with_text("OUTER(d.id + 1)", "P009")]
#[case::unclosed_index("versions[1 + ", "P010")]
#[case::unclosed_nested_index("a[b[c + 1]", "P010")]
#[case::unexpected_character("d.age # 1", "L001")]
#[case::positional_parameter("d.id = ?1", "L001")]
#[case::unclosed_string("d.name = 'abc", "L002")]
fn violations_report_their_code(#[case] text: &str, #[case] code: &str) {
    assert_eq!(parse_err(text).error_code(), Some(code));
}

#[test]
fn parameter_continuation_points_at_the_continuation() {
    let err = parse_err("versions[:index.b]");
    assert_eq!(err.span(), 15..16);
    assert_eq!((err.line(), err.column()), (1, 15));
    assert!(err.message().contains(":index"));
}

#[test]
fn message_has_expression_and_position_prefix() {
    let err = parse_err("a + ]");
    assert_eq!(err.expression(), "a + ]");
    assert_eq!(
        err.to_string(),
        "Could not parse expression 'a + ]', line 1:4 unexpected ']' without a matching '['"
    );
}

#[test]
fn position_is_line_aware() {
    let err = parse_err("d.age +\n  ]");
    assert_eq!((err.line(), err.column()), (2, 2));
}

#[test]
fn unclosed_index_labels_both_ends() {
    let err = parse_err("versions[1 + ");
    let labels: Vec<_> = err.labels().map(Iterator::collect).unwrap_or_default();
    assert_eq!(labels.len(), 2);
}

#[test]
fn parameter_continuation_has_help() {
    let err = parse_err(":p.name");
    assert!(err.help().is_some());
}

#[test]
fn report_renders_the_snippet() {
    let report = miette::Report::new(parse_err("OUTER(d.id"));
    let rendered = format!("{report:?}");
    assert!(rendered.contains("OUTER(d.id"));
    assert!(rendered.contains("expected ')'"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn blank_input_is_an_invalid_argument(#[case] text: &str) {
    assert!(matches!(
        parse(text),
        Err(ExpressionError::InvalidArgument { .. })
    ));
}

#[test]
fn nesting_limit_comes_from_config() {
    let text = "a[b[c[d + 1] + 1] + 1]";
    let shallow = ExpressionFactory::with_config(ParserConfig::default().with_max_nesting_depth(2));
    let err = shallow.create_simple_expression(text).expect_err("too deep");
    assert_eq!(err.as_syntax().and_then(|e| e.error_code()), Some("P007"));

    let deep = ExpressionFactory::with_config(ParserConfig::default().with_max_nesting_depth(3));
    assert!(deep.create_simple_expression(text).is_ok());
}
