//! Rendering re-parses into an equal tree, and rendering is idempotent.

use rstest::rstest;

use crate::common::parse_ok;

#[rstest]
#[case("d")]
#[case("d.address.city")]
#[case("d.b[a].c[e].f")]
#[case("versions[:index]")]
#[case("versions[2 + 1].name")]
#[case("versions[test.x.y + test.b]")]
#[case("a[b[c[d + 1] + 1] + 1]")]
#[case("AVG(age)")]
#[case("d.age + SUM(d.children.age)")]
#[case("NULLIF(1, 1)")]
#[case("d.kind IN ('a', 'b')")]
#[case("d.id IN :ids")]
#[case("COALESCE(:a, :b, 0)")]
#[case("OUTER(d.manager.id) = e.id")]
#[case("SIZE(d.contacts) > 0")]
#[case("d.contacts IS NOT EMPTY")]
#[case("d.owner MEMBER OF d.contacts")]
#[case("d.name = 'it''s'")]
#[case("-d.balance * 2.5")]
#[case("d.age BETWEEN :min AND :max")]
#[case("first.name || end[1]")]
#[case("d.ñame = d.$x AND :café IS NULL")]
fn rendering_reparses_to_an_equal_tree(#[case] text: &str) {
    let parsed = parse_ok(text);
    let rendered = parsed.to_string();
    let reparsed = parse_ok(&rendered);

    assert_eq!(reparsed, parsed, "`{text}` rendered as `{rendered}`");
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn collection_flags_survive_a_round_trip() {
    let parsed = parse_ok("SIZE(d.contacts)");
    let reparsed = parse_ok(&parsed.to_string());

    let flag = |e: &jpql_expr::Expression| {
        e.as_composite()
            .and_then(|c| c.children().iter().find_map(|child| child.as_path()))
            .map(|p| p.is_used_in_collection_function())
    };
    assert_eq!(flag(&parsed), Some(true));
    assert_eq!(flag(&reparsed), Some(true));
}
