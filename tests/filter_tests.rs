//! Filter sanitization and expression building.

use roadmap_mcp_server::roadmap::{escape_literal, sanitize, FieldRule, Filter, Literal, RoadmapError};

#[test]
fn sanitize_passes_safe_expression_through_trimmed() {
    let out = sanitize("  status eq 'Launched'  ").unwrap();
    assert_eq!(out, "status eq 'Launched'");
}

#[test]
fn sanitize_rejects_drop_after_separator() {
    let err = sanitize("status eq 'x'; DROP").unwrap_err();
    assert!(matches!(err, RoadmapError::InvalidFilter(_)));
    assert!(err.to_string().contains("DROP"));
}

#[test]
fn sanitize_keyword_match_is_case_insensitive() {
    for expr in ["drop table", "Delete", "status eq 'a' or ExEc x", "truncate"] {
        assert!(
            matches!(sanitize(expr), Err(RoadmapError::InvalidFilter(_))),
            "{expr:?} should be rejected"
        );
    }
}

#[test]
fn sanitize_only_matches_whole_words() {
    let expr = "contains(title, 'dropdown') and contains(description, 'Updated')";
    assert_eq!(sanitize(expr).unwrap(), expr);
}

#[test]
fn sanitize_strips_separators_and_backslashes() {
    let out = sanitize("status eq 'Launched';\\").unwrap();
    assert_eq!(out, "status eq 'Launched'");
}

#[test]
fn empty_expression_is_no_filter() {
    assert_eq!(Filter::from_expression("  ;  ").unwrap(), None);
    assert!(Filter::from_expression("status eq 'Launched'").unwrap().is_some());
}

#[test]
fn escape_literal_doubles_single_quotes() {
    assert_eq!(escape_literal("O'Brien's Tool"), "O''Brien''s Tool");
    assert_eq!(escape_literal("no quotes"), "no quotes");
}

#[test]
fn product_rule_escapes_quotes_inside_literal() {
    let filter = FieldRule::PRODUCT.matching(Literal::Str("O'Brien's Tool"));
    assert_eq!(filter.as_str(), "products/any(p:p eq 'O''Brien''s Tool')");
}

#[test]
fn release_ring_rule_uses_any_predicate() {
    let filter = FieldRule::RELEASE_RING.matching(Literal::Str("Public Preview"));
    assert_eq!(filter.as_str(), "releaseRings/any(r:r eq 'Public Preview')");
}

#[test]
fn id_rule_leaves_integer_unquoted() {
    let filter = FieldRule::ID.matching(Literal::Int(123456));
    assert_eq!(filter.as_str(), "id eq 123456");
}

#[test]
fn equality_rules_quote_their_literal() {
    assert_eq!(
        FieldRule::STATUS.matching(Literal::Str("Rolling out")).as_str(),
        "status eq 'Rolling out'"
    );
    assert_eq!(
        FieldRule::PREVIEW_AVAILABILITY_DATE
            .matching(Literal::Str("2025-03"))
            .as_str(),
        "previewAvailabilityDate eq '2025-03'"
    );
    assert_eq!(FieldRule::GENERAL_AVAILABILITY_DATE.field(), "generalAvailabilityDate");
}
