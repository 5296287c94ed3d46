//! Integration tests for the WHERE grammar: grouping, join operators,
//! NULL handling, type conversion, and bound-value ordering.

mod common;
use common::user_registry;

use chrono::{TimeZone, Utc};
use oxide_params_core::{
    translate, JoinOp, ListingParams, ParamValue, TranslateError, TranslateOptions,
};

fn defaults() -> TranslateOptions {
    TranslateOptions::default()
}

#[test]
fn bound_values_match_placeholder_positions_across_groups() {
    let registry = user_registry();
    let params = ListingParams::new()
        .where_and(vec!["age>=21,age<=65", "name=alice"])
        .where_or("score>4.5");
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(
        query.where_expressions(),
        &[
            "((age >= ?) AND (age <= ?))",
            "(name = ?)",
            "(score > ?)"
        ]
    );
    assert_eq!(
        query.where_values(),
        &[
            ParamValue::Int(21),
            ParamValue::Int(65),
            ParamValue::Text("alice".to_string()),
            ParamValue::Float(4.5),
        ]
    );
    let placeholders = query.where_expr().matches('?').count();
    assert_eq!(placeholders, query.where_values().len());
}

#[test]
fn top_level_expressions_join_with_where_join() {
    let registry = user_registry();

    let params = ListingParams::new()
        .where_and("age>=21")
        .where_or("name=alice");
    let query = translate(&registry, &params, &defaults()).unwrap();
    assert_eq!(query.where_join(), JoinOp::And);
    assert_eq!(query.where_clause(), "WHERE (age >= ?) AND (name = ?)");

    let params = ListingParams::new()
        .where_and("age>=21")
        .where_or("name=alice")
        .where_join("or");
    let query = translate(&registry, &params, &defaults()).unwrap();
    assert_eq!(query.where_join(), JoinOp::Or);
    assert_eq!(query.where_clause(), "WHERE (age >= ?) OR (name = ?)");
}

#[test]
fn or_array_elements_join_their_triples_with_or() {
    let registry = user_registry();
    let params = ListingParams::new().where_or(vec!["name=alice,name=bob"]);
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(
        query.where_clause(),
        "WHERE ((name = ?) OR (name = ?))"
    );
}

#[test]
fn where_shorthand_concatenates_onto_the_and_groups() {
    let registry = user_registry();
    let params = ListingParams::new()
        .where_and("age>=21")
        .where_filter("name=alice");
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(query.where_expressions(), &["(age >= ?)", "(name = ?)"]);
    assert_eq!(
        query.where_values(),
        &[ParamValue::Int(21), ParamValue::Text("alice".to_string())]
    );
}

#[test]
fn null_sentinel_renders_is_and_is_not() {
    let registry = user_registry();
    let params = ListingParams::new().where_and(vec!["nickname=null", "nickname<>NULL"]);
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(
        query.where_expressions(),
        &["(nickname IS ?)", "(nickname IS NOT ?)"]
    );
    assert_eq!(
        query.where_values(),
        &[ParamValue::Null, ParamValue::Null]
    );
}

#[test]
fn null_comparison_on_non_nullable_field_fails_for_any_operator() {
    let registry = user_registry();
    for token in ["age=null", "age<>null", "age>null"] {
        let params = ListingParams::new().where_and(token);
        let err = translate(&registry, &params, &defaults()).unwrap_err();
        let TranslateError::Validation(errors) = err else {
            panic!("expected a validation failure for {token}");
        };
        assert_eq!(errors.len(), 1, "token {token}");
    }
}

#[test]
fn null_with_an_ordering_operator_fails_even_on_nullable_fields() {
    let registry = user_registry();
    let params = ListingParams::new().where_and("nickname<=null");
    let err = translate(&registry, &params, &defaults()).unwrap_err();

    let TranslateError::Validation(errors) = err else {
        panic!("expected a validation failure");
    };
    assert!(errors.errors()[0]
        .message
        .contains("invalid operator <= for NULL comparison"));
}

#[test]
fn conversion_failures_aggregate_into_one_failure() {
    let registry = user_registry();
    let params = ListingParams::new()
        .where_and(vec!["age>=abc", "score<pricey"])
        .where_or("created_at>wednesday:ish");
    let err = translate(&registry, &params, &defaults()).unwrap_err();

    let TranslateError::Validation(errors) = err else {
        panic!("expected a validation failure");
    };
    let messages: Vec<&str> = errors.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "invalid integer value for field age",
            "invalid numeric value for field score",
            "invalid datetime value for field created_at",
        ]
    );
}

#[test]
fn typed_conversions_flow_through_the_full_pipeline() {
    let registry = user_registry();
    let params = ListingParams::new().where_and(vec![
        "active=yes",
        "score>=4.5",
        "created_at>2024-03-01T12:30:00Z",
        "created_at<=1700000000000",
    ]);
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(
        query.where_values(),
        &[
            ParamValue::Bool(true),
            ParamValue::Float(4.5),
            ParamValue::DateTime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
            ParamValue::DateTime(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()),
        ]
    );
}

#[test]
fn malformed_and_disallowed_tokens_never_fail_translation() {
    let registry = user_registry();
    // "id" is selectable but not filterable; "ghost" is unknown.
    let params = ListingParams::new().where_and(vec![
        "id=7",
        "ghost=1",
        "age>=>21",
        "noequalsanywhere",
        "age>=21",
    ]);
    let query = translate(&registry, &params, &defaults()).unwrap();

    assert_eq!(query.where_expressions(), &["(age >= ?)"]);
    assert_eq!(query.where_values(), &[ParamValue::Int(21)]);
}

#[test]
fn untyped_fields_bind_the_raw_string() {
    let registry = user_registry();
    let params = ListingParams::new().where_and("name=O'Brien; DROP TABLE users");
    let query = translate(&registry, &params, &defaults()).unwrap();

    // The hostile text travels as a bound value, never as SQL.
    assert_eq!(query.where_clause(), "WHERE (name = ?)");
    assert_eq!(
        query.where_values(),
        &[ParamValue::Text("O'Brien; DROP TABLE users".to_string())]
    );
}
