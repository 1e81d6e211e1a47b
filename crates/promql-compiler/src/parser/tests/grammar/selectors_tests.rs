use crate::ast::Expr;
use crate::test_utils::{dump_expr, expect_expr, expr_error};

#[test]
fn bare_metric_name() {
    insta::assert_snapshot!(dump_expr("foo"), @r#"VectorSelector {__name__="foo"}"#);
    insta::assert_snapshot!(dump_expr("foo offset 5m"), @r#"VectorSelector {__name__="foo"} offset 5m"#);
}

#[test]
fn name_matcher_goes_last() {
    insta::assert_snapshot!(dump_expr(r#"foo:bar{a="bc"}"#), @r#"VectorSelector {a="bc", __name__="foo:bar"}"#);
}

#[test]
fn all_match_operators() {
    insta::assert_snapshot!(
        dump_expr(r#"foo{a="b", foo!="bar", test=~"test", bar!~"baz"}"#),
        @r#"VectorSelector {a="b", foo!="bar", test=~"test", bar!~"baz", __name__="foo"}"#
    );
}

#[test]
fn keywords_are_label_names_inside_braces() {
    insta::assert_snapshot!(dump_expr("foo{NaN='bc', by=\"x\"}"), @r#"VectorSelector {NaN="bc", by="x", __name__="foo"}"#);
}

#[test]
fn trailing_comma_in_matchers() {
    insta::assert_snapshot!(dump_expr(r#"{a="b",}"#), @r#"VectorSelector {a="b"}"#);
}

#[test]
fn name_only_through_matcher() {
    let expr = expect_expr(r#"{__name__=~"job:.*"}"#);
    let Expr::VectorSelector(selector) = expr else {
        panic!("expected a vector selector");
    };
    assert_eq!(selector.name, None);
    assert!(selector.matchers[0].matches("job:rate"));
    assert!(!selector.matchers[0].matches("xjob:rate"));
}

#[test]
fn matrix_selectors() {
    insta::assert_snapshot!(dump_expr("test[5s]"), @r#"MatrixSelector {__name__="test"}[5s]"#);
    insta::assert_snapshot!(dump_expr("test[5h] OFFSET 5m"), @r#"MatrixSelector {__name__="test"}[5h] offset 5m"#);
    insta::assert_snapshot!(dump_expr("test[5w] offset 2w"), @r#"MatrixSelector {__name__="test"}[5w] offset 2w"#);
    insta::assert_snapshot!(
        dump_expr(r#"test{a="b"}[5y] OFFSET 3d"#),
        @r#"MatrixSelector {a="b", __name__="test"}[5y] offset 3d"#
    );
}

#[test]
fn durations_are_normalized() {
    insta::assert_snapshot!(dump_expr("foo[60m] offset 7d"), @r#"MatrixSelector {__name__="foo"}[1h] offset 1w"#);
}

#[test]
fn zero_offset_is_allowed() {
    insta::assert_snapshot!(dump_expr("foo offset 0s"), @r#"VectorSelector {__name__="foo"}"#);
}

#[test]
fn empty_selector() {
    insta::assert_snapshot!(expr_error("{}"), @"syntax error at 0..2: vector selector must contain label matchers or metric name");
}

#[test]
fn metric_name_set_twice() {
    insta::assert_snapshot!(
        expr_error(r#"foo{__name__="bar"}"#),
        @r#"type error at 0..19: metric name must not be set twice: "foo" or "bar""#
    );
}

#[test]
fn label_value_must_be_string() {
    insta::assert_snapshot!(
        expr_error("some_metric{a=b}"),
        @r#"syntax error at 14..15: unexpected identifier "b" in label matching, expected string"#
    );
}

#[test]
fn missing_match_operator() {
    insta::assert_snapshot!(
        expr_error("foo{gibberish}"),
        @r#"syntax error at 13..14: unexpected "}" in label matching, expected label matching operator"#
    );
}

#[test]
fn invalid_regex() {
    let err = expr_error(r#"foo{a=~"("}"#);
    assert!(
        err.starts_with(r#"type error at 4..10: invalid regular expression "(": "#),
        "{err}"
    );
}

#[test]
fn zero_range() {
    insta::assert_snapshot!(expr_error("foo[0m]"), @"syntax error at 4..6: duration must be greater than 0");
}

#[test]
fn range_without_unit() {
    insta::assert_snapshot!(expr_error("foo[]"), @"syntax error at 4..5: missing unit character in duration");
    insta::assert_snapshot!(expr_error("foo[1]"), @"syntax error at 4..5: missing unit character in duration");
}

#[test]
fn range_must_be_duration() {
    insta::assert_snapshot!(
        expr_error(r#"foo["5m"]"#),
        @r#"syntax error at 4..8: unexpected string "5m" in matrix selector, expected duration"#
    );
}

#[test]
fn offset_must_be_duration() {
    insta::assert_snapshot!(
        expr_error("some_metric[5m] OFFSET 1"),
        @r#"syntax error at 23..24: unexpected number "1" in offset, expected duration"#
    );
    insta::assert_snapshot!(
        expr_error("some_metric[5m] OFFSET"),
        @"syntax error at 22..22: unexpected end of input in offset, expected duration"
    );
}

#[test]
fn duration_overflow() {
    insta::assert_snapshot!(
        expr_error("foo[99999999999999999999s]"),
        @r#"syntax error at 4..25: duration "99999999999999999999s" out of range"#
    );
}
