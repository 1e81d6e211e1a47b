use crate::test_utils::{dump_expr, expr_error};

#[test]
fn grouping_before_body() {
    insta::assert_snapshot!(dump_expr("sum by (foo)(some_metric)"), @r#"
    Aggregate sum by(foo)
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn grouping_after_body() {
    insta::assert_snapshot!(dump_expr("sum (some_metric) by (foo,bar) keeping_extra"), @r#"
    Aggregate sum by(foo, bar) keeping_extra
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn keeping_extra_without_grouping() {
    insta::assert_snapshot!(dump_expr("MIN keeping_extra (some_metric)"), @r#"
    Aggregate min keeping_extra
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn operator_names_are_case_insensitive() {
    insta::assert_snapshot!(dump_expr("COUNT by (foo) keeping_extra (some_metric)"), @r#"
    Aggregate count by(foo) keeping_extra
      VectorSelector {__name__="some_metric"}
    "#);
    insta::assert_snapshot!(dump_expr("stdvar(some_metric)"), @r#"
    Aggregate stdvar
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn keywords_as_grouping_labels() {
    insta::assert_snapshot!(dump_expr("sum by (on, by, group_left,)(foo)"), @r#"
    Aggregate sum by(on, by, group_left)
      VectorSelector {__name__="foo"}
    "#);
}

#[test]
fn scalar_parameter() {
    insta::assert_snapshot!(dump_expr("topk(5, some_metric)"), @r#"
    Aggregate topk
      Number 5
      VectorSelector {__name__="some_metric"}
    "#);
    insta::assert_snapshot!(dump_expr("quantile by (job) (0.9, rate(x[5m]))"), @r#"
    Aggregate quantile by(job)
      Number 0.9
      Call rate
        MatrixSelector {__name__="x"}[5m]
    "#);
}

#[test]
fn string_parameter() {
    insta::assert_snapshot!(dump_expr(r#"count_values("value", some_metric)"#), @r#"
    Aggregate count_values
      String "value"
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn body_must_follow_operator() {
    insta::assert_snapshot!(
        expr_error("sum some_metric by (test)"),
        @r#"syntax error at 4..15: unexpected identifier "some_metric" in aggregation, expected "(""#
    );
}

#[test]
fn grouping_needs_parenthesized_labels() {
    insta::assert_snapshot!(
        expr_error("sum (some_metric) by test"),
        @r#"syntax error at 21..25: unexpected identifier "test" in grouping opts, expected "(""#
    );
    insta::assert_snapshot!(
        expr_error("sum (some_metric) by ()"),
        @r#"syntax error at 22..23: unexpected ")" in grouping opts, expected identifier"#
    );
}

#[test]
fn empty_body() {
    insta::assert_snapshot!(expr_error("sum () by (test)"), @"syntax error at 5..6: no valid expression found");
}

#[test]
fn modifiers_on_one_side_only() {
    insta::assert_snapshot!(
        expr_error("MIN keeping_extra (some_metric) by (foo)"),
        @r#"syntax error at 32..40: could not parse remaining input "by (foo)""#
    );
    insta::assert_snapshot!(
        expr_error("MIN by(test) (some_metric) keeping_extra"),
        @r#"syntax error at 27..40: could not parse remaining input "keeping_extra""#
    );
}

#[test]
fn parameter_is_required() {
    insta::assert_snapshot!(expr_error("topk(foo)"), @r#"syntax error at 8..9: unexpected ")" in aggregation, expected ",""#);
}

#[test]
fn single_body_expression() {
    insta::assert_snapshot!(expr_error("sum(foo, bar)"), @r#"syntax error at 7..8: unexpected "," in aggregation, expected ")""#);
}
