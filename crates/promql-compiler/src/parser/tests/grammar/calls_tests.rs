use crate::test_utils::{dump_expr, expr_error};

#[test]
fn no_arguments() {
    insta::assert_snapshot!(dump_expr("time()"), @"Call time");
}

#[test]
fn matrix_argument() {
    insta::assert_snapshot!(dump_expr("rate(some_metric[5m])"), @r#"
    Call rate
      MatrixSelector {__name__="some_metric"}[5m]
    "#);
}

#[test]
fn optional_argument() {
    insta::assert_snapshot!(dump_expr("round(some_metric)"), @r#"
    Call round
      VectorSelector {__name__="some_metric"}
    "#);
    insta::assert_snapshot!(dump_expr("round(some_metric, 5)"), @r#"
    Call round
      VectorSelector {__name__="some_metric"}
      Number 5
    "#);
}

#[test]
fn variadic_arguments() {
    insta::assert_snapshot!(dump_expr(r#"label_join(up, "dst", ",", "a", "b")"#), @r#"
    Call label_join
      VectorSelector {__name__="up"}
      String "dst"
      String ","
      String "a"
      String "b"
    "#);
}

#[test]
fn scalar_conversion_round_trip() {
    insta::assert_snapshot!(dump_expr("vector(scalar(foo) + 1)"), @r#"
    Call vector
      Binary +
        Call scalar
          VectorSelector {__name__="foo"}
        Number 1
    "#);
}

#[test]
fn unknown_function() {
    insta::assert_snapshot!(
        expr_error("non_existant_function_far_bar()"),
        @r#"syntax error at 0..29: unknown function with name "non_existant_function_far_bar""#
    );
}

#[test]
fn too_few_arguments() {
    insta::assert_snapshot!(
        expr_error("floor()"),
        @r#"type error at 0..7: expected at least 1 argument(s) in call to "floor", got 0"#
    );
}

#[test]
fn too_many_arguments() {
    insta::assert_snapshot!(
        expr_error("floor(some_metric, other_metric)"),
        @r#"type error at 0..32: expected at most 1 argument(s) in call to "floor", got 2"#
    );
}

#[test]
fn wrong_argument_type() {
    insta::assert_snapshot!(
        expr_error("floor(1)"),
        @r#"type error at 6..7: expected type vector in call to function "floor", got scalar"#
    );
    insta::assert_snapshot!(
        expr_error("rate(some_metric)"),
        @r#"type error at 5..16: expected type matrix in call to function "rate", got vector"#
    );
}

#[test]
fn trailing_comma_in_arguments() {
    insta::assert_snapshot!(expr_error("rate(foo[5m],)"), @"syntax error at 13..14: no valid expression found");
}

#[test]
fn missing_separator() {
    insta::assert_snapshot!(
        expr_error("floor(foo bar)"),
        @r#"syntax error at 10..13: unexpected identifier "bar" in argument list, expected "," or ")""#
    );
}
