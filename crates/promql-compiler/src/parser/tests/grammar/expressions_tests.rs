use crate::test_utils::{dump_expr, dump_expr_spans};

#[test]
fn number_literals() {
    insta::assert_snapshot!(dump_expr("1"), @"Number 1");
    insta::assert_snapshot!(dump_expr(".5"), @"Number 0.5");
    insta::assert_snapshot!(dump_expr("5."), @"Number 5");
    insta::assert_snapshot!(dump_expr("0755"), @"Number 493");
    insta::assert_snapshot!(dump_expr("0x1F"), @"Number 31");
    insta::assert_snapshot!(dump_expr("5e-3"), @"Number 0.005");
    insta::assert_snapshot!(dump_expr("+Inf"), @"Number +Inf");
    insta::assert_snapshot!(dump_expr("-Inf"), @"Number -Inf");
    insta::assert_snapshot!(dump_expr("NaN"), @"Number NaN");
}

#[test]
fn signs_fold_into_number_literals() {
    insta::assert_snapshot!(dump_expr("-5"), @"Number -5");
    insta::assert_snapshot!(dump_expr("- -1"), @"Number 1");
    insta::assert_snapshot!(dump_expr("1 - -1"), @r"
    Binary -
      Number 1
      Number -1
    ");
}

#[test]
fn multiplication_binds_tighter() {
    insta::assert_snapshot!(dump_expr("1 + 2 * 3 - 4"), @r"
    Binary -
      Binary +
        Number 1
        Binary *
          Number 2
          Number 3
      Number 4
    ");
}

#[test]
fn operators_are_left_associative() {
    insta::assert_snapshot!(dump_expr("foo / bar / baz"), @r#"
    Binary / one-to-one ignoring()
      Binary / one-to-one ignoring()
        VectorSelector {__name__="foo"}
        VectorSelector {__name__="bar"}
      VectorSelector {__name__="baz"}
    "#);
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    insta::assert_snapshot!(dump_expr("foo + 1 > bar * 2"), @r#"
    Binary > one-to-one ignoring()
      Binary +
        VectorSelector {__name__="foo"}
        Number 1
      Binary *
        VectorSelector {__name__="bar"}
        Number 2
    "#);
}

#[test]
fn set_operator_precedence() {
    insta::assert_snapshot!(dump_expr("a and b OR c UNLESS d"), @r#"
    Binary or many-to-many ignoring()
      Binary and many-to-many ignoring()
        VectorSelector {__name__="a"}
        VectorSelector {__name__="b"}
      Binary unless many-to-many ignoring()
        VectorSelector {__name__="c"}
        VectorSelector {__name__="d"}
    "#);
}

#[test]
fn arithmetic_binds_tighter_than_set_operators() {
    insta::assert_snapshot!(dump_expr("foo + bar or bla and blub"), @r#"
    Binary or many-to-many ignoring()
      Binary + one-to-one ignoring()
        VectorSelector {__name__="foo"}
        VectorSelector {__name__="bar"}
      Binary and many-to-many ignoring()
        VectorSelector {__name__="bla"}
        VectorSelector {__name__="blub"}
    "#);
}

#[test]
fn parentheses_override_precedence() {
    insta::assert_snapshot!(dump_expr("(1 + 2) * 3"), @r"
    Binary *
      Paren
        Binary +
          Number 1
          Number 2
      Number 3
    ");
}

#[test]
fn unary_minus_on_vector() {
    insta::assert_snapshot!(dump_expr("-some_metric"), @r#"
    Unary -
      VectorSelector {__name__="some_metric"}
    "#);
}

#[test]
fn unary_minus_on_parenthesized_scalar() {
    insta::assert_snapshot!(dump_expr("-(1 + 2)"), @r"
    Unary -
      Paren
        Binary +
          Number 1
          Number 2
    ");
}

#[test]
fn string_literals() {
    insta::assert_snapshot!(dump_expr(r#""double\tquoted""#), @r#"String "double\tquoted""#);
    insta::assert_snapshot!(dump_expr("'single'"), @r#"String "single""#);
    insta::assert_snapshot!(dump_expr(r"`raw\n`"), @r#"String "raw\\n""#);
}

#[test]
fn spans_cover_operands() {
    insta::assert_snapshot!(dump_expr_spans("sum(foo) + 1"), @r#"
    Binary + @0..12
      Aggregate sum @0..8
        VectorSelector {__name__="foo"} @4..7
      Number 1 @11..12
    "#);
}

#[test]
fn folded_sign_extends_span() {
    insta::assert_snapshot!(dump_expr_spans("1 - -2"), @r"
    Binary - @0..6
      Number 1 @0..1
      Number -2 @4..6
    ");
}
