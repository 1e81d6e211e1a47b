use crate::test_utils::expr_error;
use crate::{DiagnosticKind, ErrorClass, parse_expr};

#[test]
fn empty_input() {
    insta::assert_snapshot!(expr_error(""), @"syntax error at 0..0: no expression found in input");
    insta::assert_snapshot!(expr_error("   "), @"syntax error at 3..3: no expression found in input");
    insta::assert_snapshot!(expr_error("# just a comment"), @"syntax error at 16..16: no expression found in input");
}

#[test]
fn missing_right_hand_side() {
    insta::assert_snapshot!(expr_error("1 +"), @"syntax error at 3..3: missing right-hand side in binary expression");
    insta::assert_snapshot!(expr_error("foo and"), @"syntax error at 7..7: missing right-hand side in binary expression");
}

#[test]
fn no_valid_expression() {
    insta::assert_snapshot!(expr_error("*1"), @"syntax error at 0..1: no valid expression found");
    insta::assert_snapshot!(expr_error("(,)"), @"syntax error at 1..2: no valid expression found");
}

#[test]
fn unexpected_end_of_input() {
    insta::assert_snapshot!(expr_error("-"), @"syntax error at 1..1: unexpected end of input");
    insta::assert_snapshot!(
        expr_error("1 + sum"),
        @r#"syntax error at 7..7: unexpected end of input in aggregation, expected "(""#
    );
}

#[test]
fn duration_is_not_an_expression() {
    insta::assert_snapshot!(expr_error("5m"), @r#"syntax error at 0..2: unexpected duration "5m""#);
}

#[test]
fn number_out_of_range() {
    insta::assert_snapshot!(expr_error("1e400"), @r#"syntax error at 0..5: number "1e400" out of range"#);
}

#[test]
fn invalid_escape() {
    insta::assert_snapshot!(expr_error(r#""foo\q""#), @r#"lex error at 0..7: invalid escape sequence: "\\q""#);
}

#[test]
fn lex_errors_come_first() {
    insta::assert_snapshot!(expr_error("rate(foo"), @"lex error at 4..5: unclosed left parenthesis");
    insta::assert_snapshot!(expr_error("foo{"), @"lex error at 4..4: unexpected end of input inside braces");
    insta::assert_snapshot!(expr_error("'unterminated"), @"lex error at 0..13: unterminated quoted string");
}

#[test]
fn error_carries_kind_and_class() {
    let Err(err) = parse_expr("1 +") else {
        panic!("expected an error");
    };
    assert_eq!(err.kind(), Some(DiagnosticKind::MissingRhs));
    assert_eq!(err.class(), Some(ErrorClass::Syntax));
    assert!(matches!(err, crate::Error::Syntax(_)));

    let Err(err) = parse_expr("foo $") else {
        panic!("expected an error");
    };
    assert_eq!(err.class(), Some(ErrorClass::Lex));

    let Err(err) = parse_expr("sum(1)") else {
        panic!("expected an error");
    };
    assert_eq!(err.kind(), Some(DiagnosticKind::AggregateOperandType));
    assert_eq!(err.class(), Some(ErrorClass::Type));
}
