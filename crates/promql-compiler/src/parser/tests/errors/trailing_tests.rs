use crate::test_utils::expr_error;

#[test]
fn range_on_parenthesized_expression() {
    insta::assert_snapshot!(
        expr_error("(foo + bar)[5m]"),
        @r#"syntax error at 11..15: could not parse remaining input "[5m]""#
    );
}

#[test]
fn adjacent_operands() {
    insta::assert_snapshot!(expr_error("1 2"), @r#"syntax error at 2..3: could not parse remaining input "2""#);
    insta::assert_snapshot!(
        expr_error("foo offset 5m offset 1m"),
        @r#"syntax error at 14..23: could not parse remaining input "offset 1m""#
    );
}

#[test]
fn long_rest_is_truncated() {
    insta::assert_snapshot!(
        expr_error("foo bar baz qux quux"),
        @r#"syntax error at 4..20: could not parse remaining input "bar baz qux quu"..."#
    );
    insta::assert_snapshot!(
        expr_error("1 abcdefghijklmno"),
        @r#"syntax error at 2..17: could not parse remaining input "abcdefghijklmno""#
    );
}
