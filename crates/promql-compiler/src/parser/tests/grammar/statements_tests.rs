use indoc::indoc;

use crate::test_utils::{dump_stmts, expect_stmts, stmts_error};

#[test]
fn rule_file() {
    let input = indoc! {r#"
        # A simple test recording rule.
        dc:http_request:rate5m = sum(rate(http_request_count[5m])) by (dc)

        # A simple test alerting rule.
        ALERT GlobalRequestRateLow IF(dc:http_request:rate5m < 10000) FOR 5m WITH {
            service = "testservice"
            # ... more fields here ...
          }
          SUMMARY "Global request rate low"
          DESCRIPTION "The global request rate is low"

        foo = bar{label1="value1"}

        ALERT BazAlert IF foo > 10 WITH {}
          SUMMARY "Baz"
          DESCRIPTION "BazAlert"
    "#};

    insta::assert_snapshot!(dump_stmts(input), @r#"
    Record dc:http_request:rate5m
      Aggregate sum by(dc)
        Call rate
          MatrixSelector {__name__="http_request_count"}[5m]
    Alert GlobalRequestRateLow for 5m {service="testservice"}
      Summary "Global request rate low"
      Description "The global request rate is low"
      Paren
        Binary <
          VectorSelector {__name__="dc:http_request:rate5m"}
          Number 10000
    Record foo
      VectorSelector {label1="value1", __name__="bar"}
    Alert BazAlert {}
      Summary "Baz"
      Description "BazAlert"
      Binary >
        VectorSelector {__name__="foo"}
        Number 10
    "#);
}

#[test]
fn record_with_labels() {
    insta::assert_snapshot!(dump_stmts(r#"foo{a="b", x="",} = bar"#), @r#"
    Record foo {a="b", x=""}
      VectorSelector {__name__="bar"}
    "#);
}

#[test]
fn empty_input() {
    assert!(expect_stmts("").is_empty());
    assert!(expect_stmts("  # only a comment\n\n").is_empty());
}

#[test]
fn record_must_be_vector() {
    insta::assert_snapshot!(stmts_error("foo = time()"), @"type error at 6..12: record statement must have a valid expression of vector type");
    insta::assert_snapshot!(stmts_error("foo = 1"), @"type error at 6..7: record statement must have a valid expression of vector type");
    insta::assert_snapshot!(stmts_error("foo = bar[5m]"), @"type error at 6..13: record statement must have a valid expression of vector type");
    insta::assert_snapshot!(stmts_error(r#"foo = "test""#), @"type error at 6..12: record statement must have a valid expression of vector type");
}

#[test]
fn record_without_expression() {
    insta::assert_snapshot!(stmts_error("foo = "), @"syntax error at 6..6: unexpected end of input");
}

#[test]
fn record_labels_only_take_equality() {
    insta::assert_snapshot!(stmts_error(r#"foo{a!="b"} = bar"#), @r#"syntax error at 5..7: only "=" is allowed in label sets"#);
    insta::assert_snapshot!(stmts_error(r#"foo{a=~"b"} = bar"#), @r#"syntax error at 5..7: only "=" is allowed in label sets"#);
}

#[test]
fn duplicate_label() {
    insta::assert_snapshot!(stmts_error(r#"foo{a="b", a="c"} = bar"#), @r#"syntax error at 11..12: label name "a" set twice"#);
}

#[test]
fn alert_must_be_vector() {
    insta::assert_snapshot!(
        stmts_error(r#"ALERT SomeName IF time() WITH {} SUMMARY "s" DESCRIPTION "d""#),
        @"type error at 18..24: alert statement must have a valid expression of vector type"
    );
}

#[test]
fn alert_clauses_are_mandatory() {
    insta::assert_snapshot!(
        stmts_error(r#"ALERT SomeName IF some_metric > 1 WITH {} SUMMARY "s""#),
        @"type error at 53..53: alert statement must have a DESCRIPTION clause"
    );
    insta::assert_snapshot!(
        stmts_error(r#"ALERT SomeName IF some_metric > 1 SUMMARY "s" DESCRIPTION "d""#),
        @"type error at 34..41: alert statement must have a WITH clause"
    );
}

#[test]
fn alert_for_needs_duration() {
    insta::assert_snapshot!(
        stmts_error(r#"ALERT A IF foo FOR 5 WITH {} SUMMARY "s" DESCRIPTION "d""#),
        @r#"syntax error at 19..20: unexpected number "5" in alert statement, expected duration"#
    );
}

#[test]
fn alert_text_must_not_be_empty() {
    insta::assert_snapshot!(
        stmts_error(r#"ALERT A IF foo WITH {} SUMMARY "" DESCRIPTION "d""#),
        @"syntax error at 31..33: alert summary must not be empty"
    );
}

#[test]
fn statement_needs_a_name() {
    insta::assert_snapshot!(
        stmts_error("1 = foo"),
        @r#"syntax error at 0..1: unexpected number "1" in statement, expected rule name or "ALERT""#
    );
}

#[test]
fn first_failure_aborts_the_batch() {
    let input = indoc! {r#"
        good = foo
        bad = 1
        never = bar
    "#};
    insta::assert_snapshot!(stmts_error(input), @"type error at 17..18: record statement must have a valid expression of vector type");
}
