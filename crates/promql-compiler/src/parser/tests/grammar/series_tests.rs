use crate::{MAX_SERIES_SAMPLES, parse_series_desc};
use crate::test_utils::{dump_series, series_error};

#[test]
fn label_set_only() {
    insta::assert_snapshot!(dump_series("{} 1 2 3"), @"{} 1 2 3");
    insta::assert_snapshot!(dump_series(r#"{a="b"} -1 2 3"#), @r#"{a="b"} -1 2 3"#);
}

#[test]
fn metric_name() {
    insta::assert_snapshot!(dump_series("my_metric 1 2 3"), @r#"{__name__="my_metric"} 1 2 3"#);
    insta::assert_snapshot!(dump_series("my_metric{} 1 2 3"), @r#"{__name__="my_metric"} 1 2 3"#);
}

#[test]
fn expanding_steps() {
    insta::assert_snapshot!(
        dump_series(r#"my_metric{a="b"} 1 2 3-10x4"#),
        @r#"{__name__="my_metric", a="b"} 1 2 3 -7 -17 -27 -37"#
    );
    insta::assert_snapshot!(dump_series("my_metric 1+1x2 0.5+0.25x1"), @r#"{__name__="my_metric"} 1 2 3 0.5 0.75"#);
    insta::assert_snapshot!(dump_series("my_metric 5+1x0"), @r#"{__name__="my_metric"} 5"#);
}

#[test]
fn omitted_samples() {
    insta::assert_snapshot!(dump_series("my_metric 1 3 _ 5 _x4"), @r#"{__name__="my_metric"} 1 3 _ 5 _ _ _ _"#);
}

#[test]
fn special_values() {
    insta::assert_snapshot!(dump_series("my_metric Inf -Inf NaN +2"), @r#"{__name__="my_metric"} +Inf -Inf NaN 2"#);
}

#[test]
fn surrounding_whitespace() {
    let series = match parse_series_desc("  up{job=\"api\"}\t1\n  2  ") {
        Ok(series) => series,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(series.labels.len(), 2);
    assert_eq!(series.values.len(), 2);
}

#[test]
fn no_values() {
    let series = match parse_series_desc("my_metric") {
        Ok(series) => series,
        Err(err) => panic!("{err}"),
    };
    assert!(series.values.is_empty());
}

#[test]
fn blank_with_bad_suffix() {
    insta::assert_snapshot!(
        series_error("my_metric 1 _a4"),
        @r#"syntax error at 12..15: unexpected identifier "_a4" in series values, expected number"#
    );
}

#[test]
fn values_need_separating_whitespace() {
    insta::assert_snapshot!(
        series_error("foo 1,2"),
        @r#"syntax error at 5..6: unexpected "," in series values, expected whitespace"#
    );
    insta::assert_snapshot!(series_error("foo 1_"), @r#"lex error at 4..6: bad number or duration syntax: "1_""#);
}

#[test]
fn step_needs_repetition() {
    insta::assert_snapshot!(
        series_error("my_metric 1+2"),
        @r#"syntax error at 13..13: unexpected end of input in series values, expected "x""#
    );
    insta::assert_snapshot!(
        series_error("my_metric 1 2+"),
        @"syntax error at 14..14: unexpected end of input in series values, expected number"
    );
}

#[test]
fn repetition_out_of_range() {
    insta::assert_snapshot!(
        series_error("my_metric _x99999999999999999999"),
        @r#"syntax error at 12..32: invalid repetition count "99999999999999999999" in series values"#
    );
}

#[test]
fn repetition_above_sample_limit() {
    insta::assert_snapshot!(
        series_error("m _x18446744073709551615"),
        @r#"syntax error at 4..24: invalid repetition count "18446744073709551615" in series values"#
    );
    insta::assert_snapshot!(
        series_error("m 1+1x18446744073709551615"),
        @r#"syntax error at 6..26: invalid repetition count "18446744073709551615" in series values"#
    );
}

#[test]
fn repetitions_share_the_sample_limit() {
    insta::assert_snapshot!(
        series_error("m _x600000 _x600000"),
        @r#"syntax error at 13..19: invalid repetition count "600000" in series values"#
    );

    let at_limit = format!("m 1+1x{}", MAX_SERIES_SAMPLES - 1);
    let Ok(desc) = parse_series_desc(&at_limit) else {
        panic!("{at_limit:?} should parse");
    };
    assert_eq!(desc.values.len() as u64, MAX_SERIES_SAMPLES);
}

#[test]
fn must_start_with_metric_or_labels() {
    insta::assert_snapshot!(
        series_error("1 2 3"),
        @r#"syntax error at 0..1: unexpected number "1" in series description, expected metric name or label set"#
    );
}

#[test]
fn labels_only_take_equality() {
    insta::assert_snapshot!(
        series_error(r#"my_metric{a!="b"} 1"#),
        @r#"syntax error at 11..13: only "=" is allowed in label sets"#
    );
}
