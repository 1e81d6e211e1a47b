use crate::ast::{AstPrinter, Expr, Statement};
use crate::{ParserConfig, parse_expr, parse_series_desc, parse_stmts};

#[track_caller]
pub fn expect_expr(source: &str) -> Expr {
    match parse_expr(source) {
        Ok(expr) => expr,
        Err(err) => panic!("expected {source:?} to parse, got: {err}"),
    }
}

/// Tree dump of a valid expression.
#[track_caller]
pub fn dump_expr(source: &str) -> String {
    AstPrinter::new(&expect_expr(source)).dump()
}

/// Tree dump with byte ranges.
#[track_caller]
pub fn dump_expr_spans(source: &str) -> String {
    AstPrinter::new(&expect_expr(source)).with_spans(true).dump()
}

/// Rendered error of an invalid expression.
#[track_caller]
pub fn expr_error(source: &str) -> String {
    match parse_expr(source) {
        Ok(expr) => panic!(
            "expected {source:?} to fail, got:\n{}",
            AstPrinter::new(&expr).dump()
        ),
        Err(err) => err.to_string(),
    }
}

#[track_caller]
pub fn expr_error_with(config: ParserConfig, source: &str) -> String {
    match config.parse_expr(source) {
        Ok(_) => panic!("expected {source:?} to fail"),
        Err(err) => err.to_string(),
    }
}

#[track_caller]
pub fn expect_stmts(source: &str) -> Vec<Statement> {
    match parse_stmts(source) {
        Ok(statements) => statements,
        Err(err) => panic!("expected rules to parse, got: {err}"),
    }
}

#[track_caller]
pub fn dump_stmts(source: &str) -> String {
    AstPrinter::statements(&expect_stmts(source)).dump()
}

#[track_caller]
pub fn stmts_error(source: &str) -> String {
    match parse_stmts(source) {
        Ok(statements) => panic!(
            "expected rules to fail, got:\n{}",
            AstPrinter::statements(&statements).dump()
        ),
        Err(err) => err.to_string(),
    }
}

/// `metric{labels}` followed by the values, `_` for omitted samples.
#[track_caller]
pub fn dump_series(source: &str) -> String {
    let series = match parse_series_desc(source) {
        Ok(series) => series,
        Err(err) => panic!("expected {source:?} to parse, got: {err}"),
    };
    let values: Vec<String> = series
        .values
        .iter()
        .map(|v| {
            if v.omitted {
                "_".to_string()
            } else {
                crate::ast::format_number(v.value)
            }
        })
        .collect();
    format!(
        "{} {}",
        promql_core::labels::format_label_set(&series.labels),
        values.join(" ")
    )
}

#[track_caller]
pub fn series_error(source: &str) -> String {
    match parse_series_desc(source) {
        Ok(series) => panic!("expected {source:?} to fail, got {series:?}"),
        Err(err) => err.to_string(),
    }
}
