//! Static type checking.
//!
//! Walks the tree bottom-up, assigning each node a [`ValueType`] and rejecting
//! combinations the evaluator cannot run. Binary operations between two
//! vectors get their matching resolved in place.

use promql_core::ValueType;
use rowan::TextRange;

use super::matching::resolve_matching;
use crate::Result;
use crate::ast::{AggregateExpr, BinaryExpr, Call, Expr, Statement};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

fn type_error(kind: DiagnosticKind, span: TextRange, detail: Option<String>) -> crate::Error {
    let diag = Diagnostic::report(kind, span);
    match detail {
        Some(detail) => diag.detail(detail).into(),
        None => diag.into(),
    }
}

/// Checks an expression and returns its type.
pub fn check_expr(expr: &mut Expr) -> Result<ValueType> {
    match expr {
        Expr::NumberLiteral(_) => Ok(ValueType::Scalar),
        Expr::StringLiteral(_) => Ok(ValueType::String),
        Expr::VectorSelector(_) => Ok(ValueType::Vector),
        Expr::MatrixSelector(_) => Ok(ValueType::Matrix),
        Expr::Paren(paren) => check_expr(&mut paren.inner),
        Expr::Unary(unary) => {
            let operand = check_expr(&mut unary.operand)?;
            if !operand.is_numeric() {
                return Err(type_error(
                    DiagnosticKind::UnaryOperandType,
                    unary.span,
                    Some(operand.to_string()),
                ));
            }
            Ok(operand)
        }
        Expr::Binary(binary) => check_binary(binary),
        Expr::Call(call) => check_call(call),
        Expr::Aggregate(agg) => check_aggregate(agg),
    }
}

fn check_binary(binary: &mut BinaryExpr) -> Result<ValueType> {
    let lhs = check_expr(&mut binary.lhs)?;
    let rhs = check_expr(&mut binary.rhs)?;

    if !lhs.is_numeric() || !rhs.is_numeric() {
        return Err(type_error(DiagnosticKind::BinaryOperandType, binary.span, None));
    }

    if lhs == ValueType::Vector && rhs == ValueType::Vector {
        binary.matching = Some(resolve_matching(binary.op, binary.matching.take(), binary.span)?);
        return Ok(ValueType::Vector);
    }

    if binary.matching.is_some() {
        return Err(type_error(
            DiagnosticKind::MatchingBetweenNonVectors,
            binary.span,
            None,
        ));
    }
    if binary.op.is_set_operator() {
        return Err(type_error(
            DiagnosticKind::SetOperatorOnScalar,
            binary.span,
            Some(format!("set operator {:?}", binary.op.as_str())),
        ));
    }

    if lhs == ValueType::Vector || rhs == ValueType::Vector {
        Ok(ValueType::Vector)
    } else {
        Ok(ValueType::Scalar)
    }
}

/// Arity first, then each argument against its declared position.
fn check_call(call: &mut Call) -> Result<ValueType> {
    let function = call.function;
    let given = call.args.len();
    let min = function.min_args();
    let max = function.max_args();

    let arity = if given < min {
        Some(format!("expected at least {min} argument(s)"))
    } else if let Some(max) = max
        && given > max
    {
        Some(format!("expected at most {max} argument(s)"))
    } else {
        None
    };
    if let Some(expected) = arity {
        return Err(type_error(
            DiagnosticKind::ArgumentCount,
            call.span,
            Some(format!("{expected} in call to {:?}, got {given}", function.name)),
        ));
    }

    for (index, arg) in call.args.iter_mut().enumerate() {
        let actual = check_expr(arg)?;
        let Some(expected) = function.arg_type(index) else {
            continue;
        };
        if actual != expected {
            return Err(type_error(
                DiagnosticKind::ArgumentType,
                arg.span(),
                Some(format!(
                    "expected type {expected} in call to function {:?}, got {actual}",
                    function.name
                )),
            ));
        }
    }

    Ok(function.return_type)
}

fn check_aggregate(agg: &mut AggregateExpr) -> Result<ValueType> {
    if let Some(param) = &mut agg.param {
        let actual = check_expr(param)?;
        if let Some(expected) = agg.op.param_type()
            && actual != expected
        {
            return Err(type_error(
                DiagnosticKind::AggregateParameterType,
                param.span(),
                Some(format!(
                    "expected type {expected} in {} parameter, got {actual}",
                    agg.op.as_str()
                )),
            ));
        }
    }

    let inner = check_expr(&mut agg.inner)?;
    if inner != ValueType::Vector {
        return Err(type_error(
            DiagnosticKind::AggregateOperandType,
            agg.inner.span(),
            Some(inner.to_string()),
        ));
    }
    Ok(ValueType::Vector)
}

/// Checks a rule: its expression must produce a vector.
pub fn check_statement(stmt: &mut Statement) -> Result<()> {
    let (kind, expr) = match stmt {
        Statement::Record(record) => ("record", &mut record.expr),
        Statement::Alert(alert) => ("alert", &mut alert.expr),
    };

    let value_type = check_expr(expr)?;
    if value_type != ValueType::Vector {
        return Err(type_error(
            DiagnosticKind::StatementType,
            expr.span(),
            Some(kind.to_string()),
        ));
    }
    Ok(())
}
