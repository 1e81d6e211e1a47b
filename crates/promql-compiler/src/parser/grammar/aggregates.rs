//! Aggregation expressions: `sum by (job) keeping_extra (rate(x[5m]))`.

use crate::Result;
use crate::ast::{AggregateExpr, AggregateOp, Expr};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// Modifiers (`by (...)`, `keeping_extra`) may come before or after the
    /// parenthesized body, but not both.
    pub(super) fn parse_aggregate(&mut self) -> Result<Expr> {
        self.assert_current(SyntaxKind::Aggregator);
        let op_token = self.bump();
        let op_text = self.text(&op_token);
        let op = AggregateOp::from_name(op_text).ok_or_else(|| {
            self.error_at(
                DiagnosticKind::UnexpectedToken,
                op_token.span,
                &format!("aggregation {op_text:?}"),
            )
        })?;

        let (mut grouping, mut keep_extra_labels) = self.parse_modifiers()?;
        let modifiers_first = !grouping.is_empty() || keep_extra_labels;

        self.expect(SyntaxKind::ParenOpen, "aggregation", "\"(\"")?;
        self.enter_recursion(op_token.span)?;

        let param = match op.param_type() {
            Some(_) => {
                let param = self.parse_expr()?;
                self.expect(SyntaxKind::Comma, "aggregation", "\",\"")?;
                Some(Box::new(param))
            }
            None => None,
        };
        let inner = self.parse_expr()?;

        self.exit_recursion();
        self.expect(SyntaxKind::ParenClose, "aggregation", "\")\"")?;

        if !modifiers_first {
            (grouping, keep_extra_labels) = self.parse_modifiers()?;
        }

        Ok(Expr::Aggregate(AggregateExpr {
            op,
            param,
            inner: Box::new(inner),
            grouping,
            keep_extra_labels,
            span: self.span_from(op_token.span.start()),
        }))
    }

    /// `[by (a, b)] [keeping_extra]`, both optional.
    fn parse_modifiers(&mut self) -> Result<(Vec<String>, bool)> {
        let grouping = match self.eat(SyntaxKind::KwBy) {
            Some(_) => self.parse_label_list("grouping opts")?,
            None => Vec::new(),
        };
        let keep_extra = self.eat(SyntaxKind::KwKeepingExtra).is_some();
        Ok((grouping, keep_extra))
    }
}
