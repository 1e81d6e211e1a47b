//! Binary operators, unary operators and primary expressions.

use promql_core::functions;
use rowan::TextRange;

use crate::Result;
use crate::ast::{
    BinaryExpr, BinaryOp, Call, Expr, NumberLiteral, ParenExpr, StringLiteral, UnaryExpr, UnaryOp,
};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::parser::Parser;
use crate::parser::atoms::{parse_number, unquote};
use crate::parser::lexer::Token;
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::syntax_kind::token_sets::EXPR_FIRST;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_binary(1)
    }

    /// Precedence climbing. Operators below `min_precedence` are left for the caller.
    ///
    /// Folding a flat chain is a loop, not a recursion, so it leaves the nesting
    /// budget alone; its operators count against the chain limit instead.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        let mut operators = 0;

        while let Some(op) = binary_op(self.current())
            && op.precedence() >= min_precedence
        {
            let op_token = self.bump();
            self.enter_chain(op_token.span)?;
            operators += 1;

            let matching = self.parse_matching_clause()?;

            if !self.at_any(EXPR_FIRST) {
                return Err(
                    Diagnostic::report(DiagnosticKind::MissingRhs, self.current_span()).into(),
                );
            }
            let rhs = self.parse_binary(op.precedence() + 1)?;

            let span = lhs.span().cover(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                matching,
                span,
            });
        }

        self.exit_chain(operators);
        Ok(lhs)
    }

    /// `-x`, `+x`. A sign applied to a number literal is folded into the literal.
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current() {
            SyntaxKind::Plus => UnaryOp::Plus,
            SyntaxKind::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        let op_span = self.bump().span;
        let start = op_span.start();

        self.enter_recursion(op_span)?;
        let operand = self.parse_unary()?;
        self.exit_recursion();

        let span = TextRange::new(start, operand.span().end());
        if let Expr::NumberLiteral(mut literal) = operand {
            if op == UnaryOp::Minus {
                literal.value = -literal.value;
            }
            literal.span = span;
            return Ok(Expr::NumberLiteral(literal));
        }

        Ok(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current() {
            SyntaxKind::Number => self.parse_number_literal(),
            SyntaxKind::StringLit => self.parse_string_literal(),
            SyntaxKind::ParenOpen => self.parse_paren(),
            SyntaxKind::BraceOpen => self.parse_selector(),
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::ParenOpen => self.parse_call(),
            SyntaxKind::Identifier => self.parse_selector(),
            SyntaxKind::Aggregator => self.parse_aggregate(),
            SyntaxKind::Eof | SyntaxKind::Duration => Err(self.error_at(
                DiagnosticKind::UnexpectedToken,
                self.current_span(),
                &self.describe_current(),
            )),
            _ => Err(Diagnostic::report(DiagnosticKind::NoValidExpression, self.current_span()).into()),
        }
    }

    fn parse_number_literal(&mut self) -> Result<Expr> {
        let token = self.bump();
        let value = self.number_value(&token)?;
        Ok(Expr::NumberLiteral(NumberLiteral {
            value,
            span: token.span,
        }))
    }

    pub(super) fn number_value(&self, token: &Token) -> Result<f64> {
        let text = self.text(token);
        parse_number(text).ok_or_else(|| {
            self.error_at(DiagnosticKind::NumberOutOfRange, token.span, &format!("{text:?}"))
        })
    }

    fn parse_string_literal(&mut self) -> Result<Expr> {
        let token = self.bump();
        let value = self.string_value(&token)?;
        Ok(Expr::StringLiteral(StringLiteral {
            value,
            span: token.span,
        }))
    }

    pub(super) fn string_value(&self, token: &Token) -> Result<String> {
        unquote(self.text(token)).map_err(|escape| {
            self.error_at(DiagnosticKind::InvalidEscape, token.span, &format!("{escape:?}"))
        })
    }

    fn parse_paren(&mut self) -> Result<Expr> {
        self.assert_current(SyntaxKind::ParenOpen);
        let open = self.bump().span;
        let start = open.start();

        self.enter_recursion(open)?;
        let inner = self.parse_expr()?;
        self.exit_recursion();

        self.expect(SyntaxKind::ParenClose, "parenthesized expression", "\")\"")?;
        Ok(Expr::Paren(ParenExpr {
            inner: Box::new(inner),
            span: self.span_from(start),
        }))
    }

    /// `name(arg, ...)`. Unknown names fail here; arity and argument types are
    /// left to the type checker.
    fn parse_call(&mut self) -> Result<Expr> {
        let name_token = self.bump();
        let name = self.text(&name_token);
        let function = functions::lookup(name).ok_or_else(|| {
            self.error_at(DiagnosticKind::UnknownFunction, name_token.span, &format!("{name:?}"))
        })?;

        self.assert_current(SyntaxKind::ParenOpen);
        self.bump();
        self.enter_recursion(name_token.span)?;

        let mut args = Vec::new();
        if !self.at(SyntaxKind::ParenClose) {
            loop {
                args.push(self.parse_expr()?);
                if self.eat(SyntaxKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.exit_recursion();
        self.expect(SyntaxKind::ParenClose, "argument list", "\",\" or \")\"")?;

        Ok(Expr::Call(Call {
            function,
            args,
            span: self.span_from(name_token.span.start()),
        }))
    }
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Sub,
        SyntaxKind::Star => BinaryOp::Mul,
        SyntaxKind::Slash => BinaryOp::Div,
        SyntaxKind::Percent => BinaryOp::Mod,
        SyntaxKind::EqlEql => BinaryOp::Eql,
        SyntaxKind::Neq => BinaryOp::Neq,
        SyntaxKind::Gtr => BinaryOp::Gtr,
        SyntaxKind::Lss => BinaryOp::Lss,
        SyntaxKind::Gte => BinaryOp::Gte,
        SyntaxKind::Lte => BinaryOp::Lte,
        SyntaxKind::KwAnd => BinaryOp::And,
        SyntaxKind::KwOr => BinaryOp::Or,
        SyntaxKind::KwUnless => BinaryOp::Unless,
        _ => return None,
    };
    Some(op)
}
