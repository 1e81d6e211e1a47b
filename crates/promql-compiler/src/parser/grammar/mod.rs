//! Grammar productions for the query language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Each entry point consumes the parser and returns the finished tree or the
//! first error encountered.

mod aggregates;
mod expressions;
mod matching;
mod selectors;
mod series;
mod statements;

use promql_core::labels::is_valid_label_name;
use rowan::{TextRange, TextSize};

use crate::ast::Expr;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::syntax_kind::token_sets::LABEL_NAME_LIKE;
use crate::{Error, Result};

/// How much of the unparsed rest goes into a "could not parse remaining input" message.
const TRAILING_PREVIEW_CHARS: usize = 15;

impl Parser<'_> {
    /// Parses a complete expression; anything left over is an error.
    pub fn parse_expr_root(mut self) -> Result<Expr> {
        if self.at_eof() {
            return Err(Diagnostic::report(DiagnosticKind::NoExpression, self.current_span()).into());
        }

        let expr = self.parse_expr()?;
        if !self.at_eof() {
            return Err(self.trailing_input());
        }
        self.assert_depth_released();
        Ok(expr)
    }

    fn trailing_input(&self) -> Error {
        let start = self.current_span().start();
        let rest = &self.source[usize::from(start)..];

        let mut preview: String = rest.chars().take(TRAILING_PREVIEW_CHARS).collect();
        let truncated = preview.len() < rest.len();
        preview = format!("{preview:?}");
        if truncated {
            preview.push_str("...");
        }

        self.error_at(
            DiagnosticKind::TrailingInput,
            TextRange::new(start, TextSize::from(self.source.len() as u32)),
            &preview,
        )
    }

    /// Parses a comma-separated, parenthesized list of label names: `(a, b)`.
    ///
    /// Keywords are accepted as names (`by (on)`), a trailing comma is allowed,
    /// and the list must not be empty.
    pub(super) fn parse_label_list(&mut self, context: &str) -> Result<Vec<String>> {
        self.expect(SyntaxKind::ParenOpen, context, "\"(\"")?;

        let mut labels = Vec::new();
        loop {
            if !self.at_any(LABEL_NAME_LIKE) {
                return Err(self.unexpected(context, "identifier"));
            }
            let token = self.bump();
            let name = self.text(&token);
            if !is_valid_label_name(name) {
                return Err(self.error_at(
                    DiagnosticKind::InvalidLabelName,
                    token.span,
                    &format!("{name:?}"),
                ));
            }
            labels.push(name.to_string());

            if self.eat(SyntaxKind::Comma).is_none() || self.at(SyntaxKind::ParenClose) {
                break;
            }
        }

        self.expect(SyntaxKind::ParenClose, context, "\",\" or \")\"")?;
        Ok(labels)
    }
}
