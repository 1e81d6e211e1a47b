//! Vector and matrix selectors, label matchers, ranges and offsets.

use std::time::Duration;

use promql_core::duration::{DurationError, parse_duration};
use promql_core::labels::is_valid_label_name;
use promql_core::{LabelMatcher, METRIC_NAME_LABEL, MatchType};

use crate::Result;
use crate::ast::{Expr, MatrixSelector, VectorSelector};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::parser::Parser;
use crate::parser::lexer::Token;
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// `name`, `name{...}` or `{...}`, optionally followed by `[range]` and `offset d`.
    ///
    /// A bare name becomes an equality matcher on `__name__`, appended after
    /// the explicit matchers.
    pub(super) fn parse_selector(&mut self) -> Result<Expr> {
        let start = self.current_span().start();
        let name = self
            .eat(SyntaxKind::Identifier)
            .map(|token| self.text(&token).to_string());

        let mut matchers = if self.at(SyntaxKind::BraceOpen) {
            self.parse_label_matchers()?
        } else {
            Vec::new()
        };

        if let Some(name) = &name {
            if let Some(explicit) = matchers.iter().find(|m| m.name() == METRIC_NAME_LABEL) {
                return Err(self.error_at(
                    DiagnosticKind::DuplicateMetricName,
                    self.span_from(start),
                    &format!("{name:?} or {:?}", explicit.value()),
                ));
            }
            matchers.push(LabelMatcher::equal(METRIC_NAME_LABEL, name.as_str()));
        }

        if matchers.is_empty() {
            return Err(Diagnostic::report(DiagnosticKind::EmptySelector, self.span_from(start)).into());
        }

        if self.at(SyntaxKind::BracketOpen) {
            let range = self.parse_range()?;
            let offset = self.parse_offset()?;
            return Ok(Expr::MatrixSelector(MatrixSelector {
                name,
                matchers,
                range,
                offset,
                span: self.span_from(start),
            }));
        }

        let offset = self.parse_offset()?;
        Ok(Expr::VectorSelector(VectorSelector {
            name,
            matchers,
            offset,
            span: self.span_from(start),
        }))
    }

    /// `{label OP "value", ...}`; a trailing comma is allowed.
    fn parse_label_matchers(&mut self) -> Result<Vec<LabelMatcher>> {
        self.assert_current(SyntaxKind::BraceOpen);
        self.bump();

        let mut matchers = Vec::new();
        while !self.at(SyntaxKind::BraceClose) {
            matchers.push(self.parse_label_matcher()?);
            if self.eat(SyntaxKind::Comma).is_none() {
                break;
            }
        }

        self.expect(SyntaxKind::BraceClose, "label matching", "\",\" or \"}\"")?;
        Ok(matchers)
    }

    fn parse_label_matcher(&mut self) -> Result<LabelMatcher> {
        let name_token = self.expect(SyntaxKind::Identifier, "label matching", "identifier")?;
        let name = self.text(&name_token);
        if !is_valid_label_name(name) {
            return Err(self.error_at(
                DiagnosticKind::InvalidLabelName,
                name_token.span,
                &format!("{name:?}"),
            ));
        }

        let match_type = match self.current() {
            SyntaxKind::Assign => MatchType::Equal,
            SyntaxKind::Neq => MatchType::NotEqual,
            SyntaxKind::RegexMatch => MatchType::RegexMatch,
            SyntaxKind::RegexNoMatch => MatchType::RegexNoMatch,
            _ => return Err(self.unexpected("label matching", "label matching operator")),
        };
        self.bump();

        let value_token = self.expect(SyntaxKind::StringLit, "label matching", "string")?;
        let value = self.string_value(&value_token)?;

        LabelMatcher::new(match_type, name, value).map_err(|err| {
            let span = name_token.span.cover(value_token.span);
            self.error_at(DiagnosticKind::InvalidRegex, span, &err.to_string())
        })
    }

    /// `[5m]`. The range must be a positive duration.
    fn parse_range(&mut self) -> Result<Duration> {
        self.assert_current(SyntaxKind::BracketOpen);
        self.bump();

        let range = match self.current() {
            SyntaxKind::Duration => {
                let token = self.bump();
                let range = self.duration_value(&token)?;
                if range.is_zero() {
                    return Err(Diagnostic::report(DiagnosticKind::ZeroRange, token.span).into());
                }
                range
            }
            SyntaxKind::Number | SyntaxKind::BracketClose => {
                return Err(
                    Diagnostic::report(DiagnosticKind::MissingDurationUnit, self.current_span())
                        .into(),
                );
            }
            _ => return Err(self.unexpected("matrix selector", "duration")),
        };

        self.expect(SyntaxKind::BracketClose, "matrix selector", "\"]\"")?;
        Ok(range)
    }

    /// `offset 5m`; absent means zero.
    fn parse_offset(&mut self) -> Result<Duration> {
        if self.eat(SyntaxKind::KwOffset).is_none() {
            return Ok(Duration::ZERO);
        }
        self.expect_duration("offset")
    }

    pub(super) fn expect_duration(&mut self, context: &str) -> Result<Duration> {
        let token = self.expect(SyntaxKind::Duration, context, "duration")?;
        self.duration_value(&token)
    }

    pub(super) fn duration_value(&self, token: &Token) -> Result<Duration> {
        let text = self.text(token);
        parse_duration(text).map_err(|err| match err {
            DurationError::OutOfRange => self.error_at(
                DiagnosticKind::DurationOutOfRange,
                token.span,
                &format!("{text:?}"),
            ),
            DurationError::MissingUnit => {
                Diagnostic::report(DiagnosticKind::MissingDurationUnit, token.span).into()
            }
            other => self.error_at(
                DiagnosticKind::BadNumberOrDuration,
                token.span,
                &other.to_string(),
            ),
        })
    }
}
