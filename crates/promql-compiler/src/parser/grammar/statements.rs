//! Rule files: recording rules and alerting rules.
//!
//! ```text
//! name[{label="value", ...}] = <expr>
//!
//! ALERT name
//!   IF <expr>
//!   [FOR <duration>]
//!   WITH {label="value", ...}
//!   SUMMARY "text"
//!   DESCRIPTION "text"
//! ```

use std::time::Duration;

use promql_core::LabelSet;
use promql_core::labels::is_valid_label_name;

use crate::Result;
use crate::ast::{AlertStmt, RecordStmt, Statement};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::syntax_kind::token_sets::MATCH_OPS;

impl Parser<'_> {
    /// Parses statements until end of input. Stops at the first error.
    pub fn parse_statements(mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            let stmt = self.parse_statement()?;
            tracing::trace!(name = stmt.name(), "parsed statement");
            statements.push(stmt);
        }
        self.assert_depth_released();
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current() {
            SyntaxKind::KwAlert => self.parse_alert(),
            SyntaxKind::Identifier => self.parse_record(),
            _ => Err(self.unexpected("statement", "rule name or \"ALERT\"")),
        }
    }

    fn parse_record(&mut self) -> Result<Statement> {
        let name_token = self.bump();
        let name = self.text(&name_token).to_string();

        let labels = if self.at(SyntaxKind::BraceOpen) {
            let mut labels = LabelSet::new();
            self.parse_label_set(&mut labels, "record statement")?;
            Some(labels)
        } else {
            None
        };

        self.expect(SyntaxKind::Assign, "record statement", "\"=\"")?;
        let expr = self.parse_expr()?;

        Ok(Statement::Record(RecordStmt {
            name,
            labels,
            expr,
            span: self.span_from(name_token.span.start()),
        }))
    }

    fn parse_alert(&mut self) -> Result<Statement> {
        self.assert_current(SyntaxKind::KwAlert);
        let start = self.bump().span.start();

        let name_token = self.expect(SyntaxKind::Identifier, "alert statement", "alert name")?;
        let name = self.text(&name_token).to_string();

        self.expect(SyntaxKind::KwIf, "alert statement", "\"IF\"")?;
        let expr = self.parse_expr()?;

        let for_duration = match self.eat(SyntaxKind::KwFor) {
            Some(_) => self.expect_duration("alert statement")?,
            None => Duration::ZERO,
        };

        self.expect_clause(SyntaxKind::KwWith, "WITH")?;
        if !self.at(SyntaxKind::BraceOpen) {
            return Err(self.unexpected("alert statement", "\"{\""));
        }
        let mut labels = LabelSet::new();
        self.parse_label_set(&mut labels, "alert statement")?;

        self.expect_clause(SyntaxKind::KwSummary, "SUMMARY")?;
        let summary = self.parse_alert_text("summary")?;

        self.expect_clause(SyntaxKind::KwDescription, "DESCRIPTION")?;
        let description = self.parse_alert_text("description")?;

        Ok(Statement::Alert(AlertStmt {
            name,
            expr,
            for_duration,
            labels,
            summary,
            description,
            span: self.span_from(start),
        }))
    }

    /// Mandatory alert clauses are reported as missing rather than as a stray token.
    fn expect_clause(&mut self, keyword: SyntaxKind, name: &str) -> Result<()> {
        if self.eat(keyword).is_some() {
            return Ok(());
        }
        Err(self.error_at(
            DiagnosticKind::MissingStatementClause,
            self.current_span(),
            name,
        ))
    }

    fn parse_alert_text(&mut self, what: &str) -> Result<String> {
        let token = self.expect(SyntaxKind::StringLit, "alert statement", "string")?;
        let text = self.string_value(&token)?;
        if text.is_empty() {
            return Err(self.error_at(DiagnosticKind::EmptyAlertText, token.span, what));
        }
        Ok(text)
    }

    /// `{label="value", ...}` into `labels`. Only `=` is allowed and each name may appear once,
    /// including names already present in `labels`.
    pub(super) fn parse_label_set(&mut self, labels: &mut LabelSet, context: &str) -> Result<()> {
        self.assert_current(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at(SyntaxKind::BraceClose) {
            let name_token = self.expect(SyntaxKind::Identifier, context, "label name")?;
            let name = self.text(&name_token);
            if !is_valid_label_name(name) {
                return Err(self.error_at(
                    DiagnosticKind::InvalidLabelName,
                    name_token.span,
                    &format!("{name:?}"),
                ));
            }

            if self.at_any(MATCH_OPS) && !self.at(SyntaxKind::Assign) {
                return Err(
                    Diagnostic::report(DiagnosticKind::NonEqualityLabel, self.current_span()).into(),
                );
            }
            self.expect(SyntaxKind::Assign, context, "\"=\"")?;

            let value_token = self.expect(SyntaxKind::StringLit, context, "string")?;
            let value = self.string_value(&value_token)?;

            if labels.contains_key(name) {
                return Err(self.error_at(
                    DiagnosticKind::DuplicateLabel,
                    name_token.span,
                    &format!("{name:?}"),
                ));
            }
            labels.insert(name.to_string(), value);

            if self.eat(SyntaxKind::Comma).is_none() {
                break;
            }
        }

        self.expect(SyntaxKind::BraceClose, context, "\",\" or \"}\"")?;
        Ok(())
    }
}
