//! Indented tree dump of an AST, one node per line.

use std::fmt::Write;

use promql_core::duration::format_duration;
use promql_core::labels::{format_label_set, quote};
use rowan::TextRange;

use super::display::format_number;
use super::{Cardinality, Expr, MatchingLabels, Statement};

enum Target<'a> {
    Expr(&'a Expr),
    Statements(&'a [Statement]),
}

pub struct AstPrinter<'a> {
    target: Target<'a>,
    spans: bool,
}

impl<'a> AstPrinter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            target: Target::Expr(expr),
            spans: false,
        }
    }

    pub fn statements(statements: &'a [Statement]) -> Self {
        Self {
            target: Target::Statements(statements),
            spans: false,
        }
    }

    /// Append each node's byte range.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.target {
            Target::Expr(expr) => self.format_expr(expr, 0, w),
            Target::Statements(statements) => {
                for stmt in statements {
                    self.format_statement(stmt, w)?;
                }
                Ok(())
            }
        }
    }

    fn format_statement(&self, stmt: &Statement, w: &mut impl Write) -> std::fmt::Result {
        match stmt {
            Statement::Record(r) => {
                write!(w, "Record {}", r.name)?;
                if let Some(labels) = &r.labels {
                    write!(w, " {}", format_label_set(labels))?;
                }
                self.format_span(r.span, w)?;
                self.format_expr(&r.expr, 1, w)
            }
            Statement::Alert(a) => {
                write!(w, "Alert {}", a.name)?;
                if !a.for_duration.is_zero() {
                    write!(w, " for {}", format_duration(a.for_duration))?;
                }
                write!(w, " {}", format_label_set(&a.labels))?;
                self.format_span(a.span, w)?;
                writeln!(w, "  Summary {}", quote(&a.summary))?;
                writeln!(w, "  Description {}", quote(&a.description))?;
                self.format_expr(&a.expr, 1, w)
            }
        }
    }

    fn format_expr(&self, expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "{:width$}", "", width = indent * 2)?;

        match expr {
            Expr::NumberLiteral(n) => write!(w, "Number {}", format_number(n.value))?,
            Expr::StringLiteral(s) => write!(w, "String {}", quote(&s.value))?,
            Expr::VectorSelector(v) => {
                write!(w, "VectorSelector {}", format_matchers(&v.matchers))?;
                if !v.offset.is_zero() {
                    write!(w, " offset {}", format_duration(v.offset))?;
                }
            }
            Expr::MatrixSelector(m) => {
                write!(
                    w,
                    "MatrixSelector {}[{}]",
                    format_matchers(&m.matchers),
                    format_duration(m.range)
                )?;
                if !m.offset.is_zero() {
                    write!(w, " offset {}", format_duration(m.offset))?;
                }
            }
            Expr::Unary(u) => write!(w, "Unary {}", u.op.as_str())?,
            Expr::Binary(b) => {
                write!(w, "Binary {}", b.op.as_str())?;
                if let Some(matching) = &b.matching {
                    let (scope, labels) = match &matching.labels {
                        MatchingLabels::On(labels) => ("on", labels),
                        MatchingLabels::Ignoring(labels) => ("ignoring", labels),
                    };
                    write!(w, " {} {scope}({})", matching.card.as_str(), labels.join(", "))?;
                    if matches!(matching.card, Cardinality::ManyToOne | Cardinality::OneToMany) {
                        write!(w, " include({})", matching.include.join(", "))?;
                    }
                }
            }
            Expr::Paren(_) => write!(w, "Paren")?,
            Expr::Call(c) => write!(w, "Call {}", c.function.name)?,
            Expr::Aggregate(a) => {
                write!(w, "Aggregate {}", a.op.as_str())?;
                if !a.grouping.is_empty() {
                    write!(w, " by({})", a.grouping.join(", "))?;
                }
                if a.keep_extra_labels {
                    write!(w, " keeping_extra")?;
                }
            }
        }
        self.format_span(expr.span(), w)?;

        match expr {
            Expr::Unary(u) => self.format_expr(&u.operand, indent + 1, w),
            Expr::Binary(b) => {
                self.format_expr(&b.lhs, indent + 1, w)?;
                self.format_expr(&b.rhs, indent + 1, w)
            }
            Expr::Paren(p) => self.format_expr(&p.inner, indent + 1, w),
            Expr::Call(c) => c
                .args
                .iter()
                .try_for_each(|arg| self.format_expr(arg, indent + 1, w)),
            Expr::Aggregate(a) => {
                if let Some(param) = &a.param {
                    self.format_expr(param, indent + 1, w)?;
                }
                self.format_expr(&a.inner, indent + 1, w)
            }
            _ => Ok(()),
        }
    }

    fn format_span(&self, span: TextRange, w: &mut impl Write) -> std::fmt::Result {
        if self.spans {
            write!(w, " @{}..{}", u32::from(span.start()), u32::from(span.end()))?;
        }
        writeln!(w)
    }
}

fn format_matchers(matchers: &[promql_core::LabelMatcher]) -> String {
    let parts: Vec<String> = matchers.iter().map(ToString::to_string).collect();
    format!("{{{}}}", parts.join(", "))
}
