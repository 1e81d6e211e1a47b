//! Canonical query text. Parsing the output yields an equivalent tree.

use std::fmt;
use std::time::Duration;

use promql_core::duration::format_duration;
use promql_core::labels::{format_label_set, quote};
use promql_core::{LabelMatcher, METRIC_NAME_LABEL, MatchType};

use super::{
    AggregateExpr, AlertStmt, Cardinality, Expr, MatchingLabels, RecordStmt, Statement,
    VectorMatching,
};

/// `NaN`, `+Inf`, `-Inf`, otherwise the shortest decimal form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { '+' } else { '-' };
        format!("{sign}Inf")
    } else {
        value.to_string()
    }
}

/// Matchers as written by the user: the `__name__` matcher implied by a bare name is hidden.
pub(super) fn explicit_matchers<'a>(
    name: Option<&'a str>,
    matchers: &'a [LabelMatcher],
) -> impl Iterator<Item = &'a LabelMatcher> {
    matchers.iter().filter(move |m| {
        !(m.match_type() == MatchType::Equal
            && m.name() == METRIC_NAME_LABEL
            && Some(m.value()) == name)
    })
}

fn write_selector(f: &mut fmt::Formatter<'_>, name: Option<&str>, matchers: &[LabelMatcher]) -> fmt::Result {
    let explicit: Vec<String> = explicit_matchers(name, matchers)
        .map(ToString::to_string)
        .collect();
    if let Some(name) = name {
        f.write_str(name)?;
        if explicit.is_empty() {
            return Ok(());
        }
    }
    write!(f, "{{{}}}", explicit.join(", "))
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: Duration) -> fmt::Result {
    if offset.is_zero() {
        return Ok(());
    }
    write!(f, " offset {}", format_duration(offset))
}

fn write_matching(f: &mut fmt::Formatter<'_>, matching: &VectorMatching) -> fmt::Result {
    match &matching.labels {
        MatchingLabels::On(labels) => write!(f, " on({})", labels.join(", "))?,
        MatchingLabels::Ignoring(labels) if !labels.is_empty() => {
            write!(f, " ignoring({})", labels.join(", "))?
        }
        MatchingLabels::Ignoring(_) => {}
    }
    match matching.card {
        Cardinality::ManyToOne => write!(f, " group_left({})", matching.include.join(", ")),
        Cardinality::OneToMany => write!(f, " group_right({})", matching.include.join(", ")),
        Cardinality::OneToOne | Cardinality::ManyToMany => Ok(()),
    }
}

fn write_aggregate(f: &mut fmt::Formatter<'_>, agg: &AggregateExpr) -> fmt::Result {
    f.write_str(agg.op.as_str())?;
    if !agg.grouping.is_empty() {
        write!(f, " by ({})", agg.grouping.join(", "))?;
    }
    if agg.keep_extra_labels {
        f.write_str(" keeping_extra")?;
    }
    if !agg.grouping.is_empty() || agg.keep_extra_labels {
        f.write_str(" ")?;
    }
    f.write_str("(")?;
    if let Some(param) = &agg.param {
        write!(f, "{param}, ")?;
    }
    write!(f, "{})", agg.inner)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLiteral(n) => f.write_str(&format_number(n.value)),
            Expr::StringLiteral(s) => f.write_str(&quote(&s.value)),
            Expr::VectorSelector(v) => {
                write_selector(f, v.name.as_deref(), &v.matchers)?;
                write_offset(f, v.offset)
            }
            Expr::MatrixSelector(m) => {
                write_selector(f, m.name.as_deref(), &m.matchers)?;
                write!(f, "[{}]", format_duration(m.range))?;
                write_offset(f, m.offset)
            }
            Expr::Unary(u) => write!(f, "{}{}", u.op.as_str(), u.operand),
            Expr::Binary(b) => {
                write!(f, "{} {}", b.lhs, b.op.as_str())?;
                if let Some(matching) = &b.matching {
                    write_matching(f, matching)?;
                }
                write!(f, " {}", b.rhs)
            }
            Expr::Paren(p) => write!(f, "({})", p.inner),
            Expr::Call(c) => {
                let args: Vec<String> = c.args.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", c.function.name, args.join(", "))
            }
            Expr::Aggregate(a) => write_aggregate(f, a),
        }
    }
}

impl fmt::Display for RecordStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(labels) = &self.labels {
            f.write_str(&format_label_set(labels))?;
        }
        write!(f, " = {}", self.expr)
    }
}

impl fmt::Display for AlertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ALERT {}", self.name)?;
        writeln!(f, "  IF {}", self.expr)?;
        if !self.for_duration.is_zero() {
            writeln!(f, "  FOR {}", format_duration(self.for_duration))?;
        }
        writeln!(f, "  WITH {}", format_label_set(&self.labels))?;
        writeln!(f, "  SUMMARY {}", quote(&self.summary))?;
        write!(f, "  DESCRIPTION {}", quote(&self.description))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Record(r) => r.fmt(f),
            Statement::Alert(a) => a.fmt(f),
        }
    }
}
