//! Abstract syntax tree handed to the evaluator.
//!
//! A closed set of node types, exclusively owned and acyclic. Every node
//! keeps the byte range it was parsed from; spans are for diagnostics only
//! and are skipped when serializing.

mod display;
mod printer;


pub use display::format_number;
pub use printer::AstPrinter;

use std::time::Duration;

use promql_core::duration::format_duration;
use promql_core::{Function, LabelMatcher, LabelSet, ValueType};
use rowan::TextRange;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    NumberLiteral(NumberLiteral),
    StringLiteral(StringLiteral),
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Paren(ParenExpr),
    Call(Call),
    Aggregate(AggregateExpr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub value: f64,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    #[serde(skip)]
    pub span: TextRange,
}

/// Instant selector. `matchers` includes the `__name__` matcher for a bare name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSelector {
    pub name: Option<String>,
    pub matchers: Vec<LabelMatcher>,
    #[serde(serialize_with = "serialize_duration")]
    pub offset: Duration,
    #[serde(skip)]
    pub span: TextRange,
}

/// Range selector: a vector selector with a trailing `[range]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixSelector {
    pub name: Option<String>,
    pub matchers: Vec<LabelMatcher>,
    #[serde(serialize_with = "serialize_duration")]
    pub range: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub offset: Duration,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    /// Present iff both operands are vectors, once checked.
    pub matching: Option<VectorMatching>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    #[serde(serialize_with = "serialize_function_name")]
    pub function: &'static Function,
    pub args: Vec<Expr>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateExpr {
    pub op: AggregateOp,
    pub param: Option<Box<Expr>>,
    pub inner: Box<Expr>,
    pub grouping: Vec<String>,
    pub keep_extra_labels: bool,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eql,
    Neq,
    Gtr,
    Lss,
    Gte,
    Lte,
    And,
    Or,
    Unless,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eql => "==",
            Self::Neq => "!=",
            Self::Gtr => ">",
            Self::Lss => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::And => "and",
            Self::Or => "or",
            Self::Unless => "unless",
        }
    }

    /// Binding strength; higher binds tighter. All operators are left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And | Self::Unless => 2,
            Self::Eql | Self::Neq | Self::Gtr | Self::Lss | Self::Gte | Self::Lte => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div | Self::Mod => 5,
        }
    }

    /// `and`, `or`, `unless`: always many-to-many, vectors only.
    pub fn is_set_operator(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Unless)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eql | Self::Neq | Self::Gtr | Self::Lss | Self::Gte | Self::Lte
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AggregateOp {
    Sum,
    Avg,
    Count,
    Min,
    Max,
    Stddev,
    Stdvar,
    Topk,
    Bottomk,
    Quantile,
    CountValues,
}

impl AggregateOp {
    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name.to_ascii_lowercase().as_str() {
            "sum" => Self::Sum,
            "avg" => Self::Avg,
            "count" => Self::Count,
            "min" => Self::Min,
            "max" => Self::Max,
            "stddev" => Self::Stddev,
            "stdvar" => Self::Stdvar,
            "topk" => Self::Topk,
            "bottomk" => Self::Bottomk,
            "quantile" => Self::Quantile,
            "count_values" => Self::CountValues,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::Stddev => "stddev",
            Self::Stdvar => "stdvar",
            Self::Topk => "topk",
            Self::Bottomk => "bottomk",
            Self::Quantile => "quantile",
            Self::CountValues => "count_values",
        }
    }

    /// Type of the leading parameter, for operators that take one.
    pub fn param_type(self) -> Option<ValueType> {
        match self {
            Self::Topk | Self::Bottomk | Self::Quantile => Some(ValueType::Scalar),
            Self::CountValues => Some(ValueType::String),
            _ => None,
        }
    }
}

/// How series on both sides of a vector-vector operation are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::ManyToOne => "many-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many",
        }
    }
}

/// Labels used to pair series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingLabels {
    /// Match on exactly these labels.
    On(Vec<String>),
    /// Match on all labels except these and the metric name.
    Ignoring(Vec<String>),
}

impl MatchingLabels {
    pub fn labels(&self) -> &[String] {
        match self {
            Self::On(labels) | Self::Ignoring(labels) => labels,
        }
    }
}

impl Default for MatchingLabels {
    fn default() -> Self {
        Self::Ignoring(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorMatching {
    pub card: Cardinality,
    pub labels: MatchingLabels,
    /// Labels copied from the "one" side (`group_left(...)`/`group_right(...)`).
    pub include: Vec<String>,
}

impl Default for VectorMatching {
    fn default() -> Self {
        Self {
            card: Cardinality::OneToOne,
            labels: MatchingLabels::default(),
            include: Vec::new(),
        }
    }
}

impl Expr {
    pub fn span(&self) -> TextRange {
        match self {
            Expr::NumberLiteral(n) => n.span,
            Expr::StringLiteral(s) => s.span,
            Expr::VectorSelector(v) => v.span,
            Expr::MatrixSelector(m) => m.span,
            Expr::Unary(u) => u.span,
            Expr::Binary(b) => b.span,
            Expr::Paren(p) => p.span,
            Expr::Call(c) => c.span,
            Expr::Aggregate(a) => a.span,
        }
    }

    /// Result type. Meaningful for trees that passed the type checker.
    pub fn value_type(&self) -> ValueType {
        match self {
            Expr::NumberLiteral(_) => ValueType::Scalar,
            Expr::StringLiteral(_) => ValueType::String,
            Expr::VectorSelector(_) | Expr::Aggregate(_) => ValueType::Vector,
            Expr::MatrixSelector(_) => ValueType::Matrix,
            Expr::Unary(u) => u.operand.value_type(),
            Expr::Paren(p) => p.inner.value_type(),
            Expr::Call(c) => c.function.return_type,
            Expr::Binary(b) => {
                if b.lhs.value_type() == ValueType::Vector || b.rhs.value_type() == ValueType::Vector {
                    ValueType::Vector
                } else {
                    ValueType::Scalar
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Record(RecordStmt),
    Alert(AlertStmt),
}

/// `name[{labels}] = expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordStmt {
    pub name: String,
    pub labels: Option<LabelSet>,
    pub expr: Expr,
    #[serde(skip)]
    pub span: TextRange,
}

/// `ALERT name IF expr [FOR duration] WITH {labels} SUMMARY "..." DESCRIPTION "..."`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertStmt {
    pub name: String,
    pub expr: Expr,
    #[serde(serialize_with = "serialize_duration")]
    pub for_duration: Duration,
    pub labels: LabelSet,
    pub summary: String,
    pub description: String,
    #[serde(skip)]
    pub span: TextRange,
}

impl Statement {
    pub fn name(&self) -> &str {
        match self {
            Statement::Record(r) => &r.name,
            Statement::Alert(a) => &a.name,
        }
    }

    pub fn expr(&self) -> &Expr {
        match self {
            Statement::Record(r) => &r.expr,
            Statement::Alert(a) => &a.expr,
        }
    }
}

/// A series fixture: its labels and the samples to load, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDesc {
    pub labels: LabelSet,
    pub values: Vec<SequenceValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceValue {
    pub value: f64,
    /// A gap: no sample at this step.
    pub omitted: bool,
}

impl SequenceValue {
    pub fn value(value: f64) -> Self {
        Self {
            value,
            omitted: false,
        }
    }

    pub fn omitted() -> Self {
        Self {
            value: 0.0,
            omitted: true,
        }
    }
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}

fn serialize_function_name<S: Serializer>(
    function: &&'static Function,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(function.name)
}
