//! Front end for the time-series query language.
//!
//! Turns query text into a type-checked AST for the evaluation engine:
//! single expressions, rule files (recording and alerting rules), and the
//! series descriptions used to build test fixtures.
//!
//! # Example
//!
//! ```
//! use promql_compiler::{ast::Expr, parse_expr};
//! use promql_core::ValueType;
//!
//! let expr = parse_expr("sum by (job) (rate(http_requests_total[5m]))").unwrap();
//! assert!(matches!(expr, Expr::Aggregate(_)));
//! assert_eq!(expr.value_type(), ValueType::Vector);
//!
//! let err = parse_expr("sum(1)").unwrap_err();
//! eprintln!("{}", err);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod ast;
pub mod diagnostics;
pub mod parser;

#[cfg(test)]
mod test_utils;

use rowan::TextRange;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsPrinter, ErrorClass};
pub use parser::{
    DEFAULT_CHAIN_LIMIT, DEFAULT_RECURSION_LIMIT, LexMode, MAX_SERIES_SAMPLES, ParserConfig,
    parse_expr, parse_series_desc, parse_stmts,
};

/// Errors that can occur while compiling query text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested too deeply). Carries the span of
    /// the token that opened the nesting level over the limit.
    #[error("recursion limit exceeded at {}..{}", u32::from(.0.start()), u32::from(.0.end()))]
    RecursionLimitExceeded(TextRange),

    /// Too many binary operators pending in one expression. Carries the span
    /// of the first operator over the limit.
    #[error("operator chain too long at {}..{}", u32::from(.0.start()), u32::from(.0.end()))]
    OperatorChainTooLong(TextRange),

    #[error("{0}")]
    Lex(Diagnostic),

    #[error("{0}")]
    Syntax(Diagnostic),

    #[error("{0}")]
    Type(Diagnostic),
}

impl Error {
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::RecursionLimitExceeded(_) | Error::OperatorChainTooLong(_) => None,
            Error::Lex(diag) | Error::Syntax(diag) | Error::Type(diag) => Some(diag),
        }
    }

    /// Where in the source the error was detected.
    pub fn span(&self) -> TextRange {
        match self {
            Error::RecursionLimitExceeded(span) | Error::OperatorChainTooLong(span) => *span,
            Error::Lex(diag) | Error::Syntax(diag) | Error::Type(diag) => diag.range(),
        }
    }

    pub fn class(&self) -> Option<ErrorClass> {
        self.diagnostic().map(Diagnostic::class)
    }

    pub fn kind(&self) -> Option<DiagnosticKind> {
        self.diagnostic().map(Diagnostic::kind)
    }
}

impl From<Diagnostic> for Error {
    fn from(diag: Diagnostic) -> Self {
        match diag.class() {
            ErrorClass::Lex => Error::Lex(diag),
            ErrorClass::Syntax => Error::Syntax(diag),
            ErrorClass::Type => Error::Type(diag),
        }
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;
