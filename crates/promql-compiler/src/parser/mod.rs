//! Parser infrastructure for the query language.
//!
//! # Architecture
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when building nodes
//! - Hand-written recursive descent with precedence climbing for binary operators
//! - Fail fast: the first problem aborts the parse with a single diagnostic
//! - Recursion is fuelled: nesting counts against a configurable limit, and
//!   running out returns [`Error::RecursionLimitExceeded`]. Flat operator
//!   chains have their own, much larger limit ([`Error::OperatorChainTooLong`])
//!
//! Three inputs share one lexer and parser core: single expressions, rule
//! files, and series descriptions (which lex in [`LexMode::SeriesDescription`]).
//!
//! [`Error::RecursionLimitExceeded`]: crate::Error::RecursionLimitExceeded
//! [`Error::OperatorChainTooLong`]: crate::Error::OperatorChainTooLong

pub mod lexer;
pub mod syntax_kind;

mod atoms;
mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

pub use core::Parser;
pub use lexer::{LexMode, Token, lex, token_text};
pub use syntax_kind::{SyntaxKind, TokenSet};

use crate::Result;
use crate::analyze::{check_expr, check_statement};
use crate::ast::{Expr, SeriesDesc, Statement};

/// Default nesting budget. Each paren, call, aggregation and unary operator
/// spends one unit while its operands are parsed.
pub const DEFAULT_RECURSION_LIMIT: u32 = 128;

/// Default number of binary operators that may be pending at once, which bounds
/// the depth of the tree a flat chain such as `a + b + c` builds.
pub const DEFAULT_CHAIN_LIMIT: u32 = 4096;

/// Most samples a single series description may expand to, counting
/// omitted ones.
pub const MAX_SERIES_SAMPLES: u64 = 1 << 20;

/// Parse settings. The defaults suit interactive queries and rule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    recursion_limit: u32,
    chain_limit: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            chain_limit: DEFAULT_CHAIN_LIMIT,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }

    pub fn with_chain_limit(mut self, limit: u32) -> Self {
        self.chain_limit = limit;
        self
    }

    pub fn chain_limit(&self) -> u32 {
        self.chain_limit
    }

    fn parser<'src>(&self, source: &'src str, mode: LexMode) -> Result<Parser<'src>> {
        let tokens = lex(source, mode)?;
        tracing::trace!(tokens = tokens.len(), ?mode, "lexed input");
        Ok(Parser::new(source, tokens, self))
    }

    /// Parses and type-checks a single expression.
    pub fn parse_expr(&self, source: &str) -> Result<Expr> {
        let result = self
            .parser(source, LexMode::Normal)
            .and_then(Parser::parse_expr_root)
            .and_then(|mut expr| {
                check_expr(&mut expr)?;
                Ok(expr)
            });

        match &result {
            Ok(expr) => tracing::debug!(value_type = %expr.value_type(), "parsed expression"),
            Err(err) => tracing::debug!(error = %err, "rejected expression"),
        }
        result
    }

    /// Parses and type-checks a rule file. Empty or comment-only input yields no statements.
    pub fn parse_stmts(&self, source: &str) -> Result<Vec<Statement>> {
        let result = self
            .parser(source, LexMode::Normal)
            .and_then(Parser::parse_statements)
            .and_then(|mut statements| {
                for stmt in &mut statements {
                    check_statement(stmt)?;
                }
                Ok(statements)
            });

        match &result {
            Ok(statements) => tracing::debug!(statements = statements.len(), "parsed rules"),
            Err(err) => tracing::debug!(error = %err, "rejected rules"),
        }
        result
    }

    /// Parses a series description such as `up{job="api"} 1 2 _ 4+1x3`.
    pub fn parse_series_desc(&self, source: &str) -> Result<SeriesDesc> {
        let result = self
            .parser(source, LexMode::SeriesDescription)
            .and_then(Parser::parse_series_root);

        if let Err(err) = &result {
            tracing::debug!(error = %err, "rejected series description");
        }
        result
    }
}

/// Parses and type-checks a single expression with default settings.
pub fn parse_expr(source: &str) -> Result<Expr> {
    ParserConfig::default().parse_expr(source)
}

/// Parses and type-checks a rule file with default settings.
pub fn parse_stmts(source: &str) -> Result<Vec<Statement>> {
    ParserConfig::default().parse_stmts(source)
}

/// Parses a series description with default settings.
pub fn parse_series_desc(source: &str) -> Result<SeriesDesc> {
    ParserConfig::default().parse_series_desc(source)
}
