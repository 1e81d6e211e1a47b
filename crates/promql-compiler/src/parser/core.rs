//! Parser state machine and low-level operations.

use rowan::{TextRange, TextSize};

use super::lexer::{Token, token_text};
use super::ParserConfig;
use super::syntax_kind::{SyntaxKind, TokenSet};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::{Error, Result};

/// Cursor over a lexed token stream. The stream always ends in `Eof`.
///
/// Single use: the grammar entry points consume the parser.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pub(super) depth: u32,
    recursion_limit: u32,
    pub(super) chain: u32,
    chain_limit: u32,
    pub(super) debug_fuel: std::cell::Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>, config: &ParserConfig) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == SyntaxKind::Eof),
            "token stream must end in Eof"
        );
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            recursion_limit: config.recursion_limit(),
            chain: 0,
            chain_limit: config.chain_limit(),
            debug_fuel: std::cell::Cell::new(256),
        }
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn current_token(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.current_token().span
    }

    pub(super) fn current_text(&self) -> &'src str {
        token_text(self.source, &self.current_token())
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::Eof)
    }

    /// Whether the current token starts right where the previous one ended.
    pub(super) fn glued(&self) -> bool {
        self.pos > 0 && self.tokens[self.pos - 1].span.end() == self.current_span().start()
    }

    pub(super) fn bump(&mut self) -> Token {
        assert!(!self.at_eof(), "bump called at EOF");
        self.reset_debug_fuel();
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.at(kind).then(|| self.bump())
    }

    /// Consumes `kind` or fails with "unexpected X in {context}, expected {expected}".
    pub(super) fn expect(&mut self, kind: SyntaxKind, context: &str, expected: &str) -> Result<Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(context, expected)),
        }
    }

    /// End offset of the last consumed token.
    pub(super) fn prev_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .map_or(TextSize::from(0), |i| self.tokens[i].span.end())
    }

    pub(super) fn span_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    pub(super) fn describe_current(&self) -> String {
        self.current().describe(self.current_text())
    }

    pub(super) fn unexpected(&self, context: &str, expected: &str) -> Error {
        let mut detail = format!("{} in {context}", self.describe_current());
        if !expected.is_empty() {
            detail.push_str(", expected ");
            detail.push_str(expected);
        }
        self.error_at(DiagnosticKind::UnexpectedToken, self.current_span(), &detail)
    }

    pub(super) fn error_at(&self, kind: DiagnosticKind, range: TextRange, detail: &str) -> Error {
        Diagnostic::report(kind, range).detail(detail).into()
    }

    /// `at` is the token opening the new nesting level.
    pub(super) fn enter_recursion(&mut self, at: TextRange) -> Result<()> {
        if self.depth >= self.recursion_limit {
            return Err(Error::RecursionLimitExceeded(at));
        }
        self.depth += 1;
        self.reset_debug_fuel();
        Ok(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Counts one more pending binary operator. Flat chains don't nest the
    /// parser, but the tree they build is as deep as the chain is long.
    pub(super) fn enter_chain(&mut self, operator: TextRange) -> Result<()> {
        if self.chain >= self.chain_limit {
            return Err(Error::OperatorChainTooLong(operator));
        }
        self.chain += 1;
        Ok(())
    }

    pub(super) fn exit_chain(&mut self, operators: u32) {
        self.chain = self.chain.saturating_sub(operators);
    }
}
