//! Lexer for the query language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! Logos does the raw recognition. A post-processing pass then applies
//! everything that depends on context:
//! - identifiers outside braces become keywords (case-insensitively), `Inf`/`NaN` become numbers
//! - inside `{...}` only label names, strings, matcher operators and commas are allowed
//! - a number or duration glued to another word (`5mm`, `0deadbeef`) is rejected
//! - delimiters must balance
//! - in series-description mode whitespace outside braces is kept and `_`, `x<count>` are split out
//!
//! Lexing is eager and stops at the first error.

use logos::Logos;
use phf::phf_map;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::syntax_kind::{SyntaxKind, token_sets::INSIDE_BRACES};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Which grammar the token stream feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    Normal,
    /// Whitespace is significant and there are no keywords.
    SeriesDescription,
}

static KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "and" => SyntaxKind::KwAnd,
    "or" => SyntaxKind::KwOr,
    "unless" => SyntaxKind::KwUnless,
    "by" => SyntaxKind::KwBy,
    "on" => SyntaxKind::KwOn,
    "ignoring" => SyntaxKind::KwIgnoring,
    "group_left" => SyntaxKind::KwGroupLeft,
    "group_right" => SyntaxKind::KwGroupRight,
    "offset" => SyntaxKind::KwOffset,
    "keeping_extra" => SyntaxKind::KwKeepingExtra,
    "alert" => SyntaxKind::KwAlert,
    "if" => SyntaxKind::KwIf,
    "for" => SyntaxKind::KwFor,
    "with" => SyntaxKind::KwWith,
    "summary" => SyntaxKind::KwSummary,
    "description" => SyntaxKind::KwDescription,

    "sum" => SyntaxKind::Aggregator,
    "avg" => SyntaxKind::Aggregator,
    "count" => SyntaxKind::Aggregator,
    "min" => SyntaxKind::Aggregator,
    "max" => SyntaxKind::Aggregator,
    "stddev" => SyntaxKind::Aggregator,
    "stdvar" => SyntaxKind::Aggregator,
    "topk" => SyntaxKind::Aggregator,
    "bottomk" => SyntaxKind::Aggregator,
    "quantile" => SyntaxKind::Aggregator,
    "count_values" => SyntaxKind::Aggregator,

    "inf" => SyntaxKind::Number,
    "nan" => SyntaxKind::Number,
};

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Paren,
    Bracket,
}

struct Lexer<'src> {
    source: &'src str,
    mode: LexMode,
    tokens: Vec<Token>,
    open: Vec<(Delimiter, TextRange)>,
    brace: Option<TextRange>,
}

/// Tokenizes source into a vector of span-based tokens ending in `Eof`.
///
/// Trivia is dropped, except whitespace in series-description mode.
pub fn lex(source: &str, mode: LexMode) -> Result<Vec<Token>, Diagnostic> {
    let mut state = Lexer {
        source,
        mode,
        tokens: Vec::new(),
        open: Vec::new(),
        brace: None,
    };
    let mut lexer = SyntaxKind::lexer(source);

    while let Some(next) = lexer.next() {
        let span = lexer.span();
        match next {
            Ok(kind) => state.push(kind, span)?,
            Err(()) => return Err(state.unexpected_char(span.start)),
        }
    }

    state.finish()
}

impl Lexer<'_> {
    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) -> Result<(), Diagnostic> {
        use SyntaxKind::*;

        if self.brace.is_some() && !INSIDE_BRACES.contains(kind) {
            return Err(self.unexpected_char(span.start));
        }

        match kind {
            Comment => return Ok(()),
            Whitespace => {
                if self.mode == LexMode::SeriesDescription && self.brace.is_none() {
                    self.emit(Whitespace, span)?;
                }
                return Ok(());
            }
            Identifier => return self.push_identifier(span),
            BraceOpen => self.brace = Some(range_to_text_range(span.clone())),
            BraceClose => {
                if self.brace.take().is_none() {
                    return Err(self.unmatched(span, "right brace"));
                }
            }
            ParenOpen => self
                .open
                .push((Delimiter::Paren, range_to_text_range(span.clone()))),
            BracketOpen => self
                .open
                .push((Delimiter::Bracket, range_to_text_range(span.clone()))),
            ParenClose => self.close(Delimiter::Paren, &span)?,
            BracketClose => self.close(Delimiter::Bracket, &span)?,
            _ => {}
        }

        self.emit(kind, span)
    }

    fn push_identifier(&mut self, span: Range<usize>) -> Result<(), Diagnostic> {
        use SyntaxKind::*;

        let text = &self.source[span.clone()];

        if self.brace.is_some() {
            if let Some(colon) = text.find(':') {
                return Err(self.unexpected_char(span.start + colon));
            }
            return self.emit(Identifier, span);
        }

        if self.mode == LexMode::SeriesDescription {
            return self.push_series_identifier(span);
        }

        let lowered = text.to_ascii_lowercase();
        let kind = KEYWORDS.get(lowered.as_str()).copied().unwrap_or(Identifier);
        self.emit(kind, span)
    }

    /// `_` → blank, `_x3` → blank times 3, `x3` right after a value → times 3.
    fn push_series_identifier(&mut self, span: Range<usize>) -> Result<(), Diagnostic> {
        use SyntaxKind::*;

        let text = &self.source[span.clone()];
        let start = span.start;

        if text == "_" {
            return self.emit(Blank, span);
        }

        if let Some(count) = text.strip_prefix("_x")
            && is_digits(count)
        {
            self.emit(Blank, start..start + 1)?;
            self.emit(Times, start + 1..start + 2)?;
            return self.emit(Number, start + 2..span.end);
        }

        if let Some(count) = text.strip_prefix('x')
            && is_digits(count)
            && self.glued_to_previous(start)
        {
            // Split before emitting so the adjacency check does not fire.
            self.tokens
                .push(Token::new(Times, range_to_text_range(start..start + 1)));
            self.tokens
                .push(Token::new(Number, range_to_text_range(start + 1..span.end)));
            return Ok(());
        }

        let kind = match text.to_ascii_lowercase().as_str() {
            "inf" | "nan" => Number,
            _ => Identifier,
        };
        self.emit(kind, span)
    }

    fn emit(&mut self, kind: SyntaxKind, span: Range<usize>) -> Result<(), Diagnostic> {
        if starts_word(kind, &self.source[span.clone()])
            && let Some(prev) = self.tokens.last()
            && matches!(prev.kind, SyntaxKind::Number | SyntaxKind::Duration)
            && prev.span.end() == TextSize::from(span.start as u32)
        {
            let range = TextRange::new(prev.span.start(), TextSize::from(span.end as u32));
            let text = &self.source[Range::<usize>::from(range)];
            return Err(
                Diagnostic::report(DiagnosticKind::BadNumberOrDuration, range)
                    .detail(format!("{text:?}")),
            );
        }

        self.tokens.push(Token::new(kind, range_to_text_range(span)));
        Ok(())
    }

    fn glued_to_previous(&self, start: usize) -> bool {
        self.tokens
            .last()
            .is_some_and(|prev| prev.span.end() == TextSize::from(start as u32))
    }

    fn close(&mut self, delimiter: Delimiter, span: &Range<usize>) -> Result<(), Diagnostic> {
        match self.open.pop() {
            Some((open, _)) if open == delimiter => Ok(()),
            _ => Err(self.unmatched(
                span.clone(),
                match delimiter {
                    Delimiter::Paren => "right parenthesis",
                    Delimiter::Bracket => "right bracket",
                },
            )),
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, Diagnostic> {
        let end = TextSize::from(self.source.len() as u32);

        if self.brace.is_some() {
            return Err(Diagnostic::report(
                DiagnosticKind::UnclosedBrace,
                TextRange::empty(end),
            ));
        }

        if let Some((delimiter, range)) = self.open.pop() {
            let kind = match delimiter {
                Delimiter::Paren => DiagnosticKind::UnclosedParen,
                Delimiter::Bracket => DiagnosticKind::UnclosedBracket,
            };
            return Err(Diagnostic::report(kind, range));
        }

        self.tokens
            .push(Token::new(SyntaxKind::Eof, TextRange::empty(end)));
        Ok(self.tokens)
    }

    fn unexpected_char(&self, offset: usize) -> Diagnostic {
        let c = self.source[offset..].chars().next().unwrap_or(' ');
        let end = TextSize::from((offset + c.len_utf8()) as u32);
        let start = TextSize::from(offset as u32);

        if matches!(c, '"' | '\'' | '`') {
            let range = TextRange::new(start, TextSize::from(self.source.len() as u32));
            return Diagnostic::report(DiagnosticKind::UnterminatedString, range);
        }

        let kind = if self.brace.is_some() {
            DiagnosticKind::UnexpectedCharacterInBraces
        } else {
            DiagnosticKind::UnexpectedCharacter
        };
        Diagnostic::report(kind, TextRange::new(start, end)).detail(format!("{c:?}"))
    }

    fn unmatched(&self, span: Range<usize>, what: &str) -> Diagnostic {
        Diagnostic::report(DiagnosticKind::UnmatchedCloser, range_to_text_range(span)).detail(what)
    }
}

/// Token kinds that continue a word when glued to a preceding number.
fn starts_word(kind: SyntaxKind, text: &str) -> bool {
    use SyntaxKind::*;
    match kind {
        Number | Duration | Identifier | Aggregator | Blank | Times => true,
        k if k.is_keyword() => true,
        _ => text.starts_with(|c: char| c.is_ascii_alphanumeric()),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
