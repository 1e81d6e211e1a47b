//! Token kinds.
//!
//! Logos derives recognition for the raw token kinds. Keyword, aggregator
//! and series-description kinds carry no patterns: the lexer assigns them
//! while post-processing identifiers, because whether `by` is a keyword
//! depends on where it appears.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    #[token("=")]
    Assign,

    #[token("==")]
    EqlEql,

    #[token("!=")]
    Neq,

    #[token("<")]
    Lss,

    #[token("<=")]
    Lte,

    #[token(">")]
    Gtr,

    #[token(">=")]
    Gte,

    #[token("=~")]
    RegexMatch,

    #[token("!~")]
    RegexNoMatch,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    /// Decimal, scientific, hex. `Inf` and `NaN` are re-tagged to this kind.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r"[0-9]+[smhdwy]")]
    Duration,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[regex(r"`[^`]*`")]
    StringLit,

    /// Metric names may contain colons; label names may not (checked by context).
    #[regex(r"[a-zA-Z_:][a-zA-Z0-9_:]*")]
    Identifier,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    KwAnd,
    KwOr,
    KwUnless,
    KwBy,
    KwOn,
    KwIgnoring,
    KwGroupLeft,
    KwGroupRight,
    KwOffset,
    KwKeepingExtra,
    KwAlert,
    KwIf,
    KwFor,
    KwWith,
    KwSummary,
    KwDescription,

    /// `sum`, `avg`, `count_values`, ...; the operator is read from the token text.
    Aggregator,

    /// `_` in a series description.
    Blank,
    /// `x` in a series description, before a repetition count.
    Times,

    Eof,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Comment)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        token_sets::KEYWORDS.contains(self)
    }

    /// How the kind reads inside "unexpected X" messages.
    pub fn describe(self, text: &str) -> String {
        match self {
            Identifier => format!("identifier {text:?}"),
            Number => format!("number {text:?}"),
            Duration => format!("duration {text:?}"),
            StringLit => format!("string {text}"),
            Aggregator => format!("aggregation {text:?}"),
            Whitespace => "whitespace".to_string(),
            Eof => "end of input".to_string(),
            _ => format!("{text:?}"),
        }
    }
}

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..=(Eof as u16) {
            if self.0 & (1 << i) != 0 {
                // SAFETY: `i` is within the discriminant range and SyntaxKind is repr(u16)
                let kind: SyntaxKind = unsafe { std::mem::transmute::<u16, SyntaxKind>(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the lexer and parser.
pub mod token_sets {
    use super::*;

    pub const KEYWORDS: TokenSet = TokenSet::new(&[
        KwAnd,
        KwOr,
        KwUnless,
        KwBy,
        KwOn,
        KwIgnoring,
        KwGroupLeft,
        KwGroupRight,
        KwOffset,
        KwKeepingExtra,
        KwAlert,
        KwIf,
        KwFor,
        KwWith,
        KwSummary,
        KwDescription,
    ]);

    /// Tokens that may start an expression.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        Number, StringLit, Identifier, Aggregator, ParenOpen, BraceOpen, Plus, Minus,
    ]);

    pub const BINARY_OPS: TokenSet = TokenSet::new(&[
        Plus, Minus, Star, Slash, Percent, EqlEql, Neq, Lss, Lte, Gtr, Gte, KwAnd, KwOr, KwUnless,
    ]);

    pub const MATCH_OPS: TokenSet = TokenSet::new(&[Assign, Neq, RegexMatch, RegexNoMatch]);

    /// Everything the lexer lets through between `{` and `}`.
    pub const INSIDE_BRACES: TokenSet = TokenSet::new(&[Identifier, StringLit, Comma, BraceClose])
        .union(MATCH_OPS)
        .union(TokenSet::new(&[Whitespace, Comment]));

    /// Positions that take a label name also accept words the lexer tagged as keywords.
    pub const LABEL_NAME_LIKE: TokenSet =
        TokenSet::new(&[Identifier, Aggregator]).union(KEYWORDS);
}
