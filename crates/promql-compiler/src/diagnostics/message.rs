use rowan::TextRange;

/// Phase that rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Lex,
    Syntax,
    Type,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorClass::Lex => write!(f, "lex"),
            ErrorClass::Syntax => write!(f, "syntax"),
            ErrorClass::Type => write!(f, "type"),
        }
    }
}

/// Every way the front end can reject an input, grouped by phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    // Tokenization
    UnexpectedCharacter,
    UnexpectedCharacterInBraces,
    UnterminatedString,
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,
    UnmatchedCloser,
    BadNumberOrDuration,
    InvalidEscape,

    // Grammar
    NoExpression,
    NoValidExpression,
    MissingRhs,
    UnexpectedToken,
    TrailingInput,
    NumberOutOfRange,
    MissingDurationUnit,
    DurationOutOfRange,
    ZeroRange,
    UnknownFunction,
    EmptySelector,
    InvalidLabelName,
    DuplicateLabel,
    NonEqualityLabel,
    GroupWithoutMatching,
    EmptyAlertText,
    InvalidRepetition,

    // Semantics and types
    DuplicateMetricName,
    InvalidRegex,
    UnaryOperandType,
    BinaryOperandType,
    MatchingBetweenNonVectors,
    SetOperatorOnScalar,
    GroupingOnSetOperator,
    OverlappingMatchLabels,
    ArgumentCount,
    ArgumentType,
    AggregateOperandType,
    AggregateParameterType,
    StatementType,
    MissingStatementClause,
}

impl DiagnosticKind {
    pub fn class(&self) -> ErrorClass {
        use DiagnosticKind::*;
        match self {
            UnexpectedCharacter
            | UnexpectedCharacterInBraces
            | UnterminatedString
            | UnclosedParen
            | UnclosedBracket
            | UnclosedBrace
            | UnmatchedCloser
            | BadNumberOrDuration
            | InvalidEscape => ErrorClass::Lex,

            NoExpression | NoValidExpression | MissingRhs | UnexpectedToken | TrailingInput
            | NumberOutOfRange | MissingDurationUnit | DurationOutOfRange | ZeroRange
            | UnknownFunction | EmptySelector | InvalidLabelName | DuplicateLabel
            | NonEqualityLabel | GroupWithoutMatching | EmptyAlertText | InvalidRepetition => {
                ErrorClass::Syntax
            }

            DuplicateMetricName
            | InvalidRegex
            | UnaryOperandType
            | BinaryOperandType
            | MatchingBetweenNonVectors
            | SetOperatorOnScalar
            | GroupingOnSetOperator
            | OverlappingMatchLabels
            | ArgumentCount
            | ArgumentType
            | AggregateOperandType
            | AggregateParameterType
            | StatementType
            | MissingStatementClause => ErrorClass::Type,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnexpectedCharacterInBraces => "unexpected character inside braces",
            Self::UnterminatedString => "unterminated quoted string",
            Self::UnclosedParen => "unclosed left parenthesis",
            Self::UnclosedBracket => "unclosed left bracket",
            Self::UnclosedBrace => "unexpected end of input inside braces",
            Self::UnmatchedCloser => "unexpected closing delimiter",
            Self::BadNumberOrDuration => "bad number or duration syntax",
            Self::InvalidEscape => "invalid escape sequence",

            Self::NoExpression => "no expression found in input",
            Self::NoValidExpression => "no valid expression found",
            Self::MissingRhs => "missing right-hand side in binary expression",
            Self::UnexpectedToken => "unexpected token",
            Self::TrailingInput => "could not parse remaining input",
            Self::NumberOutOfRange => "number out of range",
            Self::MissingDurationUnit => "missing unit character in duration",
            Self::DurationOutOfRange => "duration out of range",
            Self::ZeroRange => "duration must be greater than 0",
            Self::UnknownFunction => "unknown function",
            Self::EmptySelector => "vector selector must contain label matchers or metric name",
            Self::InvalidLabelName => "invalid label name",
            Self::DuplicateLabel => "label name set twice",
            Self::NonEqualityLabel => "only \"=\" is allowed in label sets",
            Self::GroupWithoutMatching => "grouping modifier must follow on(...) or ignoring(...)",
            Self::EmptyAlertText => "alert text must not be empty",
            Self::InvalidRepetition => "invalid repetition count in series values",

            Self::DuplicateMetricName => "metric name must not be set twice",
            Self::InvalidRegex => "invalid regular expression",
            Self::UnaryOperandType => {
                "unary expression only allowed on expressions of type scalar or vector"
            }
            Self::BinaryOperandType => "binary expression must contain only scalar and vector types",
            Self::MatchingBetweenNonVectors => "vector matching only allowed between vectors",
            Self::SetOperatorOnScalar => "set operators not allowed in binary scalar expression",
            Self::GroupingOnSetOperator => "no grouping allowed for set operations",
            Self::OverlappingMatchLabels => "label must not occur in matching and include clause at once",
            Self::ArgumentCount => "wrong number of arguments in function call",
            Self::ArgumentType => "wrong argument type in function call",
            Self::AggregateOperandType => "expected type vector in aggregation expression",
            Self::AggregateParameterType => "wrong parameter type in aggregation expression",
            Self::StatementType => "statement must have a valid expression of vector type",
            Self::MissingStatementClause => "missing mandatory statement clause",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnexpectedToken => "unexpected {}".to_string(),
            Self::TrailingInput => "could not parse remaining input {}".to_string(),
            Self::UnmatchedCloser => "unexpected {}".to_string(),
            Self::NumberOutOfRange => "number {} out of range".to_string(),
            Self::DurationOutOfRange => "duration {} out of range".to_string(),
            Self::UnknownFunction => "unknown function with name {}".to_string(),
            Self::InvalidLabelName => "invalid label name {}".to_string(),
            Self::DuplicateLabel => "label name {} set twice".to_string(),
            Self::GroupWithoutMatching => "{} must follow on(...) or ignoring(...)".to_string(),
            Self::EmptyAlertText => "alert {} must not be empty".to_string(),
            Self::InvalidRepetition => "invalid repetition count {} in series values".to_string(),

            Self::DuplicateMetricName => "metric name must not be set twice: {}".to_string(),
            Self::UnaryOperandType => format!("{}, got {{}}", self.fallback_message()),
            Self::SetOperatorOnScalar => "{} not allowed in binary scalar expression".to_string(),
            Self::GroupingOnSetOperator => "no grouping allowed for {} operation".to_string(),
            Self::OverlappingMatchLabels => {
                "label {} must not occur in ON/IGNORING and INCLUDE clause at once".to_string()
            }
            Self::AggregateOperandType => format!("{}, got {{}}", self.fallback_message()),
            Self::StatementType => "{} statement must have a valid expression of vector type".to_string(),
            Self::MissingStatementClause => "alert statement must have a {} clause".to_string(),

            // Callers pass the complete sentence
            Self::InvalidRegex
            | Self::ArgumentCount
            | Self::ArgumentType
            | Self::AggregateParameterType => "{}".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

/// A single rejection: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl Diagnostic {
    /// Uses the kind's fallback message. Call `.detail()` to fill its template instead.
    pub fn report(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn detail(mut self, detail: impl AsRef<str>) -> Self {
        self.message = self.kind.message(Some(detail.as_ref()));
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} error at {}..{}: {}",
            self.class(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}
