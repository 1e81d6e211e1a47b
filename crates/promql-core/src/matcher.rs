//! Label matchers: the `name OP "value"` constraints inside a selector.

use regex_automata::meta::Regex;
use serde::Serialize;

use crate::labels::quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchType {
    Equal,
    NotEqual,
    RegexMatch,
    RegexNoMatch,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::RegexMatch => "=~",
            Self::RegexNoMatch => "!~",
        }
    }

    #[inline]
    pub fn is_regex(self) -> bool {
        matches!(self, Self::RegexMatch | Self::RegexNoMatch)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MatcherError {
    #[error("invalid regular expression {pattern:?}: {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// A single label constraint.
///
/// Regex matchers carry their compiled, fully anchored pattern: `foo=~"a|b"`
/// matches exactly `a` or `b`, never `xa`.
#[derive(Debug, Clone, Serialize)]
pub struct LabelMatcher {
    match_type: MatchType,
    name: String,
    value: String,
    #[serde(skip)]
    regex: Option<Regex>,
}

impl LabelMatcher {
    pub fn new(
        match_type: MatchType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, MatcherError> {
        let value = value.into();
        let regex = if match_type.is_regex() {
            let anchored = format!("^(?:{value})$");
            let compiled = Regex::new(&anchored).map_err(|err| MatcherError::InvalidRegex {
                pattern: value.clone(),
                reason: err.to_string(),
            })?;
            Some(compiled)
        } else {
            None
        };

        Ok(Self {
            match_type,
            name: name.into(),
            value,
            regex,
        })
    }

    /// Equality matcher; never fails.
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::Equal,
            name: name.into(),
            value: value.into(),
            regex: None,
        }
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Tests a label value. A missing label is matched as the empty string.
    pub fn matches(&self, value: &str) -> bool {
        match (self.match_type, &self.regex) {
            (MatchType::Equal, _) => self.value == value,
            (MatchType::NotEqual, _) => self.value != value,
            (MatchType::RegexMatch, Some(re)) => re.is_match(value),
            (MatchType::RegexNoMatch, Some(re)) => !re.is_match(value),
            (_, None) => unreachable!("regex matcher built without a compiled pattern"),
        }
    }
}

impl PartialEq for LabelMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.match_type == other.match_type && self.name == other.name && self.value == other.value
    }
}

impl Eq for LabelMatcher {}

impl std::fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, self.match_type, quote(&self.value))
    }
}
