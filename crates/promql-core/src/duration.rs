//! Duration literals: `<integer><unit>` with unit in `s m h d w y`.
//!
//! A week is 7 days and a year is 365 days; there is no calendar arithmetic.

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const YEAR: u64 = 365 * DAY;

/// Units from largest to smallest, used when rendering.
const UNITS: [(char, u64); 6] = [
    ('y', YEAR),
    ('w', WEEK),
    ('d', DAY),
    ('h', HOUR),
    ('m', MINUTE),
    ('s', 1),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("missing unit character in duration")]
    MissingUnit,

    #[error("invalid unit {0:?} in duration")]
    InvalidUnit(char),

    #[error("bad duration syntax: {0:?}")]
    Malformed(String),

    #[error("duration out of range")]
    OutOfRange,
}

fn unit_seconds(unit: char) -> Option<u64> {
    UNITS
        .iter()
        .find_map(|&(c, secs)| (c == unit).then_some(secs))
}

/// Parses `5m`, `1h`, `2w`. Zero is accepted here; callers that need a
/// positive range check for it themselves.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(digits_end);

    if digits.is_empty() {
        return Err(DurationError::Malformed(text.to_string()));
    }

    let mut unit_chars = unit.chars();
    let Some(unit) = unit_chars.next() else {
        return Err(DurationError::MissingUnit);
    };
    if unit_chars.next().is_some() {
        return Err(DurationError::Malformed(text.to_string()));
    }
    let multiplier = unit_seconds(unit).ok_or(DurationError::InvalidUnit(unit))?;

    let count: u64 = digits.parse().map_err(|_| DurationError::OutOfRange)?;
    let secs = count
        .checked_mul(multiplier)
        .ok_or(DurationError::OutOfRange)?;
    Ok(Duration::from_secs(secs))
}

/// Renders with the largest unit that divides the duration evenly: `300s` → `5m`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        return "0s".to_string();
    }
    for (unit, size) in UNITS {
        if secs % size == 0 {
            return format!("{}{unit}", secs / size);
        }
    }
    unreachable!("every duration is a whole number of seconds")
}
