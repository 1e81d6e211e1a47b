//! Series descriptions for test fixtures.
//!
//! ```text
//! my_metric{a="b"} 1 2 _ 3-10x4 _x2
//! ```
//!
//! `_` omits one sample, `_xN` omits N, and `a+bxN` / `a-bxN` emit `a`
//! followed by N steps of `b`.

use promql_core::{LabelSet, METRIC_NAME_LABEL};

use crate::Result;
use crate::ast::{SeriesDesc, SequenceValue};
use crate::diagnostics::DiagnosticKind;
use crate::parser::{MAX_SERIES_SAMPLES, Parser};
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    pub fn parse_series_root(mut self) -> Result<SeriesDesc> {
        self.skip_whitespace();

        let mut labels = LabelSet::new();
        match self.current() {
            SyntaxKind::Identifier => {
                let token = self.bump();
                labels.insert(METRIC_NAME_LABEL.to_string(), self.text(&token).to_string());
                if self.at(SyntaxKind::BraceOpen) {
                    self.parse_label_set(&mut labels, "series description")?;
                }
            }
            SyntaxKind::BraceOpen => self.parse_label_set(&mut labels, "series description")?,
            _ => return Err(self.unexpected("series description", "metric name or label set")),
        }

        let mut values = Vec::new();
        loop {
            if !self.at_eof() && !self.at(SyntaxKind::Whitespace) {
                return Err(self.unexpected("series values", "whitespace"));
            }
            self.skip_whitespace();
            if self.at_eof() {
                break;
            }
            self.parse_series_item(&mut values)?;
        }

        tracing::trace!(samples = values.len(), "parsed series description");
        self.assert_depth_released();
        Ok(SeriesDesc { labels, values })
    }

    fn skip_whitespace(&mut self) {
        while self.eat(SyntaxKind::Whitespace).is_some() {}
    }

    fn parse_series_item(&mut self, values: &mut Vec<SequenceValue>) -> Result<()> {
        if self.eat(SyntaxKind::Blank).is_some() {
            let count = self.parse_repetition(values.len())?.unwrap_or(1);
            values.extend((0..count).map(|_| SequenceValue::omitted()));
            return Ok(());
        }

        let start = self.parse_signed_number()?;
        values.push(SequenceValue::value(start));

        let sign = match self.current() {
            SyntaxKind::Plus if self.glued() => 1.0,
            SyntaxKind::Minus if self.glued() => -1.0,
            _ => return Ok(()),
        };
        self.bump();

        if !self.at(SyntaxKind::Number) || !self.glued() {
            return Err(self.unexpected("series values", "number"));
        }
        let token = self.bump();
        let step = sign * self.number_value(&token)?;

        let Some(count) = self.parse_repetition(values.len())? else {
            return Err(self.unexpected("series values", "\"x\""));
        };

        let mut current = start;
        for _ in 0..count {
            current += step;
            values.push(SequenceValue::value(current));
        }
        Ok(())
    }

    /// `x<count>` glued to the preceding item. `already` samples have been
    /// expanded so far; the total may not exceed [`MAX_SERIES_SAMPLES`].
    fn parse_repetition(&mut self, already: usize) -> Result<Option<u64>> {
        if self.eat(SyntaxKind::Times).is_none() {
            return Ok(None);
        }
        if !self.at(SyntaxKind::Number) || !self.glued() {
            return Err(self.unexpected("series values", "repetition count"));
        }

        let token = self.bump();
        let text = self.text(&token);
        let count = text
            .parse::<u64>()
            .ok()
            .filter(|&count| {
                (already as u64)
                    .checked_add(count)
                    .is_some_and(|total| total <= MAX_SERIES_SAMPLES)
            })
            .ok_or_else(|| {
                self.error_at(DiagnosticKind::InvalidRepetition, token.span, &format!("{text:?}"))
            })?;
        Ok(Some(count))
    }

    fn parse_signed_number(&mut self) -> Result<f64> {
        let sign = match self.current() {
            SyntaxKind::Plus => 1.0,
            SyntaxKind::Minus => -1.0,
            _ => {
                let token = self.expect(SyntaxKind::Number, "series values", "number")?;
                return self.number_value(&token);
            }
        };
        self.bump();

        if !self.at(SyntaxKind::Number) || !self.glued() {
            return Err(self.unexpected("series values", "number"));
        }
        let token = self.bump();
        Ok(sign * self.number_value(&token)?)
    }
}
