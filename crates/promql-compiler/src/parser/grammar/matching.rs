//! Vector matching clauses: `on(...)`, `ignoring(...)`, `group_left(...)`, `group_right(...)`.

use crate::Result;
use crate::ast::{Cardinality, MatchingLabels, VectorMatching};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// Parses the clause right after a binary operator, if present.
    ///
    /// Only records what was written. Defaults and the set-operator rules are
    /// applied by the type checker once operand types are known.
    pub(super) fn parse_matching_clause(&mut self) -> Result<Option<VectorMatching>> {
        let labels = match self.current() {
            SyntaxKind::KwOn => {
                self.bump();
                MatchingLabels::On(self.parse_label_list("grouping opts")?)
            }
            SyntaxKind::KwIgnoring => {
                self.bump();
                MatchingLabels::Ignoring(self.parse_label_list("grouping opts")?)
            }
            SyntaxKind::KwGroupLeft | SyntaxKind::KwGroupRight => {
                return Err(self.error_at(
                    DiagnosticKind::GroupWithoutMatching,
                    self.current_span(),
                    &format!("{:?}", self.current_text()),
                ));
            }
            _ => return Ok(None),
        };

        let card = match self.current() {
            SyntaxKind::KwGroupLeft => Cardinality::ManyToOne,
            SyntaxKind::KwGroupRight => Cardinality::OneToMany,
            _ => {
                return Ok(Some(VectorMatching {
                    card: Cardinality::OneToOne,
                    labels,
                    include: Vec::new(),
                }));
            }
        };
        self.bump();
        let include = self.parse_label_list("grouping opts")?;

        Ok(Some(VectorMatching {
            card,
            labels,
            include,
        }))
    }
}
