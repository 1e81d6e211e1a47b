//! Vector matching resolution for binary operations between two vectors.

use rowan::TextRange;

use crate::Result;
use crate::ast::{BinaryOp, Cardinality, VectorMatching};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// Completes the matching for a vector-vector operation.
///
/// Without a clause the operation is one-to-one over all labels except the
/// metric name. Set operators are always many-to-many and take no
/// `group_left`/`group_right`. A label may not be both matched on (or
/// ignored) and included.
pub fn resolve_matching(
    op: BinaryOp,
    clause: Option<VectorMatching>,
    span: TextRange,
) -> Result<VectorMatching> {
    let mut matching = clause.unwrap_or_default();

    if op.is_set_operator() {
        if !matches!(matching.card, Cardinality::OneToOne | Cardinality::ManyToMany) {
            return Err(Diagnostic::report(DiagnosticKind::GroupingOnSetOperator, span)
                .detail(format!("{:?}", op.as_str()))
                .into());
        }
        matching.card = Cardinality::ManyToMany;
    }

    let matched = matching.labels.labels();
    if let Some(label) = matching.include.iter().find(|l| matched.contains(l)) {
        return Err(Diagnostic::report(DiagnosticKind::OverlappingMatchLabels, span)
            .detail(format!("{label:?}"))
            .into());
    }

    Ok(matching)
}
