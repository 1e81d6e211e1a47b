//! Semantic analysis passes.
//!
//! Run after parsing, on a complete tree:
//! - Type checking: assigns a value type bottom-up and rejects ill-typed trees (type_check)
//! - Vector matching resolution: fills in the join between two vector operands (matching)

pub mod matching;
pub mod type_check;


pub use matching::resolve_matching;
pub use type_check::{check_expr, check_statement};
