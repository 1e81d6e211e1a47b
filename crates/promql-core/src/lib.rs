#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared data model for the query language.
//!
//! Everything here is consumed by both the compiler front end and the
//! evaluation engine:
//! - [`ValueType`]: the four result types an expression can have
//! - [`labels`]: label names, label sets and name validation
//! - [`LabelMatcher`]: a single `name OP "value"` constraint with its compiled regex
//! - [`functions`]: the static function registry used by the type checker
//! - [`duration`]: duration literals (`5m`, `1w`, ...) and their canonical rendering
//! - [`storage`]: the append boundary the evaluator writes samples through

pub mod duration;
pub mod functions;
pub mod labels;
pub mod matcher;
pub mod storage;

mod value_type;


pub use functions::Function;
pub use labels::{LabelSet, METRIC_NAME_LABEL};
pub use matcher::{LabelMatcher, MatchType, MatcherError};
pub use value_type::ValueType;
