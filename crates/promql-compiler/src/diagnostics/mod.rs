//! Structured rejections.
//!
//! The front end stops at the first problem it finds, so a failed parse
//! carries exactly one [`Diagnostic`]: its [`DiagnosticKind`], the byte range
//! it points at, and the rendered message.

mod message;
mod printer;


pub use message::{Diagnostic, DiagnosticKind, ErrorClass};
pub use printer::DiagnosticsPrinter;
