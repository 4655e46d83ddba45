//! Error types and error reporting for the front end.
//!
//! Every phase stops at its first problem and reports it as a single
//! [`errors::Error`]: an [`errors::ErrorImpl`] variant plus the location of
//! the offending token. Variants are grouped into lexical, syntax, scope and
//! type categories.

pub mod errors;
