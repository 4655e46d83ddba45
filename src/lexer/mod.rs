//! Lexical analysis.
//!
//! Converts source text into a [`sequence::TokenSequence`]. It handles:
//!
//! - Keywords, identifiers, numeric, string, bool and `()` literals
//! - `(* ... *)` comments and `\` + newline line continuations
//! - Newline tokens, which the token cursor steps over
//! - Line and column tracking for diagnostics

pub mod lexer;
pub mod sequence;
pub mod tokens;
