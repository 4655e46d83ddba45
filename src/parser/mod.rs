//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module turns a token stream into a [`crate::ast::statements::Program`].
//! Expressions are parsed by recursive descent, with precedence climbing for
//! binary operators and a lookup table of prefix (NUD) handlers for operands.
//!
//! Parsing, scope resolution and type checking are one pass: each node binds
//! or resolves its names and applies its typing rule right after its children
//! are parsed. The first error ends the parse.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
