//! Type model and typing rules.
//!
//! Types are single-assignment cells ([`types::Type`]): the first concrete
//! use of an expression fixes its cell and every later use is checked
//! against it. Unifying two unknown cells links them, so they are fixed
//! together. The parser applies the rules in [`type_checker`] to each node
//! as soon as its children are parsed, so there is no separate pass.

pub mod type_checker;
pub mod types;

#[cfg(test)]
mod tests;
