//! Lexical scopes.
//!
//! Scopes live in a [`scope::ScopeArena`] and point at their parent by id.
//! Lookups walk outwards until the enclosing file scope. Each scope also
//! carries a separate tag namespace, used to record function definitions.

pub mod scope;
pub mod symbol;

#[cfg(test)]
mod tests;
