use std::rc::Rc;

use crate::{
    lexer::tokens::Token,
    scope::{
        scope::{ScopeArena, ScopeId},
        symbol::Symbol,
    },
};

use super::expressions::{Exp, Func, VarRef};

#[derive(Debug)]
pub enum StmtKind {
    /// A statement that is just a variable.
    Var(VarRef),
    /// `let x = exp ;;`
    VarAssign(Rc<Symbol>, Exp),
    /// `let f(a, b) = exp ;;`
    FuncAssign(Func),
    Exp(Exp),
}

#[derive(Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub token: Token,
    pub scope: ScopeId,
}

/// A parsed file: its statements and every scope created while parsing.
#[derive(Debug)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub scope: ScopeId,
    pub scopes: ScopeArena,
}

impl Program {
    /// Looks a top-level name up in the file scope.
    pub fn find(&self, name: &str) -> Option<Rc<Symbol>> {
        self.scopes.find(self.scope, name)
    }
}
