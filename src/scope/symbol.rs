use std::rc::Rc;

use crate::{
    lexer::tokens::Token,
    type_checker::types::{Kind, TFunc, Type},
};

#[derive(Debug, Clone)]
pub enum SymbolKind {
    Var,
    Func(Rc<TFunc>),
}

/// A named binding. Scopes and AST nodes share symbols through `Rc`, so a
/// type inferred at one use is seen by every other use.
#[derive(Debug)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub token: Token,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn var(token: &Token, ty: Type) -> Rc<Self> {
        Rc::new(Symbol {
            name: token.value.clone(),
            ty,
            token: token.clone(),
            kind: SymbolKind::Var,
        })
    }

    pub fn func(token: &Token, signature: Rc<TFunc>) -> Rc<Self> {
        Rc::new(Symbol {
            name: token.value.clone(),
            ty: Type::of(Kind::Func),
            token: token.clone(),
            kind: SymbolKind::Func(signature),
        })
    }

    pub fn signature(&self) -> Option<&Rc<TFunc>> {
        match &self.kind {
            SymbolKind::Func(signature) => Some(signature),
            SymbolKind::Var => None,
        }
    }

    /// `int`, `bool`, ... for variables; the full signature for functions.
    pub fn type_name(&self) -> String {
        match &self.kind {
            SymbolKind::Func(signature) => signature.to_string(),
            SymbolKind::Var => self.ty.to_string(),
        }
    }
}
