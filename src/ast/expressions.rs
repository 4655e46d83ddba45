use std::rc::Rc;

use crate::{
    lexer::tokens::Token,
    scope::{scope::ScopeId, symbol::Symbol},
    type_checker::types::{TFunc, Type},
};

/// A full expression.
///
/// Either an application chain `f a b` (`head` is the function, `items` its
/// arguments) or a single operator expression (`head` is `None` and `items`
/// holds one node).
#[derive(Debug)]
pub struct Exp {
    pub root: Token,
    pub ty: Type,
    pub head: Option<VarRef>,
    pub items: Vec<Expb>,
    pub scope: ScopeId,
}

impl Exp {
    pub fn is_var(&self) -> bool {
        matches!(
            (&self.head, self.items.as_slice()),
            (None, [Expb::Atom(Expa::Var(_))])
        )
    }

    /// Unwraps an expression that is a lone variable.
    pub fn into_var(mut self) -> Result<VarRef, Exp> {
        if !self.is_var() {
            return Err(self);
        }

        match self.items.pop() {
            Some(Expb::Atom(Expa::Var(var))) => Ok(var),
            other => {
                self.items.extend(other);
                Err(self)
            }
        }
    }
}

#[derive(Debug)]
pub enum Expb {
    Binary {
        op: Token,
        lhs: Box<Expb>,
        rhs: Box<Expb>,
        ty: Type,
    },
    Unary {
        op: Token,
        operand: Box<Expb>,
        ty: Type,
    },
    Cons {
        token: Token,
        first: Box<Exp>,
        second: Box<Exp>,
        ty: Type,
    },
    Fst {
        token: Token,
        first: Box<Exp>,
        second: Box<Exp>,
    },
    Snd {
        token: Token,
        first: Box<Exp>,
        second: Box<Exp>,
    },
    /// `first ; second`, nested to the right.
    Compound {
        token: Token,
        first: Box<Expb>,
        second: Box<Expb>,
    },
    Atom(Expa),
}

impl Expb {
    pub fn ty(&self) -> Type {
        match self {
            Expb::Binary { ty, .. } | Expb::Unary { ty, .. } | Expb::Cons { ty, .. } => ty.clone(),
            Expb::Fst { first, .. } => first.ty.clone(),
            Expb::Snd { second, .. } => second.ty.clone(),
            Expb::Compound { second, .. } => second.ty(),
            Expb::Atom(atom) => atom.ty(),
        }
    }

    /// The token type errors about this node are reported at.
    pub fn token(&self) -> &Token {
        match self {
            Expb::Binary { lhs, .. } => lhs.token(),
            Expb::Unary { op, .. } => op,
            Expb::Cons { token, .. }
            | Expb::Fst { token, .. }
            | Expb::Snd { token, .. } => token,
            Expb::Compound { first, .. } => first.token(),
            Expb::Atom(atom) => atom.token(),
        }
    }
}

#[derive(Debug)]
pub enum Expa {
    Var(VarRef),
    Constant(Constant),
    If {
        token: Token,
        cond: Box<Exp>,
        then: Box<Exp>,
        els: Option<Box<Exp>>,
        ty: Type,
    },
    While {
        token: Token,
        cond: Box<Exp>,
        body: Box<Exp>,
        ty: Type,
    },
    Let {
        token: Token,
        bindings: Vec<Binding>,
        body: Box<Exp>,
        scope: ScopeId,
    },
    Call(FuncCall),
    Paren {
        token: Token,
        inner: Box<Exp>,
    },
}

impl Expa {
    pub fn ty(&self) -> Type {
        match self {
            Expa::Var(var) => var.symbol.ty.clone(),
            Expa::Constant(constant) => constant.ty.clone(),
            Expa::If { ty, .. } | Expa::While { ty, .. } => ty.clone(),
            Expa::Let { body, .. } => body.ty.clone(),
            Expa::Call(call) => call.ty.clone(),
            Expa::Paren { inner, .. } => inner.ty.clone(),
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            Expa::Var(var) => &var.token,
            Expa::Constant(constant) => &constant.token,
            Expa::If { token, .. }
            | Expa::While { token, .. }
            | Expa::Let { token, .. }
            | Expa::Paren { token, .. } => token,
            Expa::Call(call) => &call.token,
        }
    }
}

/// A resolved use of a name.
#[derive(Debug)]
pub struct VarRef {
    pub token: Token,
    pub symbol: Rc<Symbol>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Unit,
}

#[derive(Debug)]
pub struct Constant {
    pub token: Token,
    pub value: ConstantValue,
    pub ty: Type,
}

#[derive(Debug)]
pub struct FuncCall {
    pub token: Token,
    pub callee: Rc<Symbol>,
    pub args: Vec<Exp>,
    pub ty: Type,
}

#[derive(Debug)]
pub struct Func {
    pub symbol: Rc<Symbol>,
    pub params: Vec<Rc<Symbol>>,
    pub body: Box<Exp>,
    pub signature: Rc<TFunc>,
    pub is_rec: bool,
    pub scope: ScopeId,
}

#[derive(Debug)]
pub enum Binding {
    Var { symbol: Rc<Symbol>, value: Exp },
    Func(Func),
}

impl Binding {
    pub fn symbol(&self) -> &Rc<Symbol> {
        match self {
            Binding::Var { symbol, .. } => symbol,
            Binding::Func(func) => &func.symbol,
        }
    }
}
