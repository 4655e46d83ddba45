use std::{cell::RefCell, fmt::Display, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Float,
    Bool,
    Unit,
    String,
    Pair,
    Func,
}

impl Kind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::Float)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Unit => "unit",
            Kind::String => "string",
            Kind::Pair => "pair",
            Kind::Func => "fun",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Unknown,
    Known(Kind),
    Link(Type),
}

/// A type cell. Starts unknown and is fixed at most once; every clone of a
/// `Type` refers to the same cell. Unifying two unknown cells links them,
/// after which fixing either one fixes both.
#[derive(Debug, Clone, Default)]
pub struct Type(Rc<RefCell<Slot>>);

impl Type {
    pub fn unknown() -> Self {
        Type::default()
    }

    pub fn of(kind: Kind) -> Self {
        Type(Rc::new(RefCell::new(Slot::Known(kind))))
    }

    /// The cell at the end of the link chain.
    fn root(&self) -> Type {
        let link = match &*self.0.borrow() {
            Slot::Link(next) => Some(next.clone()),
            _ => None,
        };

        match link {
            Some(next) => next.root(),
            None => self.clone(),
        }
    }

    fn fix(&self, kind: Kind) {
        let root = self.root();
        *root.0.borrow_mut() = Slot::Known(kind);
    }

    pub fn kind(&self) -> Option<Kind> {
        let root = self.root();
        let kind = match &*root.0.borrow() {
            Slot::Known(kind) => Some(*kind),
            _ => None,
        };
        kind
    }

    pub fn is_unknown(&self) -> bool {
        self.kind().is_none()
    }

    /// Whether both handles resolve to the same cell.
    pub fn shares(&self, other: &Type) -> bool {
        Rc::ptr_eq(&self.root().0, &other.root().0)
    }

    pub fn name(&self) -> &'static str {
        self.kind().map(|kind| kind.as_str()).unwrap_or("unknown")
    }

    /// Fixes an unknown cell to `kind`, otherwise requires it to be `kind`.
    pub fn expect_or_infer(&self, kind: Kind, at: &Token) -> Result<(), Error> {
        match self.kind() {
            None => {
                self.fix(kind);
                Ok(())
            }
            Some(_) => self.expect(kind, at),
        }
    }

    /// Requires the cell to already be `kind`.
    pub fn expect(&self, kind: Kind, at: &Token) -> Result<(), Error> {
        if self.kind() == Some(kind) {
            return Ok(());
        }

        Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: kind.to_string(),
                found: self.name().to_string(),
            },
            at.location.clone(),
        ))
    }

    pub fn unexpect(&self, at: &Token) -> Error {
        Error::new(
            ErrorImpl::UnexpectedType {
                found: self.name().to_string(),
            },
            at.location.clone(),
        )
    }

    /// Makes two cells agree. A known side fixes an unknown one; two unknown
    /// cells are linked into one.
    pub fn unify(&self, other: &Type, at: &Token) -> Result<(), Error> {
        match (self.kind(), other.kind()) {
            (Some(expected), Some(_)) => other.expect(expected, at),
            (Some(kind), None) => other.expect_or_infer(kind, at),
            (None, Some(kind)) => self.expect_or_infer(kind, at),
            (None, None) => {
                let (left, right) = (self.root(), other.root());
                if !Rc::ptr_eq(&left.0, &right.0) {
                    *left.0.borrow_mut() = Slot::Link(right);
                }
                Ok(())
            }
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Signature of a function: one cell per parameter and one for the result.
#[derive(Debug)]
pub struct TFunc {
    pub ret: Type,
    pub params: Vec<Type>,
}

impl TFunc {
    pub fn new(arity: usize) -> Self {
        TFunc {
            ret: Type::unknown(),
            params: (0..arity).map(|_| Type::unknown()).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for TFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            return write!(f, "unit -> {}", self.ret);
        }

        let params: Vec<&str> = self.params.iter().map(|param| param.name()).collect();
        write!(f, "{} -> {}", params.join(" * "), self.ret)
    }
}
