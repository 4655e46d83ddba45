use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::types::{Kind, TFunc, Type};

/// A type together with the token errors about it are reported at.
pub type Typed<'a> = (&'a Type, &'a Token);

/// Picks the kind both operands of a binary operator must have. The left
/// operand decides; an unknown left operand takes the right one's kind and
/// two unknown operands default to `int`.
fn operand_kind(lhs: Typed, rhs: Typed, allowed: &[Kind]) -> Result<Kind, Error> {
    let (lhs_ty, lhs_at) = lhs;
    let (rhs_ty, rhs_at) = rhs;

    let kind = match (lhs_ty.kind(), rhs_ty.kind()) {
        (Some(kind), _) if allowed.contains(&kind) => kind,
        (Some(_), _) => return Err(lhs_ty.unexpect(lhs_at)),
        (None, Some(kind)) if allowed.contains(&kind) => kind,
        (None, Some(_)) => return Err(rhs_ty.unexpect(rhs_at)),
        (None, None) => Kind::Int,
    };

    lhs_ty.expect_or_infer(kind, lhs_at)?;
    rhs_ty.expect_or_infer(kind, rhs_at)?;

    Ok(kind)
}

pub fn check_arithmetic(lhs: Typed, rhs: Typed) -> Result<Type, Error> {
    let kind = operand_kind(lhs, rhs, &[Kind::Int, Kind::Float])?;
    Ok(Type::of(kind))
}

pub fn check_relational(lhs: Typed, rhs: Typed) -> Result<Type, Error> {
    operand_kind(lhs, rhs, &[Kind::Int, Kind::Float, Kind::Bool])?;
    Ok(Type::of(Kind::Bool))
}

pub fn check_logical(lhs: Typed, rhs: Typed) -> Result<Type, Error> {
    lhs.0.expect_or_infer(Kind::Bool, lhs.1)?;
    rhs.0.expect_or_infer(Kind::Bool, rhs.1)?;
    Ok(Type::of(Kind::Bool))
}

/// Dispatches a binary operator token to its rule.
pub fn check_binary(op: &Token, lhs: Typed, rhs: Typed) -> Result<Type, Error> {
    match op.kind {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
            check_arithmetic(lhs, rhs)
        }
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals
        | TokenKind::Equals
        | TokenKind::NotEquals => check_relational(lhs, rhs),
        TokenKind::LogicalAnd | TokenKind::LogicalOr => check_logical(lhs, rhs),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedExpression {
                found: op.to_string(),
            },
            op.location.clone(),
        )),
    }
}

pub fn check_unary(operand: Typed) -> Result<Type, Error> {
    let (ty, at) = operand;
    let kind = match ty.kind() {
        Some(kind) if kind.is_numeric() => kind,
        Some(_) => return Err(ty.unexpect(at)),
        None => Kind::Int,
    };

    ty.expect_or_infer(kind, at)?;
    Ok(Type::of(kind))
}

/// `if` yields its branch type; without `else` an untyped branch is `unit`.
pub fn check_if(cond: Typed, then: Typed, els: Option<Typed>) -> Result<Type, Error> {
    cond.0.expect_or_infer(Kind::Bool, cond.1)?;

    match els {
        None => {
            if then.0.is_unknown() {
                then.0.expect_or_infer(Kind::Unit, then.1)?;
            }
        }
        Some((els_ty, els_at)) => then.0.unify(els_ty, els_at)?,
    }

    Ok(then.0.clone())
}

/// `while` yields the type of its body.
pub fn check_while(cond: Typed, body: Typed) -> Result<Type, Error> {
    cond.0.expect_or_infer(Kind::Bool, cond.1)?;

    if body.0.is_unknown() {
        body.0.expect_or_infer(Kind::Unit, body.1)?;
    }

    Ok(body.0.clone())
}

/// Checks a call against the callee's signature and returns the callee's
/// result cell.
pub fn check_call(name: &Token, signature: &TFunc, args: &[Typed]) -> Result<Type, Error> {
    if args.len() != signature.arity() {
        return Err(Error::new(
            ErrorImpl::ArityMismatch {
                name: name.value.clone(),
                expected: signature.arity(),
                received: args.len(),
            },
            name.location.clone(),
        ));
    }

    for (param, (arg_ty, arg_at)) in signature.params.iter().zip(args) {
        param.unify(arg_ty, arg_at)?;
    }

    Ok(signature.ret.clone())
}

/// Ties a function's result cell to the type of its body.
pub fn check_func_body(signature: &TFunc, body: Typed) -> Result<(), Error> {
    signature.ret.unify(body.0, body.1)
}

pub fn not_a_function(name: &Token) -> Error {
    Error::new(
        ErrorImpl::NotAFunction {
            name: name.value.clone(),
        },
        name.location.clone(),
    )
}
