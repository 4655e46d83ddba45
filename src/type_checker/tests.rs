//! Unit tests for type cells and typing rules.

use std::rc::Rc;

use crate::{
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    SourceLocation,
};

use super::{
    type_checker::{
        check_arithmetic, check_call, check_func_body, check_if, check_relational, check_unary, check_while,
    },
    types::{Kind, TFunc, Type},
};

fn token(value: &str, column: u32) -> Token {
    Token {
        kind: TokenKind::Var,
        value: value.to_string(),
        location: SourceLocation {
            file: Rc::new("test.ml".to_string()),
            line: 1,
            column,
            line_begin: 0,
        },
    }
}

#[test]
fn test_cell_is_assigned_once() {
    let at = token("x", 1);
    let ty = Type::unknown();
    assert_eq!(ty.name(), "unknown");

    ty.expect_or_infer(Kind::Int, &at).unwrap();
    assert_eq!(ty.kind(), Some(Kind::Int));

    let error = ty.expect_or_infer(Kind::Float, &at).unwrap_err();
    assert_eq!(
        *error.get_internal_error(),
        ErrorImpl::TypeMismatch {
            expected: "float".to_string(),
            found: "int".to_string()
        }
    );
    assert_eq!(ty.kind(), Some(Kind::Int));
}

#[test]
fn test_expect_does_not_infer() {
    let at = token("x", 1);
    let ty = Type::unknown();

    assert!(ty.expect(Kind::Bool, &at).is_err());
    assert!(ty.is_unknown());
}

#[test]
fn test_clones_share_the_cell() {
    let at = token("x", 1);
    let ty = Type::unknown();
    let alias = ty.clone();

    alias.expect_or_infer(Kind::Bool, &at).unwrap();
    assert_eq!(ty.kind(), Some(Kind::Bool));
    assert!(ty.shares(&alias));
    assert!(!ty.shares(&Type::of(Kind::Bool)));
}

#[test]
fn test_unify() {
    let at = token("x", 1);

    let known = Type::of(Kind::Float);
    let unknown = Type::unknown();
    known.unify(&unknown, &at).unwrap();
    assert_eq!(unknown.kind(), Some(Kind::Float));

    let left = Type::unknown();
    let right = Type::unknown();
    left.unify(&right, &at).unwrap();
    assert!(left.is_unknown());
    assert!(left.shares(&right));

    right.expect_or_infer(Kind::Bool, &at).unwrap();
    assert_eq!(left.kind(), Some(Kind::Bool));

    assert!(Type::of(Kind::Int).unify(&Type::of(Kind::Bool), &at).is_err());
}

#[test]
fn test_arithmetic_inference() {
    let (a, b) = (token("a", 1), token("b", 5));

    // Right operand decides when the left one is unknown.
    let lhs = Type::unknown();
    let rhs = Type::of(Kind::Float);
    let result = check_arithmetic((&lhs, &a), (&rhs, &b)).unwrap();
    assert_eq!(result.kind(), Some(Kind::Float));
    assert_eq!(lhs.kind(), Some(Kind::Float));

    // Both unknown default to int.
    let lhs = Type::unknown();
    let rhs = Type::unknown();
    let result = check_arithmetic((&lhs, &a), (&rhs, &b)).unwrap();
    assert_eq!(result.kind(), Some(Kind::Int));
    assert_eq!(rhs.kind(), Some(Kind::Int));

    // Mixed numeric kinds are rejected at the right operand.
    let error = check_arithmetic((&Type::of(Kind::Int), &a), (&Type::of(Kind::Float), &b)).unwrap_err();
    assert_eq!(error.get_location().column, 5);

    // Non numeric operands are unexpected.
    let error = check_arithmetic((&Type::of(Kind::Bool), &a), (&Type::unknown(), &b)).unwrap_err();
    assert_eq!(
        *error.get_internal_error(),
        ErrorImpl::UnexpectedType {
            found: "bool".to_string()
        }
    );
}

#[test]
fn test_relational_yields_bool() {
    let (a, b) = (token("a", 1), token("b", 5));

    let lhs = Type::unknown();
    let result = check_relational((&lhs, &a), (&Type::of(Kind::Bool), &b)).unwrap();
    assert_eq!(result.kind(), Some(Kind::Bool));
    assert_eq!(lhs.kind(), Some(Kind::Bool));

    assert!(check_relational((&Type::of(Kind::Unit), &a), (&Type::of(Kind::Unit), &b)).is_err());
}

#[test]
fn test_unary_defaults_to_int() {
    let a = token("a", 1);
    let operand = Type::unknown();

    assert_eq!(check_unary((&operand, &a)).unwrap().kind(), Some(Kind::Int));
    assert_eq!(operand.kind(), Some(Kind::Int));
    assert!(check_unary((&Type::of(Kind::String), &a)).is_err());
}

#[test]
fn test_if_and_while() {
    let at = token("c", 1);

    let cond = Type::unknown();
    let then = Type::unknown();
    let result = check_if((&cond, &at), (&then, &at), None).unwrap();
    assert_eq!(cond.kind(), Some(Kind::Bool));
    assert_eq!(result.kind(), Some(Kind::Unit));

    let then = Type::unknown();
    let els = Type::of(Kind::Int);
    let result = check_if((&Type::of(Kind::Bool), &at), (&then, &at), Some((&els, &at))).unwrap();
    assert_eq!(result.kind(), Some(Kind::Int));

    let body = Type::of(Kind::Int);
    let result = check_while((&Type::of(Kind::Bool), &at), (&body, &at)).unwrap();
    assert_eq!(result.kind(), Some(Kind::Int));

    assert!(check_while((&Type::of(Kind::Int), &at), (&Type::unknown(), &at)).is_err());
}

#[test]
fn test_unknown_links_chain() {
    let at = token("x", 1);
    let (a, b, c) = (Type::unknown(), Type::unknown(), Type::unknown());

    a.unify(&b, &at).unwrap();
    c.unify(&a, &at).unwrap();
    b.unify(&c, &at).unwrap();

    assert!(a.shares(&c));
    assert!(a.expect_or_infer(Kind::Float, &at).is_ok());
    assert_eq!(b.kind(), Some(Kind::Float));
    assert_eq!(c.kind(), Some(Kind::Float));

    let error = c.expect_or_infer(Kind::Int, &at).unwrap_err();
    assert_eq!(
        *error.get_internal_error(),
        ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            found: "float".to_string()
        }
    );
}

#[test]
fn test_if_branches_infer_together() {
    let at = token("x", 1);
    let (then, els) = (Type::unknown(), Type::unknown());

    let result = check_if((&Type::of(Kind::Bool), &at), (&then, &at), Some((&els, &at))).unwrap();
    assert!(result.is_unknown());

    els.expect_or_infer(Kind::Int, &at).unwrap();
    assert_eq!(then.kind(), Some(Kind::Int));
    assert_eq!(result.kind(), Some(Kind::Int));
    assert!(then.expect_or_infer(Kind::Bool, &at).is_err());
}

#[test]
fn test_func_result_follows_body() {
    let at = token("id", 1);
    let signature = TFunc::new(1);

    // id(x) = x
    check_func_body(&signature, (&signature.params[0], &at)).unwrap();
    assert_eq!(signature.to_string(), "unknown -> unknown");

    let arg = Type::of(Kind::Float);
    let result = check_call(&at, &signature, &[(&arg, &at)]).unwrap();
    assert_eq!(result.kind(), Some(Kind::Float));
    assert_eq!(signature.to_string(), "float -> float");
}

#[test]
fn test_call_checks_arity_and_arguments() {
    let name = token("add", 3);
    let signature = TFunc::new(2);
    let (x, y) = (Type::of(Kind::Int), Type::unknown());

    let result = check_call(&name, &signature, &[(&x, &name), (&y, &name)]).unwrap();
    assert!(result.shares(&signature.ret));
    assert_eq!(signature.params[0].kind(), Some(Kind::Int));

    let error = check_call(&name, &signature, &[(&x, &name)]).unwrap_err();
    assert_eq!(
        *error.get_internal_error(),
        ErrorImpl::ArityMismatch {
            name: "add".to_string(),
            expected: 2,
            received: 1
        }
    );
    assert_eq!(error.get_location().column, 3);
}

#[test]
fn test_signature_display() {
    let at = token("f", 1);
    let signature = TFunc::new(2);
    signature.params[0].expect_or_infer(Kind::Int, &at).unwrap();
    signature.ret.expect_or_infer(Kind::Bool, &at).unwrap();

    assert_eq!(signature.to_string(), "int * unknown -> bool");
    assert_eq!(TFunc::new(0).to_string(), "unit -> unknown");
}
