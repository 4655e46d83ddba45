use std::rc::Rc;

use crate::{
    ast::expressions::{Binding, Constant, ConstantValue, Exp, Expa, Expb, FuncCall, VarRef},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    scope::{
        scope::{ScopeId, ScopeKind},
        symbol::Symbol,
    },
    type_checker::{
        type_checker::{check_binary, check_call, check_if, check_unary, check_while, not_a_function, Typed},
        types::{Kind, Type},
    },
};

use super::{
    lookups::{binary_power, starts_argument, BindingPower, NUD_LOOKUP},
    parser::Parser,
    stmt::parse_bindings,
};

/// exp ::= Var atom+ | seq
pub fn parse_exp(parser: &mut Parser) -> Result<Exp, Error> {
    parse_exp_or(parser, parse_seq)
}

/// Parses an application chain if the input starts with one, otherwise
/// falls back to `rest`.
fn parse_exp_or(parser: &mut Parser, rest: fn(&mut Parser) -> Result<Expb, Error>) -> Result<Exp, Error> {
    let root = parser.current_token().clone();
    let scope = parser.current_scope();

    if root.kind == TokenKind::Var {
        // A name followed by an argument starts an application chain;
        // anything else is reparsed as an operator expression.
        let checkpoint = parser.mark();
        let head = parser.advance();
        let symbol = parser.resolve(&head)?;

        if starts_argument(parser.current_token_kind()) {
            return parse_application(parser, root, VarRef { token: head, symbol }, scope);
        }

        parser.reset_to(checkpoint);
    }

    let item = rest(parser)?;

    Ok(Exp {
        root,
        ty: item.ty(),
        head: None,
        items: vec![item],
        scope,
    })
}

fn parse_application(parser: &mut Parser, root: Token, head: VarRef, scope: ScopeId) -> Result<Exp, Error> {
    let signature = head
        .symbol
        .signature()
        .cloned()
        .ok_or_else(|| not_a_function(&head.token))?;

    let mut items = vec![];
    while starts_argument(parser.current_token_kind()) {
        items.push(parse_operand(parser)?);
    }

    let arg_types: Vec<Type> = items.iter().map(|item| item.ty()).collect();
    let args: Vec<Typed> = arg_types
        .iter()
        .zip(&items)
        .map(|(ty, item)| (ty, item.token()))
        .collect();
    let ty = check_call(&head.token, &signature, &args)?;

    Ok(Exp {
        root,
        ty,
        head: Some(head),
        items,
        scope,
    })
}

/// seq ::= expb [';' seq]
pub fn parse_seq(parser: &mut Parser) -> Result<Expb, Error> {
    let first = parse_expb(parser)?;

    match parser.try_consume(TokenKind::Semicolon) {
        Some(token) => {
            let second = parse_seq(parser)?;
            Ok(Expb::Compound {
                token,
                first: Box::new(first),
                second: Box::new(second),
            })
        }
        None => Ok(first),
    }
}

pub fn parse_expb(parser: &mut Parser) -> Result<Expb, Error> {
    let lhs = parse_operand(parser)?;
    parse_binary_expr(parser, lhs, BindingPower::LogicalOr)
}

/// Precedence climbing over binary operators. Operators of equal precedence
/// associate to the left.
pub fn parse_binary_expr(parser: &mut Parser, mut lhs: Expb, min_bp: BindingPower) -> Result<Expb, Error> {
    while let Some(bp) = binary_power(parser.current_token_kind()) {
        if bp < min_bp {
            break;
        }

        let op = parser.advance();
        let mut rhs = parse_operand(parser)?;

        while let Some(next_bp) = binary_power(parser.current_token_kind()) {
            if next_bp <= bp {
                break;
            }
            rhs = parse_binary_expr(parser, rhs, next_bp)?;
        }

        let (lhs_ty, rhs_ty) = (lhs.ty(), rhs.ty());
        let ty = check_binary(&op, (&lhs_ty, lhs.token()), (&rhs_ty, rhs.token()))?;

        lhs = Expb::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            ty,
        };
    }

    Ok(lhs)
}

pub fn parse_operand(parser: &mut Parser) -> Result<Expb, Error> {
    match NUD_LOOKUP.get(&parser.current_token_kind()) {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let op = parser.advance();
    let operand = parse_operand(parser)?;
    let ty = check_unary((&operand.ty(), operand.token()))?;

    Ok(Expb::Unary {
        op,
        operand: Box::new(operand),
        ty,
    })
}

/// A name, or a call `f(a, b)` / `f()`.
pub fn parse_var_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();
    let symbol = parser.resolve(&token)?;

    match parser.current_token_kind() {
        TokenKind::OpenParen | TokenKind::Unit => parse_call_expr(parser, token, symbol),
        _ => Ok(Expb::Atom(Expa::Var(VarRef { token, symbol }))),
    }
}

fn parse_call_expr(parser: &mut Parser, token: Token, callee: Rc<Symbol>) -> Result<Expb, Error> {
    let signature = callee
        .signature()
        .cloned()
        .ok_or_else(|| not_a_function(&token))?;

    let mut args = vec![];
    if parser.try_consume(TokenKind::Unit).is_none() {
        parser.expect(TokenKind::OpenParen)?;
        loop {
            args.push(parse_exp(parser)?);
            if parser.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    let typed: Vec<Typed> = args.iter().map(|arg| (&arg.ty, &arg.root)).collect();
    let ty = check_call(&token, &signature, &typed)?;

    Ok(Expb::Atom(Expa::Call(FuncCall {
        token,
        callee,
        args,
        ty,
    })))
}

pub fn parse_constant_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();

    let (value, kind) = match token.kind {
        TokenKind::Int => {
            let value = token.value.replace('_', "").parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::IntOutOfRange {
                        literal: token.value.clone(),
                    },
                    token.location.clone(),
                )
            })?;
            (ConstantValue::Int(value), Kind::Int)
        }
        TokenKind::Float => {
            let value = token.value.replace('_', "").parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::InvalidFloat {
                        literal: token.value.clone(),
                    },
                    token.location.clone(),
                )
            })?;
            (ConstantValue::Float(value), Kind::Float)
        }
        TokenKind::Bool => (ConstantValue::Bool(token.value == "true"), Kind::Bool),
        TokenKind::String => {
            let text = token
                .value
                .strip_prefix('"')
                .and_then(|text| text.strip_suffix('"'))
                .unwrap_or(&token.value)
                .to_string();
            (ConstantValue::String(text), Kind::String)
        }
        _ => (ConstantValue::Unit, Kind::Unit),
    };

    Ok(Expb::Atom(Expa::Constant(Constant {
        token,
        value,
        ty: Type::of(kind),
    })))
}

/// `( exp )` or the pair `( exp , exp )`.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();
    let first = parse_exp(parser)?;

    if parser.try_consume(TokenKind::Comma).is_some() {
        let second = parse_exp(parser)?;
        parser.expect(TokenKind::CloseParen)?;

        return Ok(Expb::Cons {
            token,
            first: Box::new(first),
            second: Box::new(second),
            ty: Type::of(Kind::Pair),
        });
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expb::Atom(Expa::Paren {
        token,
        inner: Box::new(first),
    }))
}

/// `fst ( exp , exp )` and `snd ( exp , exp )`.
pub fn parse_projection_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let first = Box::new(parse_exp(parser)?);
    parser.expect(TokenKind::Comma)?;
    let second = Box::new(parse_exp(parser)?);
    parser.expect(TokenKind::CloseParen)?;

    if token.kind == TokenKind::Fst {
        Ok(Expb::Fst { token, first, second })
    } else {
        Ok(Expb::Snd { token, first, second })
    }
}

/// Parses one branch in its own scope. A branch is an application chain or
/// an operator expression; `;` ends it.
fn parse_branch(parser: &mut Parser) -> Result<(Exp, ScopeId), Error> {
    let scope = parser.enter_scope(ScopeKind::Block);
    let branch = parse_exp_or(parser, parse_expb)?;
    parser.leave_scope();
    Ok((branch, scope))
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();
    let cond = parse_exp(parser)?;
    parser.expect(TokenKind::Then)?;

    let (then, then_scope) = parse_branch(parser)?;
    let els = match parser.try_consume(TokenKind::Else) {
        Some(_) => Some(parse_branch(parser)?),
        None => None,
    };

    let els_typed = els.as_ref().map(|(els, _)| (&els.ty, &els.root));
    let ty = check_if((&cond.ty, &cond.root), (&then.ty, &then.root), els_typed)?;

    parser.append_to_current(then_scope);
    if let Some((_, els_scope)) = &els {
        parser.append_to_current(*els_scope);
    }

    Ok(Expb::Atom(Expa::If {
        token,
        cond: Box::new(cond),
        then: Box::new(then),
        els: els.map(|(els, _)| Box::new(els)),
        ty,
    }))
}

pub fn parse_while_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();
    let cond = parse_exp(parser)?;
    parser.expect(TokenKind::Do)?;

    let body_scope = parser.enter_scope(ScopeKind::Block);
    let body = parse_exp(parser)?;
    parser.leave_scope();
    parser.expect(TokenKind::Done)?;

    let ty = check_while((&cond.ty, &cond.root), (&body.ty, &body.root))?;
    parser.append_to_current(body_scope);

    Ok(Expb::Atom(Expa::While {
        token,
        cond: Box::new(cond),
        body: Box::new(body),
        ty,
    }))
}

/// let [rec] bindings in exp
pub fn parse_let_expr(parser: &mut Parser) -> Result<Expb, Error> {
    let token = parser.advance();
    let is_rec = parser.try_consume(TokenKind::Rec).is_some();

    let scope = parser.enter_scope(ScopeKind::Block);
    let bindings = parse_bindings(parser, is_rec)?;

    finish_let_expr(parser, token, scope, bindings)
}

/// Parses `in body` for a let whose bindings are already in `scope`, which
/// must be the current scope.
pub fn finish_let_expr(
    parser: &mut Parser,
    token: Token,
    scope: ScopeId,
    bindings: Vec<Binding>,
) -> Result<Expb, Error> {
    parser.expect(TokenKind::In)?;
    let body = parse_exp(parser)?;

    parser.leave_scope();
    parser.append_to_current(scope);

    Ok(Expb::Atom(Expa::Let {
        token,
        bindings,
        body: Box::new(body),
        scope,
    }))
}
