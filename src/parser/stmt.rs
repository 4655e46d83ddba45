use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Binding, Exp, Func},
        statements::{Stmt, StmtKind},
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    scope::{
        scope::{ScopeId, ScopeKind},
        symbol::Symbol,
    },
    type_checker::{type_checker::check_func_body, types::TFunc},
};

use super::{
    expr::{finish_let_expr, parse_exp},
    parser::Parser,
};

/// Parses one statement up to and including its `;;`. A top-level `let`
/// with several `and` bindings yields one statement per binding.
pub fn parse_stmt(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let token = parser.current_token().clone();
    let block = parser.enter_scope(ScopeKind::Block);

    let stmts = if token.kind == TokenKind::Let {
        parse_let_stmt(parser, token, block)
    } else {
        parse_exp_stmt(parser, token, block).map(|stmt| vec![stmt])
    };

    parser.leave_scope();
    stmts
}

fn parse_exp_stmt(parser: &mut Parser, token: Token, block: ScopeId) -> Result<Stmt, Error> {
    let exp = parse_exp(parser)?;
    parser.expect(TokenKind::DoubleSemicolon)?;

    let kind = match exp.into_var() {
        Ok(var) => StmtKind::Var(var),
        Err(exp) => StmtKind::Exp(exp),
    };

    Ok(Stmt {
        kind,
        token,
        scope: block,
    })
}

/// `let ... ;;` defines names in the file scope; `let ... in exp ;;` is an
/// expression statement.
fn parse_let_stmt(parser: &mut Parser, token: Token, block: ScopeId) -> Result<Vec<Stmt>, Error> {
    parser.advance();
    let is_rec = parser.try_consume(TokenKind::Rec).is_some();

    let let_scope = parser.enter_scope(ScopeKind::Block);
    let bindings = parse_bindings(parser, is_rec)?;

    if parser.current_token_kind() == TokenKind::In {
        let item = finish_let_expr(parser, token.clone(), let_scope, bindings)?;
        parser.expect(TokenKind::DoubleSemicolon)?;

        let exp = Exp {
            root: token.clone(),
            ty: item.ty(),
            head: None,
            items: vec![item],
            scope: block,
        };

        return Ok(vec![Stmt {
            kind: StmtKind::Exp(exp),
            token,
            scope: block,
        }]);
    }

    parser.leave_scope();
    parser.expect(TokenKind::DoubleSemicolon)?;

    let file = parser.file_scope();
    let stmts = bindings
        .into_iter()
        .map(|binding| {
            let symbol = Rc::clone(binding.symbol());
            parser.define_in(file, Rc::clone(&symbol));

            let kind = match binding {
                Binding::Var { symbol, value } => StmtKind::VarAssign(symbol, value),
                Binding::Func(func) => {
                    parser.define_tag_in(file, symbol);
                    StmtKind::FuncAssign(func)
                }
            };

            Stmt {
                kind,
                token: token.clone(),
                scope: block,
            }
        })
        .collect();

    Ok(stmts)
}

/// binding ('and' binding)*, bound into the current scope.
pub fn parse_bindings(parser: &mut Parser, is_rec: bool) -> Result<Vec<Binding>, Error> {
    let mut bindings = vec![parse_binding(parser, is_rec)?];

    while parser.try_consume(TokenKind::And).is_some() {
        bindings.push(parse_binding(parser, is_rec)?);
    }

    Ok(bindings)
}

pub fn parse_binding(parser: &mut Parser, is_rec: bool) -> Result<Binding, Error> {
    let name = parser.expect(TokenKind::Var)?;

    match parser.current_token_kind() {
        TokenKind::OpenParen | TokenKind::Unit => parse_func(parser, name, is_rec).map(Binding::Func),
        _ => {
            parser.expect(TokenKind::Assignment)?;
            let value = parse_exp(parser)?;

            let symbol = Symbol::var(&name, value.ty.clone());
            parser.define(Rc::clone(&symbol));

            Ok(Binding::Var { symbol, value })
        }
    }
}

/// `name(a, b) = body` or `name() = body`. A `rec` function is visible in
/// its own body, others only after it.
fn parse_func(parser: &mut Parser, name: Token, is_rec: bool) -> Result<Func, Error> {
    let mut param_tokens = vec![];
    if parser.try_consume(TokenKind::Unit).is_none() {
        parser.expect(TokenKind::OpenParen)?;
        loop {
            param_tokens.push(parser.expect(TokenKind::Var)?);
            if parser.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    let signature = Rc::new(TFunc::new(param_tokens.len()));
    let symbol = Symbol::func(&name, Rc::clone(&signature));
    if is_rec {
        parser.define(Rc::clone(&symbol));
    }

    let scope = parser.enter_scope(ScopeKind::Func);
    let params: Vec<Rc<Symbol>> = param_tokens
        .iter()
        .zip(&signature.params)
        .map(|(token, ty)| Symbol::var(token, ty.clone()))
        .collect();
    for param in &params {
        parser.define(Rc::clone(param));
    }

    parser.expect(TokenKind::Assignment)?;
    let body = parse_exp(parser)?;
    parser.leave_scope();

    check_func_body(&signature, (&body.ty, &body.root))?;

    if !is_rec {
        parser.define(Rc::clone(&symbol));
    }
    let current = parser.current_scope();
    parser.define_tag_in(current, Rc::clone(&symbol));

    Ok(Func {
        symbol,
        params,
        body: Box::new(body),
        signature,
        is_rec,
        scope,
    })
}
